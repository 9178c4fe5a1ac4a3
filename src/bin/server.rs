//! HTTP server for the dashboard frontend.
//! Small hand-rolled HTTP/1.1 handling on top of tokio.

use promptboard::error::DashboardError;
use promptboard::{default_widgets, parse_prompt, Config, WidgetGenerator};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const MAX_REQUEST_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    if config.has_api_key() {
        info!("OpenAI API key found, using model {}", config.model);
    } else {
        info!("OpenAI API key not found, widgets come from the sample-data fallback");
    }

    let generator = Arc::new(WidgetGenerator::from_config(&config));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Server listening on http://{}", config.bind_addr);

    loop {
        let (stream, addr) = listener.accept().await?;
        debug!("New connection from: {}", addr);
        tokio::spawn(handle_connection(stream, Arc::clone(&generator)));
    }
}

async fn handle_connection(mut stream: TcpStream, generator: Arc<WidgetGenerator>) {
    match read_request(&mut stream).await {
        Ok(request) => {
            let response = handle_request(&request, &generator).await;
            if let Err(e) = stream.write_all(response.as_bytes()).await {
                error!("Failed to write response: {}", e);
            }
        }
        Err(e) => {
            error!("Failed to read from stream: {}", e);
        }
    }
}

/// Reads the head and, if a `Content-Length` is given, the whole body.
async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    loop {
        let size = stream.read(&mut buffer).await?;
        if size == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..size]);

        if let Some(head_end) = find_head_end(&data) {
            let head = String::from_utf8_lossy(&data[..head_end]);
            let body_len = content_length(&head).unwrap_or(0);
            if data.len() >= head_end + 4 + body_len {
                break;
            }
        }
        if data.len() >= MAX_REQUEST_BYTES {
            break;
        }
    }

    Ok(String::from_utf8_lossy(&data).into_owned())
}

fn find_head_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> Option<usize> {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
}

async fn handle_request(request: &str, generator: &WidgetGenerator) -> String {
    let lines: Vec<&str> = request.lines().collect();
    if lines.is_empty() {
        return create_response(400, "Bad Request", "{}");
    }

    let parts: Vec<&str> = lines[0].split_whitespace().collect();
    if parts.len() < 2 {
        return create_response(400, "Bad Request", "{}");
    }

    let method = parts[0];
    let mut path = parts[1];

    // Drop query parameters and a trailing slash
    if let Some(query_start) = path.find('?') {
        path = &path[..query_start];
    }
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    debug!("Request: {} {}", method, path);

    let mut headers = HashMap::new();
    for line in &lines[1..] {
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }
    debug!("Headers: {:?}", headers);

    match (method, path) {
        ("GET", "/api/health") => create_response(
            200,
            "OK",
            &serde_json::json!({
                "status": "ok",
                "service": "promptboard",
                "llm": generator.is_configured(),
            })
            .to_string(),
        ),
        ("GET", "/api/widgets/defaults") => json_response(&default_widgets()),
        ("POST", "/api/widgets") => {
            let prompt = prompt_from_body(request_body(request));
            if prompt.is_empty() {
                return create_response(
                    400,
                    "Bad Request",
                    &serde_json::json!({ "error": DashboardError::EmptyPrompt.to_string() })
                        .to_string(),
                );
            }

            let widget = generator.generate_widget(&prompt).await;
            json_response(&widget)
        }
        ("POST", "/api/intent") => {
            let prompt = prompt_from_body(request_body(request));
            json_response(&parse_prompt(&prompt))
        }
        ("OPTIONS", _) => {
            // CORS preflight
            create_response(200, "OK", "")
        }
        _ => {
            warn!("404: {} {} not found", method, path);
            create_response(
                404,
                "Not Found",
                &serde_json::json!({
                    "error": format!("Endpoint not found: {} {}", method, path)
                })
                .to_string(),
            )
        }
    }
}

fn request_body(request: &str) -> &str {
    request
        .find("\r\n\r\n")
        .map(|start| &request[start + 4..])
        .unwrap_or("")
        .trim()
}

/// `{"prompt": "..."}`, trimmed. Anything unparseable counts as empty.
fn prompt_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("prompt").and_then(|v| v.as_str()).map(str::to_string))
        .map(|prompt| prompt.trim().to_string())
        .unwrap_or_default()
}

fn json_response<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(body) => create_response(200, "OK", &body),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            create_response(
                500,
                "Internal Server Error",
                r#"{"error":"Failed to serialize response"}"#,
            )
        }
    }
}

fn create_response(status: u16, status_text: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n\
         Access-Control-Allow-Headers: Content-Type\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        status,
        status_text,
        body.len(),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(path: &str, body: &str) -> String {
        format!(
            "POST {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            path,
            body.len(),
            body
        )
    }

    fn body_of(response: &str) -> serde_json::Value {
        serde_json::from_str(request_body(response)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_widget_route() {
        let generator = WidgetGenerator::fallback_only();
        let request = post("/api/widgets", r#"{"prompt":"profit by region"}"#);
        let response = handle_request(&request, &generator).await;
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        let json = body_of(&response);
        assert_eq!(json["widgetType"], "chart");
        assert_eq!(json["title"], "Profit by Region");
    }

    #[tokio::test]
    async fn test_empty_prompt_is_bad_request() {
        let generator = WidgetGenerator::fallback_only();
        let request = post("/api/widgets/", r#"{"prompt":"  "}"#);
        let response = handle_request(&request, &generator).await;
        assert!(response.starts_with("HTTP/1.1 400 Bad Request"));
        assert_eq!(body_of(&response)["error"], "Please enter a prompt");
    }

    #[tokio::test]
    async fn test_defaults_and_intent_routes() {
        let generator = WidgetGenerator::fallback_only();

        let response =
            handle_request("GET /api/widgets/defaults HTTP/1.1\r\n\r\n", &generator).await;
        assert_eq!(body_of(&response).as_array().map(Vec::len), Some(11));

        let request = post("/api/intent", r#"{"prompt":"pie of q2 revenue"}"#);
        let response = handle_request(&request, &generator).await;
        let json = body_of(&response);
        assert_eq!(json["chartType"], "pie");
        assert_eq!(json["dataSource"], "quarterly");
    }

    #[tokio::test]
    async fn test_unknown_route_and_preflight() {
        let generator = WidgetGenerator::fallback_only();
        let response = handle_request("GET /api/nope?x=1 HTTP/1.1\r\n\r\n", &generator).await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found"));

        let response = handle_request("OPTIONS /api/widgets HTTP/1.1\r\n\r\n", &generator).await;
        assert!(response.contains("Access-Control-Allow-Origin: *"));
    }

    #[test]
    fn test_content_length_header() {
        assert_eq!(content_length("POST / HTTP/1.1\r\ncontent-length: 42"), Some(42));
        assert_eq!(content_length("GET / HTTP/1.1"), None);
    }
}
