use promptboard::prompts::{system_message, INSTRUCTION_MARKERS};
use promptboard::{
    ChartType, Config, Dashboard, DashboardError, GenerationFailure, LlmClient, WidgetGenerator,
    WidgetKind,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn generator_for(server: &MockServer) -> WidgetGenerator {
    let client = LlmClient::new(
        "sk-test".to_string(),
        format!("{}/v1", server.uri()),
        "gpt-4o-mini".to_string(),
    );
    WidgetGenerator::with_client(Arc::new(client))
}

#[tokio::test]
async fn test_valid_response_is_coerced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 300,
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"chartType":"line","labels":["Jan","Feb"],"values":["2000","2500"],"title":"Sales - Product A","xAxisLabel":"Month","yAxisLabel":"Sales"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator_for(&server).await;
    let widget = generator.generate_widget("sales trend for product a").await;

    let chart = widget.as_chart().expect("chart widget");
    assert_eq!(chart.chart_type, ChartType::Line);
    assert_eq!(chart.labels, vec!["Jan", "Feb"]);
    assert_eq!(chart.values, vec![2000.0, 2500.0]);
    assert_eq!(chart.x_axis_label, "Month");
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(2)
        .mount(&server)
        .await;

    let generator = generator_for(&server).await;
    match generator.try_generate("profit by region").await {
        Err(GenerationFailure::Transport(e)) => assert!(e.to_string().contains("500")),
        other => panic!("expected transport failure, got {:?}", other),
    }

    let widget = generator.generate_widget("profit by region").await;
    let chart = widget.as_chart().expect("chart widget");
    assert_eq!(chart.title, "Profit by Region");
    assert_eq!(chart.values, vec![33200.0, 16900.0, 36400.0, 64350.0, 37500.0]);
}

#[tokio::test]
async fn test_api_error_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let generator = generator_for(&server).await;
    assert!(matches!(
        generator.try_generate("sales").await,
        Err(GenerationFailure::Transport(_))
    ));
    assert_eq!(generator.generate_widget("sales").await.title(), "Sales by Product");
}

#[tokio::test]
async fn test_garbage_and_echo_fall_back() {
    let server = MockServer::start().await;
    let echo = format!("{}\n{}", INSTRUCTION_MARKERS.join("\n"), "x".repeat(250));
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&echo)))
        .mount(&server)
        .await;

    let generator = generator_for(&server).await;
    assert!(matches!(
        generator.try_generate("quarterly revenue").await,
        Err(GenerationFailure::Malformed(_))
    ));
    let widget = generator.generate_widget("quarterly revenue").await;
    assert_eq!(widget.title(), "Revenue by Quarter");

    let garbage = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("no chart for you")))
        .mount(&garbage)
        .await;
    let generator = generator_for(&garbage).await;
    let widget = generator.generate_widget("units by category").await;
    assert_eq!(widget.title(), "Units by Category");
}

#[tokio::test]
async fn test_echoed_instructions_with_trailing_json() {
    let server = MockServer::start().await;
    let content = format!(
        "{}\n{}",
        system_message(),
        r#"{"chartType":"area","labels":["Q3","Q4"],"values":[20800,23900]}"#
    );
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&content)))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator_for(&server).await;
    let widget = generator.generate_widget("quarterly revenue").await;
    let chart = widget.as_chart().expect("chart widget");
    assert_eq!(chart.chart_type, ChartType::Area);
    assert_eq!(chart.labels, vec!["Q3", "Q4"]);
    assert_eq!(chart.values, vec![20800.0, 23900.0]);
}

#[tokio::test]
async fn test_no_key_never_calls_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        api_key: None,
        base_url: format!("{}/v1", server.uri()),
        ..Config::default()
    };
    let generator = WidgetGenerator::from_config(&config);
    assert!(!generator.is_configured());

    let widget = generator.generate_widget("compare sales").await;
    let chart = widget.as_chart().expect("chart widget");
    assert_eq!(chart.values.iter().sum::<f64>(), 140900.0);
}

#[tokio::test]
async fn test_dashboard_flow() {
    let mut dashboard = Dashboard::new(WidgetGenerator::fallback_only()).in_section("sales");

    assert_eq!(
        dashboard.add_widget_from_prompt("").await.unwrap_err(),
        DashboardError::EmptyPrompt
    );

    dashboard
        .add_widget_from_prompt("show a table of regional data")
        .await
        .unwrap();
    dashboard
        .add_widget_from_prompt("revenue donut for product d")
        .await
        .unwrap();

    let kinds: Vec<WidgetKind> = dashboard.widgets().map(|w| w.kind()).collect();
    assert_eq!(kinds, vec![WidgetKind::Table, WidgetKind::Chart]);
    assert!(dashboard.widgets().all(|w| w.section_id() == Some("sales")));

    dashboard.remove_widget(0).unwrap();
    assert_eq!(dashboard.len(), 1);
    dashboard.clear();
    assert!(dashboard.is_empty());
}
