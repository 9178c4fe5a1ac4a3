//! Prompt -> widget, through the completion service when one is configured and
//! through the keyword fallback otherwise.

use crate::config::{Config, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::error::GenerationFailure;
use crate::fallback;
use crate::llm::{ChatMessage, CompletionClient, CompletionRequest, LlmClient};
use crate::prompt_parser::parse_prompt;
use crate::prompts;
use crate::response_repair::repair_chart_response;
use crate::widget::{Widget, WidgetKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct WidgetGenerator {
    client: Option<Arc<dyn CompletionClient>>,
    temperature: f64,
    max_tokens: u32,
}

impl Default for WidgetGenerator {
    fn default() -> Self {
        Self::fallback_only()
    }
}

impl WidgetGenerator {
    /// A generator that never calls out.
    pub fn fallback_only() -> Self {
        Self {
            client: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_client(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client: Some(client),
            ..Self::fallback_only()
        }
    }

    /// Uses an [`LlmClient`] when the config carries an API key.
    pub fn from_config(config: &Config) -> Self {
        let generator = match &config.api_key {
            Some(key) => {
                let build =
                    || LlmClient::new(key.clone(), config.base_url.clone(), config.model.clone());
                let client = match config.timeout_secs {
                    Some(secs) => build()
                        .with_timeout(Duration::from_secs(secs))
                        .unwrap_or_else(|e| {
                            warn!("Could not apply request timeout, continuing without one: {}", e);
                            build()
                        }),
                    None => build(),
                };
                Self::with_client(Arc::new(client))
            }
            None => Self::fallback_only(),
        };
        generator.with_sampling(config.temperature, config.max_tokens)
    }

    pub fn with_sampling(mut self, temperature: f64, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn chart_request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                ChatMessage::system(prompts::system_message()),
                ChatMessage::user(prompts::user_message(prompt)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_object: true,
        }
    }

    /// One completion call, no retry. Only charts come back from this path.
    pub async fn try_generate(&self, prompt: &str) -> Result<Widget, GenerationFailure> {
        let client = self.client.as_ref().ok_or(GenerationFailure::NotConfigured)?;

        let raw = client.complete(&self.chart_request(prompt)).await?;
        let chart = repair_chart_response(&raw)?;

        Ok(Widget::Chart(chart))
    }

    /// Always returns a widget. Failures are logged and answered by the fallback builder.
    pub async fn generate_widget(&self, prompt: &str) -> Widget {
        let intent = parse_prompt(prompt);
        debug!("Parsed intent: {:?}", intent);

        // the completion schema only describes charts
        if intent.widget_type == WidgetKind::Table {
            return fallback::build_widget(prompt, &intent);
        }

        match self.try_generate(prompt).await {
            Ok(widget) => widget,
            Err(GenerationFailure::NotConfigured) => {
                info!("No API key configured, using fallback parser with sample data");
                fallback::build_widget(prompt, &intent)
            }
            Err(failure) => {
                warn!("LLM generation failed, using fallback: {}", failure);
                fallback::build_widget(prompt, &intent)
            }
        }
    }

    pub async fn generate_widget_from_prompt(&self, prompt: &str) -> Widget {
        self.generate_widget(prompt).await
    }
}
