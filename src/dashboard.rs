//! In-memory widget board.

use crate::defaults::default_widgets;
use crate::error::DashboardError;
use crate::widget::{Widget, WidgetKind};
use crate::widget_generator::WidgetGenerator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    pub widget: Widget,
    pub created_at: DateTime<Utc>,
    /// Empty for widgets that did not come from a prompt (defaults).
    pub prompt: String,
}

pub struct Dashboard {
    generator: WidgetGenerator,
    section_id: Option<String>,
    entries: Vec<DashboardEntry>,
}

impl Dashboard {
    pub fn new(generator: WidgetGenerator) -> Self {
        Self {
            generator,
            section_id: None,
            entries: Vec::new(),
        }
    }

    /// A dashboard pre-populated with [`default_widgets`].
    pub fn with_defaults(generator: WidgetGenerator) -> Self {
        let mut dashboard = Self::new(generator);
        let now = Utc::now();
        dashboard.entries = default_widgets()
            .into_iter()
            .map(|widget| DashboardEntry {
                widget,
                created_at: now,
                prompt: String::new(),
            })
            .collect();
        dashboard
    }

    /// Section id stamped on every widget added from now on.
    pub fn in_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub async fn add_widget_from_prompt(
        &mut self,
        prompt: &str,
    ) -> Result<&Widget, DashboardError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(DashboardError::EmptyPrompt);
        }

        let mut widget = self.generator.generate_widget(prompt).await;
        widget.assign(Uuid::new_v4().to_string(), self.section_id.clone());

        if widget.title().trim().is_empty() {
            let label = match widget.kind() {
                WidgetKind::Chart => "Chart",
                WidgetKind::Table => "Table",
            };
            widget.set_title(format!("{} {}", label, self.entries.len() + 1));
        }

        info!("Added widget '{}' from prompt", widget.title());

        self.entries.push(DashboardEntry {
            widget,
            created_at: Utc::now(),
            prompt: prompt.to_string(),
        });

        let index = self.entries.len() - 1;
        Ok(&self.entries[index].widget)
    }

    pub fn remove_widget(&mut self, index: usize) -> Result<Widget, DashboardError> {
        if index >= self.entries.len() {
            return Err(DashboardError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index).widget)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.entries.iter().map(|entry| &entry.widget)
    }

    pub fn entries(&self) -> &[DashboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let mut dashboard = Dashboard::new(WidgetGenerator::fallback_only());
        let err = dashboard.add_widget_from_prompt("   ").await.unwrap_err();
        assert_eq!(err, DashboardError::EmptyPrompt);
        assert_eq!(err.to_string(), "Please enter a prompt");
        assert!(dashboard.is_empty());
    }

    #[tokio::test]
    async fn test_add_assigns_identity() {
        let mut dashboard = Dashboard::new(WidgetGenerator::fallback_only()).in_section("main");

        let first = dashboard
            .add_widget_from_prompt("  sales by region  ")
            .await
            .unwrap()
            .clone();
        let second = dashboard.add_widget_from_prompt("sales by region").await.unwrap().clone();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.section_id(), Some("main"));
        assert_eq!(dashboard.entries()[0].prompt, "sales by region");
        assert_eq!(dashboard.len(), 2);
    }

    struct BlankTitleClient;

    #[async_trait::async_trait]
    impl crate::llm::CompletionClient for BlankTitleClient {
        async fn complete(
            &self,
            _request: &crate::llm::CompletionRequest,
        ) -> Result<String, crate::error::LlmError> {
            Ok(r#"{"labels":["A"],"values":[1],"title":"  "}"#.to_string())
        }
    }

    #[tokio::test]
    async fn test_blank_title_is_numbered() {
        let generator = WidgetGenerator::with_client(std::sync::Arc::new(BlankTitleClient));
        let mut dashboard = Dashboard::new(generator);
        dashboard.add_widget_from_prompt("first").await.unwrap();
        let widget = dashboard.add_widget_from_prompt("second").await.unwrap();
        assert_eq!(widget.title(), "Chart 2");
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let mut dashboard = Dashboard::with_defaults(WidgetGenerator::fallback_only());
        assert_eq!(dashboard.len(), 11);

        let removed = dashboard.remove_widget(0).unwrap();
        assert_eq!(removed.id(), Some("default-1"));
        assert_eq!(dashboard.widgets().next().and_then(Widget::id), Some("default-2"));

        assert_eq!(
            dashboard.remove_widget(10),
            Err(DashboardError::IndexOutOfRange { index: 10, len: 10 })
        );

        dashboard.clear();
        assert!(dashboard.is_empty());
    }
}
