pub mod config;
pub mod dashboard;
pub mod defaults;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod prompt_parser;
pub mod prompts;
pub mod response_repair;
pub mod sample_data;
pub mod widget;
pub mod widget_generator;

pub use config::Config;
pub use dashboard::{Dashboard, DashboardEntry};
pub use defaults::default_widgets;
pub use error::{ConfigError, DashboardError, GenerationFailure, LlmError, RepairError};
pub use fallback::build_widget;
pub use llm::{CompletionClient, CompletionRequest, LlmClient};
pub use prompt_parser::{parse_prompt, Intent};
pub use response_repair::repair_chart_response;
pub use widget::{
    Cell, ChartType, ChartWidget, DataField, DataSource, TableWidget, Widget, WidgetKind,
};
pub use widget_generator::WidgetGenerator;
