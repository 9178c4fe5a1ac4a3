use anyhow::Result;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use promptboard::widget::format_number;
use promptboard::{default_widgets, parse_prompt, Config, Widget, WidgetGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "promptboard")]
#[command(about = "Turn a dashboard request into a chart or table widget")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a widget from a prompt
    Generate {
        /// e.g. "show profit trend for product b"
        prompt: String,

        /// Skip the completion service even if a key is configured
        #[arg(long)]
        fallback_only: bool,

        /// OpenAI API key (or set OPENAI_API_KEY env var)
        #[arg(long)]
        api_key: Option<String>,

        /// Model name (or set OPENAI_MODEL env var)
        #[arg(long)]
        model: Option<String>,

        /// API base URL (or set OPENAI_BASE_URL env var)
        #[arg(long)]
        base_url: Option<String>,

        /// Print the widget as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the intent the keyword parser extracts from a prompt
    Parse { prompt: String },

    /// List the default dashboard widgets
    Defaults {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            prompt,
            fallback_only,
            api_key,
            model,
            base_url,
            json,
        } => {
            let config = Config::from_env()?.with_overrides(api_key, model, base_url);
            let generator = if fallback_only {
                WidgetGenerator::fallback_only()
            } else {
                WidgetGenerator::from_config(&config)
            };

            info!("Prompt: {}", prompt);
            let widget = generator.generate_widget(&prompt).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&widget)?);
            } else {
                print_widget(&widget);
            }
        }
        Commands::Parse { prompt } => {
            let intent = parse_prompt(&prompt);
            println!("{}", serde_json::to_string_pretty(&intent)?);
        }
        Commands::Defaults { json } => {
            let widgets = default_widgets();
            if json {
                println!("{}", serde_json::to_string_pretty(&widgets)?);
            } else {
                for widget in &widgets {
                    print_widget(widget);
                    println!();
                }
            }
        }
    }

    Ok(())
}

fn print_widget(widget: &Widget) {
    match widget {
        Widget::Chart(chart) => {
            println!("=== {} ({} chart) ===", chart.title, chart.chart_type);
            if !chart.x_axis_label.is_empty() || !chart.y_axis_label.is_empty() {
                println!("{} / {}", chart.x_axis_label, chart.y_axis_label);
            }
            let width = chart.labels.iter().map(|l| l.len()).max().unwrap_or(0);
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                println!("  {:<width$}  {}", label, format_number(*value), width = width);
            }
        }
        Widget::Table(table) => {
            println!("=== {} ===", table.title);
            println!("{}", table.headers.iter().join(" | "));
            for row in &table.rows {
                println!("{}", row.iter().join(" | "));
            }
        }
    }
}
