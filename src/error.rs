use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

/// Failures talking to the completion service.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM API call failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("LLM API error: {0}")]
    Api(String),

    #[error("Unexpected LLM response: {0}")]
    UnexpectedResponse(String),

    #[error("LLM response was filtered by content policy")]
    ContentFiltered,
}

/// Reasons a model response could not be turned into a chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepairError {
    #[error("response echoed the system instructions instead of data")]
    EchoedInstructions,

    #[error("no JSON object found in response")]
    NoJson,

    #[error("invalid JSON in response: {0}")]
    InvalidJson(String),

    #[error("invalid chart data structure: {0}")]
    InvalidShape(String),

    #[error("labels and values differ in length ({labels} vs {values})")]
    LengthMismatch { labels: usize, values: usize },
}

/// Why the completion path did not produce a widget. Always recovered by the fallback builder.
#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error("no API key configured")]
    NotConfigured,

    #[error("completion request failed: {0}")]
    Transport(#[from] LlmError),

    #[error("malformed completion response: {0}")]
    Malformed(#[from] RepairError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Please enter a prompt")]
    EmptyPrompt,

    #[error("No widget at index {index} (dashboard has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
