//! Turns raw completion text into a validated chart.
//!
//! Models do not always follow the "JSON only" instruction: some wrap the object in
//! a fenced block, some echo part of the system prompt first, a few return nothing
//! but the prompt. The pipeline below recovers what it can and reports the rest as
//! a [`RepairError`].

use crate::error::RepairError;
use crate::prompts::{CHART_GENERATION_SYSTEM_PROMPT, INSTRUCTION_MARKERS};
use crate::widget::{ChartType, ChartWidget};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

/// Responses at least this long that contain a marker and don't open with `{` are echoes.
const ECHO_MIN_LEN: usize = 200;
/// A marker plus an object starting past this offset means instructions precede the JSON.
const LEADING_TEXT_OFFSET: usize = 50;

lazy_static! {
    static ref CODE_FENCE: Option<Regex> = Regex::new(r"```(?:json)?\s*").ok();
}

pub fn repair_chart_response(raw: &str) -> Result<ChartWidget, RepairError> {
    let text = raw.trim();
    let has_marker = INSTRUCTION_MARKERS.iter().any(|m| text.contains(m));

    if has_marker {
        if let Some(value) = last_chart_object(text) {
            return chart_from_value(&value);
        }
        if text.len() > ECHO_MIN_LEN && !text.starts_with('{') {
            return Err(RepairError::EchoedInstructions);
        }
    }

    let text = if has_marker {
        match text.find('{') {
            Some(start) if start > LEADING_TEXT_OFFSET => balanced_object(&text[start..]),
            Some(_) => text,
            None => return Err(RepairError::NoJson),
        }
    } else {
        text
    };

    let cleaned = strip_code_fences(text);
    let parsed = parse_object(&cleaned)?;
    chart_from_value(&parsed)
}

/// The last top-level object with `labels` and `values` arrays that is not one of
/// the echoed instruction examples.
fn last_chart_object(text: &str) -> Option<Value> {
    let mut found = None;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('{') {
        let start = pos + offset;
        let candidate = balanced_object(&text[start..]);
        pos = start + candidate.len();

        if CHART_GENERATION_SYSTEM_PROMPT.contains(candidate) {
            continue;
        }
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            if has_chart_arrays(&value) {
                found = Some(value);
            }
        }
    }

    found
}

fn has_chart_arrays(value: &Value) -> bool {
    ["labels", "values"]
        .iter()
        .all(|key| value.get(*key).is_some_and(Value::is_array))
}

/// The object starting at the first byte of `text`, up to its matching close brace.
/// Unbalanced input is returned whole and left for the parser to reject.
fn balanced_object(text: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return &text[..=i];
                }
            }
            _ => {}
        }
    }
    text
}

fn strip_code_fences(text: &str) -> String {
    match CODE_FENCE.as_ref() {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

fn parse_object(text: &str) -> Result<Value, RepairError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(first) => {
            // Retry on the widest {...} span in case there is prose around it
            let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
                return Err(RepairError::InvalidJson(first.to_string()));
            };
            if end < start {
                return Err(RepairError::InvalidJson(first.to_string()));
            }
            serde_json::from_str(&text[start..=end])
                .map_err(|e| RepairError::InvalidJson(e.to_string()))
        }
    }
}

fn chart_from_value(value: &Value) -> Result<ChartWidget, RepairError> {
    let labels = value
        .get("labels")
        .and_then(Value::as_array)
        .ok_or_else(|| RepairError::InvalidShape("labels must be an array".to_string()))?;
    let values = value
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(|| RepairError::InvalidShape("values must be an array".to_string()))?;

    if labels.len() != values.len() {
        return Err(RepairError::LengthMismatch {
            labels: labels.len(),
            values: values.len(),
        });
    }

    let chart_type = value
        .get("chartType")
        .and_then(Value::as_str)
        .and_then(ChartType::from_name)
        .unwrap_or_default();

    Ok(ChartWidget {
        chart_type,
        labels: labels.iter().map(coerce_label).collect(),
        values: values.iter().map(coerce_number).collect(),
        title: non_empty_str(value, "title").unwrap_or("Chart").to_string(),
        x_axis_label: non_empty_str(value, "xAxisLabel").unwrap_or_default().to_string(),
        y_axis_label: non_empty_str(value, "yAxisLabel").unwrap_or_default().to_string(),
        id: None,
        section_id: None,
    })
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn coerce_label(label: &Value) -> String {
    match label {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numbers pass through, numeric strings are parsed, everything else is 0.
fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite()).unwrap_or(0.0)
}
