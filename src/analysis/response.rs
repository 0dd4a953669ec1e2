//! Recovery of structured results from model output
//!
//! Models are asked for bare JSON but frequently wrap it in a fenced code
//! block, sometimes after an explanatory block. The whole reply is tried
//! first, then the span between the outermost fences (string values may
//! carry fences of their own), then every fenced block, last one first.

use super::types::{AnalysisReport, GeneratedPipeline};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid field value: {0}")]
    InvalidField(String),
}

fn fence_tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"^(?i:json)?[ \t]*\r?\n?").expect("fence tag pattern compiles")
    })
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"```(?i:json)?[ \t]*\r?\n?([\s\S]*?)```").expect("fence pattern compiles")
    })
}

fn missing_field_regex() -> &'static Regex {
    static MISSING: OnceLock<Regex> = OnceLock::new();
    MISSING.get_or_init(|| {
        Regex::new(r"missing field `([^`]+)`").expect("missing field pattern compiles")
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Body between the first opening fence and the last closing fence
fn outermost_fence(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    let body = &after[fence_tag_regex().find(after).map_or(0, |m| m.end())..];
    let close = body.rfind("```")?;
    Some(&body[..close])
}

fn as_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Extracts the JSON object carried by a model reply
pub fn extract_json(text: &str) -> Result<Map<String, Value>, ParseError> {
    let candidate = text.trim();
    let whole = match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => return Ok(map),
        other => other,
    };

    if let Some(map) = outermost_fence(text).and_then(as_object) {
        return Ok(map);
    }

    let fenced: Vec<&str> = fence_regex()
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    if let Some(map) = fenced.iter().rev().find_map(|block| as_object(block)) {
        debug!("Using one of {} fenced blocks", fenced.len());
        return Ok(map);
    }

    match whole {
        Ok(other) => Err(ParseError::NotAnObject(kind_of(&other))),
        Err(e) => {
            warn!("Model reply is not valid JSON: {}", e);
            Err(ParseError::InvalidJson(format!(
                "{}: {}",
                e,
                candidate.chars().take(100).collect::<String>()
            )))
        }
    }
}

fn deserialize<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, ParseError> {
    serde_json::from_value(Value::Object(map)).map_err(|e| {
        let message = e.to_string();
        match missing_field_regex().captures(&message) {
            Some(captures) => ParseError::MissingField(captures[1].to_string()),
            None => ParseError::InvalidField(message),
        }
    })
}

pub fn parse_analysis(text: &str) -> Result<AnalysisReport, ParseError> {
    let map = extract_json(text)?;
    let report: AnalysisReport = deserialize(map)?;
    debug!(
        "Parsed analysis with {} tech items and {} steps",
        report.project_analysis.tech_stack.len(),
        report.ci_pipeline_steps.len()
    );
    Ok(report)
}

pub fn parse_pipeline(text: &str) -> Result<GeneratedPipeline, ParseError> {
    let map = extract_json(text)?;
    deserialize(map)
}
