//! JSON parsing helpers for AI backend responses
//!
//! Models wrap their JSON in prose, code fences or apologies. These helpers
//! pull out the first balanced JSON object and decode it strictly: a value of
//! the wrong type or outside its range is an error, never a silent default.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{CravingPrediction, RiskLevel};

/// Truncate long responses for error messages
fn preview(text: &str) -> String {
    if text.chars().count() > 200 {
        format!("{}...", text.chars().take(200).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Find the first balanced `{...}` object in free text
///
/// Braces inside JSON string literals (including escaped quotes) do not count
/// toward the nesting depth.
pub fn extract_json_object(text: &str) -> Result<&str> {
    let start = text.find('{').ok_or_else(|| {
        Error::InvalidData(format!(
            "No JSON found in AI response | Raw: {}",
            preview(text)
        ))
    })?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    Err(Error::InvalidData(format!(
        "Unbalanced JSON object in AI response | Raw: {}",
        preview(text)
    )))
}

/// Wire shape of a craving prediction before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrediction {
    risk_level: String,
    time_until_craving: f64,
    reason: String,
    prevention: Vec<String>,
    confidence: f64,
}

/// Decode a craving prediction from a model response
pub fn parse_craving_prediction(response: &str) -> Result<CravingPrediction> {
    let json_str = extract_json_object(response.trim())?;

    let raw: RawPrediction = serde_json::from_str(json_str).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid prediction JSON from AI: {} | Raw: {}",
            e,
            preview(json_str)
        ))
    })?;

    let risk_level: RiskLevel = raw.risk_level.parse().map_err(Error::InvalidData)?;

    if !raw.time_until_craving.is_finite() || raw.time_until_craving <= 0.0 {
        return Err(Error::InvalidData(format!(
            "timeUntilCraving must be a positive number of hours, got {}",
            raw.time_until_craving
        )));
    }

    let reason = raw.reason.trim().to_string();
    if reason.is_empty() {
        return Err(Error::InvalidData("Prediction reason is empty".into()));
    }

    let prevention: Vec<String> = raw
        .prevention
        .into_iter()
        .map(|tip| tip.trim().to_string())
        .filter(|tip| !tip.is_empty())
        .collect();
    if prevention.is_empty() {
        return Err(Error::InvalidData("Prediction has no prevention tips".into()));
    }

    if raw.confidence.fract() != 0.0 || !(0.0..=100.0).contains(&raw.confidence) {
        return Err(Error::InvalidData(format!(
            "confidence must be an integer 0-100, got {}",
            raw.confidence
        )));
    }

    Ok(CravingPrediction {
        risk_level,
        time_until_craving: raw.time_until_craving,
        reason,
        prevention,
        confidence: raw.confidence as u8,
    })
}
