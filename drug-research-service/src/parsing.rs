//! Lenient recovery of structured records from free-text LLM responses.
//!
//! Models frequently wrap their JSON in prose. These helpers scope the
//! response to the outermost JSON brackets and parse best-effort; callers
//! get an explicit empty result or error instead of a panic.

use crate::models::{DrugAnalysis, ExtractedDrugInfo};

/// Slice of `response` from the first `{` to the last `}`, if any.
fn object_slice(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (start <= end).then(|| &response[start..=end])
}

/// Slice of `response` from the first `[` to the last `]`, if any.
fn array_slice(response: &str) -> Option<&str> {
    let start = response.find('[')?;
    let end = response.rfind(']')?;
    (start <= end).then(|| &response[start..=end])
}

/// Parse structured prescription records out of an LLM response.
///
/// Accepts a JSON array of records or a single record object, with any
/// amount of surrounding prose. Returns an empty list when nothing parses.
pub fn parse_drug_details(response: &str) -> Vec<ExtractedDrugInfo> {
    if let Some(slice) = array_slice(response) {
        if let Ok(details) = serde_json::from_str::<Vec<ExtractedDrugInfo>>(slice) {
            return details;
        }
    }

    if let Some(slice) = object_slice(response) {
        if let Ok(detail) = serde_json::from_str::<ExtractedDrugInfo>(slice) {
            return vec![detail];
        }
    }

    Vec::new()
}

/// Parse the per-drug clinical analysis object out of an LLM response.
pub fn parse_drug_analysis(response: &str) -> anyhow::Result<DrugAnalysis> {
    let slice = object_slice(response)
        .ok_or_else(|| anyhow::anyhow!("no JSON object found in response"))?;
    let analysis = serde_json::from_str::<DrugAnalysis>(slice)
        .map_err(|e| anyhow::anyhow!("failed to parse analysis JSON: {e}"))?;
    Ok(analysis)
}

/// Truncate `text` to at most `max_chars` characters, on a char boundary.
pub fn clamp_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
