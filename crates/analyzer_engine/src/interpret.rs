use serde::Deserialize;
use serde_json::Value;

use crate::{AnalysisReport, MalformedResponse};

/// Summary used when the service omits one.
pub const NO_SUMMARY: &str = "No summary provided";

/// Success envelope returned by the analysis service.
#[derive(Debug, Deserialize)]
struct RawServerPayload {
    result: String,
}

/// Interpret a full 2xx response body: `{"result": "<text embedding a JSON object>"}`.
pub fn interpret_payload(body: &str) -> Result<AnalysisReport, MalformedResponse> {
    let payload: RawServerPayload =
        serde_json::from_str(body).map_err(|err| MalformedResponse::InvalidEnvelope {
            message: err.to_string(),
        })?;
    interpret_result(&payload.result)
}

/// Interpret the `result` text: extract the embedded object and map its fields.
pub fn interpret_result(text: &str) -> Result<AnalysisReport, MalformedResponse> {
    let raw = extract_embedded_json(text).ok_or(MalformedResponse::NoJsonObject)?;
    let value: Value =
        serde_json::from_str(raw).map_err(|err| MalformedResponse::InvalidJson {
            raw: raw.to_string(),
            message: err.to_string(),
        })?;

    let match_percentage = match value.get("match_score") {
        None | Some(Value::Null) => return Err(MalformedResponse::MissingMatchScore),
        Some(score) => score.as_f64().ok_or(MalformedResponse::InvalidMatchScore)?,
    };

    // Non-string entries are dropped rather than failing the whole analysis.
    let missing_keywords = match value.get("missing_keywords") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(ToOwned::to_owned)
            .collect(),
        _ => Vec::new(),
    };

    let improvement_summary = value
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or(NO_SUMMARY)
        .to_string();

    Ok(AnalysisReport {
        match_percentage,
        missing_keywords,
        improvement_summary,
    })
}

/// Span from the first `{` to the last `}`, inclusive.
///
/// Greedy on purpose: nested objects survive, but a stray `}` in trailing
/// prose is swallowed into the span.
pub fn extract_embedded_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
