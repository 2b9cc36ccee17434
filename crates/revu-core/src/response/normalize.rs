use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ReviewError;
use crate::report::model::AnalysisRecord;
use crate::response::coerce::{coerce_list, coerce_scores, coerce_summary};
use crate::response::extract::{extract_object, strip_fences};

/// Turn a raw model reply into a validated [`AnalysisRecord`].
///
/// Pipeline:
///
/// 1. Strip fenced-block markers.
/// 2. Slice to the outermost `{ ... }` span.
/// 3. Parse into an untyped tree. Failure here is terminal.
/// 4. Coerce every field through `response::coerce`, which never fails.
///
/// Either a fully populated record is returned or an error; there is no
/// partially populated result.
pub fn normalize(raw: &str) -> Result<AnalysisRecord, ReviewError> {
    if raw.trim().is_empty() {
        return Err(ReviewError::EmptyResponse);
    }

    let unfenced = strip_fences(raw);
    let span = extract_object(unfenced);

    if span.len() != raw.len() {
        debug!(
            raw_len = raw.len(),
            span_len = span.len(),
            "trimmed wrapper text around model reply"
        );
    }

    let parsed: Value = serde_json::from_str(span).map_err(|e| {
        warn!(error = %e, "model reply is not valid JSON");
        ReviewError::MalformedResponse(e.to_string())
    })?;

    let fields = match parsed {
        Value::Object(fields) => fields,
        other => {
            return Err(ReviewError::MalformedResponse(format!(
                "expected a JSON object, found {}",
                kind_of(&other)
            )));
        }
    };

    let record = AnalysisRecord {
        summary: coerce_summary(fields.get("summary")),
        strengths: coerce_list(fields.get("strengths")),
        issues: coerce_list(fields.get("issues")),
        suggestions: coerce_list(fields.get("suggestions")),
        scores: coerce_scores(fields.get("scores")),
    };

    debug!(
        strengths = record.strengths.len(),
        issues = record.issues.len(),
        suggestions = record.suggestions.len(),
        security = record.scores.security,
        readability = record.scores.structure_readability,
        performance = record.scores.space_performance_optimization,
        "normalized model reply"
    );

    Ok(record)
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
