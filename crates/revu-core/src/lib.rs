pub mod error;
pub mod report;
pub mod response;
pub mod source;
pub mod upstream;

pub use error::ReviewError;
pub use report::model::AnalysisRecord;
pub use response::normalize;

use tracing::info;

use upstream::gemini::GeminiClient;
use upstream::prompt::build_prompt;
use upstream::transport::Transport;

pub const TOOL_NAME: &str = "revu";

/// Review one piece of source code.
///
/// Blank input is rejected before the model is called. The model's reply
/// goes through [`normalize`], so the returned record always satisfies
/// the record invariants.
pub fn review<T: Transport>(
    client: &GeminiClient<T>,
    code: &str,
) -> Result<AnalysisRecord, ReviewError> {
    if code.trim().is_empty() {
        return Err(ReviewError::EmptySource);
    }

    let raw = client.generate(&build_prompt(code))?;
    let record = normalize(&raw)?;

    info!(
        security = record.scores.security,
        readability = record.scores.structure_readability,
        performance = record.scores.space_performance_optimization,
        issues = record.issues.len(),
        "review complete"
    );

    Ok(record)
}
