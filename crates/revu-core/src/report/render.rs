use crate::TOOL_NAME;
use crate::report::layout::EMPTY_PLACEHOLDER;
use crate::report::model::{AnalysisRecord, ScoreBand};

/// Plain-text rendering for terminals.
pub fn render_text(record: &AnalysisRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, env!("CARGO_PKG_VERSION")));

    out.push_str("Scores:\n");
    for (label, score) in record.scores.labeled() {
        out.push_str(&format!(
            "  {:<12} {:>3}/100  {}\n",
            label,
            score,
            ScoreBand::of(score)
        ));
    }

    out.push_str("Summary:\n");
    let summary = if record.summary.is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        record.summary.as_str()
    };
    for line in summary.lines() {
        out.push_str(&format!("  {line}\n"));
    }

    push_list(&mut out, "Strengths", &record.strengths);
    push_list(&mut out, "Issues", &record.issues);
    push_list(&mut out, "Suggestions", &record.suggestions);
    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("{title}:\n"));
    if items.is_empty() {
        out.push_str("  None found.\n");
    }
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
}
