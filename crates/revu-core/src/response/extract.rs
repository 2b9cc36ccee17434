//! Locating the JSON object inside a raw model reply.
//!
//! Models frequently wrap their answer in a fenced code block or surround
//! it with a sentence or two of prose. Both are stripped here, before any
//! structural parsing happens.

const FENCE: &str = "```";

/// Strip a leading fenced-block marker (optionally tagged `json`, any case)
/// and a trailing closing marker.
///
/// Text that does not start with a fence is returned trimmed but otherwise
/// unchanged.
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let rest = rest.trim_start();

    rest.strip_suffix(FENCE).unwrap_or(rest)
}

/// Slice `text` to the span between the first `{` and the last `}`.
///
/// If either brace is missing, or they are out of order, the text is
/// returned as-is and the parser gets to report the problem.
pub fn extract_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if first < last => &text[first..=last],
        _ => text,
    }
}
