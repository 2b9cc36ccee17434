//! Page layout for the printable report.
//!
//! Layout is computed in millimetres on an A4 page with the origin at the
//! top-left corner and `y` growing downwards. The PDF writer converts to
//! points when serializing.
//!
//! Two passes over an in-memory page list:
//!
//! 1. Content: the heading, then each section placed whole, top to bottom,
//!    breaking to a new page when the cursor passes the bottom threshold.
//! 2. Footer: once the page count is final, the footer is stamped on every
//!    page.

use tracing::debug;

use crate::report::model::AnalysisRecord;

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

pub const MARGIN_LEFT: f64 = 15.0;
pub const MARGIN_TOP: f64 = 20.0;
pub const CONTENT_WIDTH: f64 = 180.0;

/// Cursor position past which the next section goes on a new page.
pub const BREAK_THRESHOLD: f64 = 260.0;
pub const FOOTER_Y: f64 = 290.0;

pub const HEADER_BAR_HEIGHT: f64 = 8.0;
pub const HEADER_TEXT_INSET: f64 = 2.0;
pub const HEADER_BASELINE: f64 = 6.0;
pub const HEADER_ADVANCE: f64 = 12.0;
pub const HEADER_FILL_GRAY: u8 = 240;
pub const LINE_HEIGHT: f64 = 6.0;
pub const SECTION_GAP: f64 = 6.0;

pub const LOGO_X: f64 = MARGIN_LEFT;
pub const LOGO_Y: f64 = 8.0;
pub const LOGO_WIDTH: f64 = 30.0;
pub const LOGO_HEIGHT: f64 = 15.0;
pub const TITLE_X: f64 = MARGIN_LEFT + 40.0;

pub const TITLE_SIZE: f64 = 18.0;
pub const SUBTITLE_SIZE: f64 = 10.0;
pub const HEADER_SIZE: f64 = 12.0;
pub const BODY_SIZE: f64 = 10.0;
pub const FOOTER_SIZE: f64 = 9.0;

/// Courier advance width, as a fraction of the font size.
const COURIER_ADVANCE: f64 = 0.6;
const MM_PER_PT: f64 = 25.4 / 72.0;

pub const EMPTY_PLACEHOLDER: &str = "—";
pub const DEFAULT_TITLE: &str = "AI Code Review Report";
pub const DEFAULT_FOOTER: &str = "Generated by revu";

/// Standard PDF fonts used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    /// Fixed pitch; body text is wrapped by character count.
    Courier,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        gray: u8,
    },
    /// `y` is the text baseline.
    Text {
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        text: String,
    },
    /// Draws the branding image; `y` is the top edge.
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    #[cfg(test)]
    pub(crate) fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Caller-controlled document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    pub title: String,
    /// Small lines under the title (date, source name).
    pub subtitle: Vec<String>,
    pub footer: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: Vec::new(),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}

/// One titled block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub body: String,
}

/// Report sections in their fixed order.
pub fn sections(record: &AnalysisRecord) -> Vec<Section> {
    let score = |value: u8| format!("{value}/100");
    let list = |items: &[String]| {
        if items.is_empty() {
            EMPTY_PLACEHOLDER.to_string()
        } else {
            items.join("\n")
        }
    };
    let summary = if record.summary.is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        record.summary.clone()
    };

    vec![
        Section {
            title: "Summary",
            body: summary,
        },
        Section {
            title: "Security Score",
            body: score(record.scores.security),
        },
        Section {
            title: "Structure & Readability Score",
            body: score(record.scores.structure_readability),
        },
        Section {
            title: "Space/Performance Optimization Score",
            body: score(record.scores.space_performance_optimization),
        },
        Section {
            title: "Strengths",
            body: list(&record.strengths),
        },
        Section {
            title: "Issues",
            body: list(&record.issues),
        },
        Section {
            title: "Suggestions",
            body: list(&record.suggestions),
        },
    ]
}

/// Number of fixed-pitch characters that fit in `width` millimetres.
pub fn chars_per_line(width: f64, font_size: f64) -> usize {
    let advance = COURIER_ADVANCE * font_size * MM_PER_PT;
    ((width / advance).floor() as usize).max(1)
}

/// Word-wrap `text` to `width` millimetres of fixed-pitch text.
///
/// Explicit newlines always break. Words longer than a line are split
/// across lines. Every paragraph yields at least one line.
pub fn wrap_text(text: &str, width: f64, font_size: f64) -> Vec<String> {
    let max = chars_per_line(width, font_size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();

            if word_len > max {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max).peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        lines.push(chunk.iter().collect());
                    } else {
                        current = chunk.iter().collect();
                        current_len = chunk.len();
                    }
                }
                continue;
            }

            if current_len == 0 {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_len = word_len;
            }
        }

        lines.push(current);
    }

    lines
}

/// Lay the record out across as many pages as it needs.
///
/// `with_logo` reserves the branding slot on the first page.
pub fn lay_out(record: &AnalysisRecord, options: &DocumentOptions, with_logo: bool) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut y = MARGIN_TOP;

    let first = &mut pages[0];
    if with_logo {
        first.ops.push(DrawOp::Image {
            x: LOGO_X,
            y: LOGO_Y,
            width: LOGO_WIDTH,
            height: LOGO_HEIGHT,
        });
    }
    first.ops.push(DrawOp::Text {
        x: TITLE_X,
        y,
        font: Font::HelveticaBold,
        size: TITLE_SIZE,
        text: options.title.clone(),
    });
    y += 10.0;
    for line in &options.subtitle {
        first.ops.push(DrawOp::Text {
            x: TITLE_X,
            y,
            font: Font::Helvetica,
            size: SUBTITLE_SIZE,
            text: line.clone(),
        });
        y += LINE_HEIGHT;
    }
    y += LINE_HEIGHT;

    let sections = sections(record);
    let last = sections.len() - 1;

    for (i, section) in sections.iter().enumerate() {
        let lines = wrap_text(&section.body, CONTENT_WIDTH, BODY_SIZE);
        let current = pages.len() - 1;
        let page = &mut pages[current];

        page.ops.push(DrawOp::FillRect {
            x: MARGIN_LEFT,
            y,
            width: CONTENT_WIDTH,
            height: HEADER_BAR_HEIGHT,
            gray: HEADER_FILL_GRAY,
        });
        page.ops.push(DrawOp::Text {
            x: MARGIN_LEFT + HEADER_TEXT_INSET,
            y: y + HEADER_BASELINE,
            font: Font::HelveticaBold,
            size: HEADER_SIZE,
            text: section.title.to_string(),
        });
        y += HEADER_ADVANCE;

        for (n, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            page.ops.push(DrawOp::Text {
                x: MARGIN_LEFT,
                y: y + n as f64 * LINE_HEIGHT,
                font: Font::Courier,
                size: BODY_SIZE,
                text: line.clone(),
            });
        }
        y += lines.len() as f64 * LINE_HEIGHT + SECTION_GAP;

        if y > BREAK_THRESHOLD && i < last {
            debug!(
                after = section.title,
                page = pages.len() + 1,
                "starting new report page"
            );
            pages.push(Page::default());
            y = MARGIN_TOP;
        }
    }

    for page in &mut pages {
        page.ops.push(DrawOp::Text {
            x: MARGIN_LEFT,
            y: FOOTER_Y,
            font: Font::Helvetica,
            size: FOOTER_SIZE,
            text: options.footer.clone(),
        });
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::Scores;

    fn short_record() -> AnalysisRecord {
        AnalysisRecord {
            summary: "Readable and small.".into(),
            strengths: vec!["clear names".into()],
            issues: vec![],
            suggestions: vec!["add tests".into()],
            scores: Scores {
                security: 70,
                structure_readability: 80,
                space_performance_optimization: 90,
            },
        }
    }

    fn section_titles(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text {
                    font: Font::HelveticaBold,
                    size,
                    text,
                    ..
                } if *size == HEADER_SIZE => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn body_width_fits_85_courier_characters() {
        assert_eq!(chars_per_line(CONTENT_WIDTH, BODY_SIZE), 85);
    }

    #[test]
    fn wrap_respects_width_and_newlines() {
        let lines = wrap_text("aaa bbb ccc\nddd", 8.0 * 2.1167, 10.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc", "ddd"]);
    }

    #[test]
    fn wrap_breaks_long_words() {
        let width = 4.0 * 2.1167;
        let lines = wrap_text("abcdefghij xy", width, 10.0);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);

        let lines = wrap_text("ab abcdefghij", width, 10.0);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_keeps_blank_paragraphs() {
        let lines = wrap_text("one\n\ntwo", CONTENT_WIDTH, BODY_SIZE);
        assert_eq!(lines, vec!["one", "", "two"]);
        assert_eq!(wrap_text("", CONTENT_WIDTH, BODY_SIZE), vec![""]);
    }

    #[test]
    fn sections_in_fixed_order_with_placeholders() {
        let sections = sections(&AnalysisRecord::default());
        let titles: Vec<&str> = sections.iter().map(|s| s.title).collect();

        assert_eq!(
            titles,
            vec![
                "Summary",
                "Security Score",
                "Structure & Readability Score",
                "Space/Performance Optimization Score",
                "Strengths",
                "Issues",
                "Suggestions",
            ]
        );
        assert_eq!(sections[0].body, EMPTY_PLACEHOLDER);
        assert_eq!(sections[1].body, "0/100");
        assert_eq!(sections[6].body, EMPTY_PLACEHOLDER);
    }

    #[test]
    fn list_sections_join_items_with_newlines() {
        let record = AnalysisRecord {
            issues: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert_eq!(sections(&record)[5].body, "a\nb");
    }

    #[test]
    fn short_record_fits_one_page() {
        let pages = lay_out(&short_record(), &DocumentOptions::default(), false);

        assert_eq!(pages.len(), 1);
        assert_eq!(section_titles(&pages).len(), 7);
        assert!(pages[0].texts().any(|t| t == DEFAULT_TITLE));
    }

    #[test]
    fn cursor_advances_by_header_lines_and_gap() {
        let options = DocumentOptions {
            subtitle: vec!["Date: today".into()],
            ..Default::default()
        };
        let pages = lay_out(&short_record(), &options, false);

        let bars: Vec<f64> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { y, .. } => Some(*y),
                _ => None,
            })
            .collect();

        // Title 20, subtitle 30, first section 42; each one-line section
        // takes 12 + 6 + 6.
        assert_eq!(bars[0], 42.0);
        assert_eq!(bars[1], 66.0);
        assert_eq!(bars[2], 90.0);
    }

    #[test]
    fn long_record_spans_pages_with_footer_on_each() {
        let record = AnalysisRecord {
            summary: "word ".repeat(2000),
            issues: (0..30).map(|i| format!("issue number {i}")).collect(),
            ..short_record()
        };

        let pages = lay_out(&record, &DocumentOptions::default(), false);

        assert!(pages.len() > 1, "expected several pages, got {}", pages.len());
        for page in &pages {
            match page.ops.last() {
                Some(DrawOp::Text { y, text, .. }) => {
                    assert_eq!(*y, FOOTER_Y);
                    assert_eq!(text, DEFAULT_FOOTER);
                }
                other => panic!("page does not end with footer: {other:?}"),
            }
            assert_eq!(page.texts().filter(|t| *t == DEFAULT_FOOTER).count(), 1);
        }
    }

    #[test]
    fn sections_are_never_split() {
        let record = AnalysisRecord {
            issues: (0..40).map(|i| format!("issue {i}")).collect(),
            ..short_record()
        };

        let pages = lay_out(&record, &DocumentOptions::default(), false);
        assert_eq!(section_titles(&pages).len(), 7);

        let issues_page = pages
            .iter()
            .position(|p| p.texts().any(|t| t == "Issues"))
            .unwrap();
        let last_issue_page = pages
            .iter()
            .position(|p| p.texts().any(|t| t == "issue 39"))
            .unwrap();
        assert_eq!(issues_page, last_issue_page);
    }

    #[test]
    fn break_moves_next_section_to_page_top() {
        let record = AnalysisRecord {
            summary: "line\n".repeat(40),
            ..short_record()
        };

        let pages = lay_out(&record, &DocumentOptions::default(), false);
        assert!(pages.len() >= 2);

        let first_bar = pages[1].ops.iter().find_map(|op| match op {
            DrawOp::FillRect { y, .. } => Some(*y),
            _ => None,
        });
        assert_eq!(first_bar, Some(MARGIN_TOP));
        assert!(pages[1].texts().any(|t| t == "Security Score"));
    }

    #[test]
    fn no_trailing_blank_page() {
        let record = AnalysisRecord {
            suggestions: (0..45).map(|i| format!("s{i}")).collect(),
            ..short_record()
        };

        let pages = lay_out(&record, &DocumentOptions::default(), false);
        let last = pages.last().unwrap();
        assert!(last.texts().any(|t| t == "Suggestions"));
    }

    #[test]
    fn logo_slot_only_when_requested() {
        let has_image = |pages: &[Page]| {
            pages
                .iter()
                .flat_map(|p| p.ops.iter())
                .any(|op| matches!(op, DrawOp::Image { .. }))
        };

        let options = DocumentOptions::default();
        assert!(has_image(&lay_out(&short_record(), &options, true)));
        assert!(!has_image(&lay_out(&short_record(), &options, false)));
    }
}
