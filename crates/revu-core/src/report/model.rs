use serde::{Deserialize, Serialize};

/// Validated result of one code-review request.
///
/// This struct is the stable JSON contract of the export. Field order is
/// the serialized key order and must not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub summary: String,
    pub strengths: Vec<String>,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub scores: Scores,
}

/// Quality scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub security: u8,
    pub structure_readability: u8,
    pub space_performance_optimization: u8,
}

impl Scores {
    /// `(label, score)` pairs in display order.
    pub fn labeled(&self) -> [(&'static str, u8); 3] {
        [
            ("Security", self.security),
            ("Readability", self.structure_readability),
            ("Performance", self.space_performance_optimization),
        ]
    }
}

/// Coarse rating used when displaying a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        if score >= 75 {
            ScoreBand::Good
        } else if score >= 40 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        };
        f.write_str(s)
    }
}
