use crate::report::model::AnalysisRecord;

/// Canonical JSON export of a record.
///
/// Two-space indentation, keys in `AnalysisRecord` field order. Identical
/// records always produce identical bytes.
pub fn render_export(record: &AnalysisRecord) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::Scores;

    fn sample() -> AnalysisRecord {
        AnalysisRecord {
            summary: "ok".into(),
            strengths: vec![],
            issues: vec!["x".into()],
            suggestions: vec![],
            scores: Scores {
                security: 100,
                structure_readability: 0,
                space_performance_optimization: 50,
            },
        }
    }

    #[test]
    fn export_has_stable_layout() {
        let bytes = render_export(&sample()).unwrap();

        let expected = r#"{
  "summary": "ok",
  "strengths": [],
  "issues": [
    "x"
  ],
  "suggestions": [],
  "scores": {
    "security": 100,
    "structure_readability": 0,
    "space_performance_optimization": 50
  }
}"#;
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn export_is_deterministic() {
        let record = sample();
        let first = render_export(&record).unwrap();
        let second = render_export(&record).unwrap();
        let from_clone = render_export(&record.clone()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, from_clone);
    }

    #[test]
    fn export_reads_back_as_the_same_record() {
        let record = sample();
        let bytes = render_export(&record).unwrap();

        let back: AnalysisRecord = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, record);
    }
}
