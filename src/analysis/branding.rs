use crate::models::{StrengthKind, StrengthScore};

pub const DEFAULT_STATEMENT: &str = "A passionate developer building world-class products";

pub fn statement_for(kind: StrengthKind) -> &'static str {
    match kind {
        StrengthKind::TechnicalDepth => {
            "An expert developer with deep technical knowledge across multiple domains"
        }
        StrengthKind::ExecutionSpeed => {
            "A high-velocity developer who ships quality code consistently"
        }
        StrengthKind::OpenSourceImpact => {
            "An influential open source contributor making a significant community impact"
        }
        StrengthKind::LearningSpeed => {
            "A fast learner who rapidly adapts to new technologies and challenges"
        }
    }
}

// Unknown names get the Technical Depth statement
pub fn statement_for_name(name: &str) -> &'static str {
    match StrengthKind::from_name(name) {
        Some(kind) => statement_for(kind),
        None => statement_for(StrengthKind::TechnicalDepth),
    }
}

/// Picks the tagline for the highest-scoring strength. The earliest entry
/// wins ties, so a pre-sorted list resolves to its first element.
pub fn generate_branding_statement(strengths: &[StrengthScore]) -> String {
    top_strength(strengths)
        .map(|s| statement_for_name(s.name()))
        .unwrap_or(DEFAULT_STATEMENT)
        .to_string()
}

fn top_strength(strengths: &[StrengthScore]) -> Option<&StrengthScore> {
    // Earliest entry wins ties
    strengths.iter().fold(None, |best, s| match best {
        Some(b) if b.score >= s.score => Some(b),
        _ => Some(s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(kind: StrengthKind, score: f64) -> StrengthScore {
        StrengthScore::new(kind, score, vec![])
    }

    #[test]
    fn test_technical_depth_statement() {
        let statement =
            generate_branding_statement(&[strength(StrengthKind::TechnicalDepth, 95.0)]);
        assert!(statement.contains("expert developer"));
        assert!(statement.contains("technical knowledge"));
    }

    #[test]
    fn test_execution_speed_statement() {
        let statement =
            generate_branding_statement(&[strength(StrengthKind::ExecutionSpeed, 90.0)]);
        assert!(statement.contains("high-velocity"));
        assert!(statement.contains("ships quality code"));
    }

    #[test]
    fn test_open_source_statement() {
        let statement =
            generate_branding_statement(&[strength(StrengthKind::OpenSourceImpact, 88.0)]);
        assert!(statement.contains("open source contributor"));
        assert!(statement.contains("community impact"));
    }

    #[test]
    fn test_learning_speed_statement() {
        let statement =
            generate_branding_statement(&[strength(StrengthKind::LearningSpeed, 92.0)]);
        assert!(statement.contains("fast learner"));
        assert!(statement.contains("rapidly adapts"));
    }

    #[test]
    fn test_empty_strengths() {
        assert!(generate_branding_statement(&[]).contains("passionate developer"));
    }

    #[test]
    fn test_unsorted_input_uses_highest_score() {
        let strengths = vec![
            strength(StrengthKind::TechnicalDepth, 20.0),
            strength(StrengthKind::LearningSpeed, 80.0),
            strength(StrengthKind::ExecutionSpeed, 80.0),
        ];
        assert_eq!(
            generate_branding_statement(&strengths),
            statement_for(StrengthKind::LearningSpeed)
        );
    }

    #[test]
    fn test_unknown_name_falls_back_to_technical_depth() {
        assert_eq!(
            statement_for_name("Charisma"),
            statement_for(StrengthKind::TechnicalDepth)
        );
        assert_eq!(
            statement_for_name("Open Source Impact"),
            statement_for(StrengthKind::OpenSourceImpact)
        );
    }
}
