use serde::{Deserialize, Serialize};

/// Likelihood of award implied by the rubric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalBand {
    VeryLow,
    Low,
    Moderate,
    Good,
    Excellent,
}

impl ApprovalBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ApprovalBand::Excellent,
            65..=79 => ApprovalBand::Good,
            50..=64 => ApprovalBand::Moderate,
            35..=49 => ApprovalBand::Low,
            _ => ApprovalBand::VeryLow,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApprovalBand::Excellent => "Excellent (80-95%)",
            ApprovalBand::Good => "Good (60-80%)",
            ApprovalBand::Moderate => "Moderate (40-60%)",
            ApprovalBand::Low => "Low (20-40%)",
            ApprovalBand::VeryLow => "Very Low (<20%)",
        }
    }

    pub const fn overall_feedback(self) -> &'static str {
        match self {
            ApprovalBand::Excellent => {
                "Your application appears very strong! Make sure all documentation is complete."
            }
            ApprovalBand::Good => {
                "Your application has good potential. Address the weaknesses to improve chances."
            }
            ApprovalBand::Moderate => {
                "Your application needs improvement. Focus on addressing major weaknesses."
            }
            ApprovalBand::Low => {
                "Significant improvements needed. Consider partnering or waiting until better prepared."
            }
            ApprovalBand::VeryLow => {
                "Major issues need to be addressed. Consider seeking technical assistance."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(ApprovalBand::from_score(100), ApprovalBand::Excellent);
        assert_eq!(ApprovalBand::from_score(80), ApprovalBand::Excellent);
        assert_eq!(ApprovalBand::from_score(79), ApprovalBand::Good);
        assert_eq!(ApprovalBand::from_score(65), ApprovalBand::Good);
        assert_eq!(ApprovalBand::from_score(64), ApprovalBand::Moderate);
        assert_eq!(ApprovalBand::from_score(50), ApprovalBand::Moderate);
        assert_eq!(ApprovalBand::from_score(49), ApprovalBand::Low);
        assert_eq!(ApprovalBand::from_score(35), ApprovalBand::Low);
        assert_eq!(ApprovalBand::from_score(34), ApprovalBand::VeryLow);
        assert_eq!(ApprovalBand::from_score(0), ApprovalBand::VeryLow);
    }

    #[test]
    fn bands_are_ordered_by_likelihood() {
        assert!(ApprovalBand::Excellent > ApprovalBand::Good);
        assert!(ApprovalBand::Low > ApprovalBand::VeryLow);
    }
}
