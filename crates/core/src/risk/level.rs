use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk band shown next to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,      // < 30
    Moderate, // 30-69
    High,     // >= 70
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    /// What the observer should do at this level
    pub fn advice(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Monitor for changes",
            RiskLevel::Moderate => "Stay informed",
            RiskLevel::High => "Be prepared to evacuate",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a score: below 30 is Low, below 70 is Moderate, otherwise High.
pub fn classify_risk(score: i64) -> RiskLevel {
    if score < 30 {
        RiskLevel::Low
    } else if score < 70 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify_risk(0), RiskLevel::Low);
        assert_eq!(classify_risk(29), RiskLevel::Low);
        assert_eq!(classify_risk(30), RiskLevel::Moderate);
        assert_eq!(classify_risk(69), RiskLevel::Moderate);
        assert_eq!(classify_risk(70), RiskLevel::High);
        assert_eq!(classify_risk(100), RiskLevel::High);
    }

    #[test]
    fn test_out_of_range_scores() {
        assert_eq!(classify_risk(-5), RiskLevel::Low);
        assert_eq!(classify_risk(250), RiskLevel::High);
    }

    #[test]
    fn test_advice() {
        assert_eq!(RiskLevel::Low.advice(), "Monitor for changes");
        assert_eq!(RiskLevel::Moderate.advice(), "Stay informed");
        assert_eq!(RiskLevel::High.advice(), "Be prepared to evacuate");
        assert_eq!(RiskLevel::High.to_string(), "High");
    }
}
