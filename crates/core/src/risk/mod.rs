//! Weighted wildfire risk model
//!
//! Each factor (distance, temperature, wind speed, humidity, cloud cover) is
//! normalized to a 0-100 sub-score and combined with fixed weights that sum
//! to 1, so the final integer score always lies in [0, 100].

pub mod level;
pub mod model;
pub mod score;

pub use level::{classify_risk, RiskLevel};
pub use model::{RiskModel, RiskModelError, RiskWeights};
pub use score::{risk_score, RiskInputs, RiskScore, ScoreOutOfRange, SubScores};
