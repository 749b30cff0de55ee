//! C ABI over `fire-risk-core` for native map hosts.
//!
//! Every fallible function returns a [`FireRiskErrorCode`] and records a
//! message retrievable with [`fire_risk_get_last_error`] on the calling
//! thread. Weather readings that are not available are passed as NaN.

mod error;
mod helpers;
mod queries;
mod types;

pub use error::{fire_risk_get_last_error, fire_risk_get_last_error_code, FireRiskErrorCode};
pub use queries::{fire_risk_classify, fire_risk_distance_km, fire_risk_find_nearest, fire_risk_score};
pub use types::{FireRiskAssessment, FireRiskCoordinate, FireRiskHazard, FireRiskLevel};
