use crate::error::{with_last_error_mut, DefaultFireRiskError, FireRiskError, FireRiskErrorCode};
use crate::types::FireRiskCoordinate;
use fire_risk_core::Coordinate;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FireRiskError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record `error` in thread-local storage and return its code.
#[inline]
pub(crate) fn track_error(error: &impl FireRiskError) -> FireRiskErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called at the start of every fallible FFI function.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FireRiskErrorCode::Ok;
    });
}

/// Validate a coordinate coming from C.
pub(crate) fn validated(
    param_name: &str,
    coordinate: FireRiskCoordinate,
) -> Result<Coordinate, DefaultFireRiskError> {
    Coordinate::new(coordinate.longitude, coordinate.latitude)
        .map_err(|e| DefaultFireRiskError::invalid_coordinate(param_name, &e))
}

/// NaN (or any non-finite value) marks an absent reading.
#[inline]
pub(crate) fn reading(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
