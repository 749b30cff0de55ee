use fire_risk_core::CoordinateError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code passed across the FFI boundary
/// - `msg()` - Returns the error message for diagnostics
pub(crate) trait FireRiskError {
    fn code(&self) -> FireRiskErrorCode;

    fn msg(&self) -> &str;
}

/// Default implementation of `FireRiskError` for the errors the risk API can
/// report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFireRiskError {
    code: FireRiskErrorCode,
    msg: String,
}

impl DefaultFireRiskError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_km"`, `"hazards"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireRiskErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a coordinate that failed validation.
    ///
    /// # Arguments
    /// * `param_name` - The name of the coordinate parameter (e.g., `"observer"`)
    /// * `error` - Why the coordinate was rejected
    pub fn invalid_coordinate(param_name: &str, error: &CoordinateError) -> Self {
        Self {
            code: FireRiskErrorCode::InvalidCoordinate,
            msg: format!("Coordinate {param_name}: {error}"),
        }
    }

    /// Create error for invalid parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FireRiskErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl FireRiskError for DefaultFireRiskError {
    fn code(&self) -> FireRiskErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by fire risk functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRiskErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Coordinate is non-finite or outside longitude [-180, 180] / latitude [-90, 90].
    InvalidCoordinate = 2,

    /// Invalid parameter passed to function.
    InvalidParameter = 3,
}

impl From<DefaultFireRiskError> for FireRiskErrorCode {
    fn from(error: DefaultFireRiskError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is kept here so the pointer handed to C stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, FireRiskErrorCode)> = const { RefCell::new((None, FireRiskErrorCode::Ok)) };
}

pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FireRiskErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FireRiskErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// double km = 0.0;
/// if (fire_risk_distance_km(a, b, &km) != Ok) {
///     const char* error = fire_risk_get_last_error();
///     if (error) {
///         printf("Distance failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fire_risk_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
///
/// Error state is thread-local; each thread sees only its own failures.
#[no_mangle]
pub extern "C" fn fire_risk_get_last_error_code() -> FireRiskErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
