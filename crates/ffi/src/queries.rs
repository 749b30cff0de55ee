//! Distance, scoring and nearest-hazard queries.

#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::mem::size_of;
use std::slice;

use fire_risk_core::{
    classify_risk, great_circle_distance_km, GeoRiskEngine, HazardRecord, RiskInputs, RiskModel,
};

use crate::error::{DefaultFireRiskError, FireRiskErrorCode};
use crate::helpers::{clear_last_error, reading, track_error, validated};
use crate::types::{FireRiskAssessment, FireRiskCoordinate, FireRiskHazard, FireRiskLevel};

/// Great-circle distance between two coordinates in kilometers.
///
/// # Arguments
/// * `a`, `b` - Endpoints in degrees
/// * `out_km` - Receives the distance (must not be null)
///
/// # Returns
/// `Ok`, `NullPointer` or `InvalidCoordinate`. `out_km` is only written on success.
///
/// # Safety
/// `out_km` must point to writable memory for one `double`.
#[no_mangle]
pub extern "C" fn fire_risk_distance_km(
    a: FireRiskCoordinate,
    b: FireRiskCoordinate,
    out_km: *mut f64,
) -> FireRiskErrorCode {
    clear_last_error();
    if out_km.is_null() {
        return track_error(&DefaultFireRiskError::null_pointer("out_km"));
    }

    let a = match validated("a", a) {
        Ok(c) => c,
        Err(e) => return track_error(&e),
    };
    let b = match validated("b", b) {
        Ok(c) => c,
        Err(e) => return track_error(&e),
    };

    unsafe {
        *out_km = great_circle_distance_km(a, b).value();
    }
    FireRiskErrorCode::Ok
}

/// Risk score (0-100) with the default model.
///
/// Pass NaN for any reading that is not available. Never fails.
#[no_mangle]
pub extern "C" fn fire_risk_score(
    distance_km: f64,
    temperature: f64,
    wind_speed: f64,
    humidity: f64,
    clouds: f64,
) -> u8 {
    RiskModel::default()
        .score(&RiskInputs {
            distance_km: reading(distance_km),
            temperature_c: reading(temperature),
            wind_speed_ms: reading(wind_speed),
            humidity_pct: reading(humidity),
            clouds_pct: reading(clouds),
        })
        .value()
}

/// Risk band for a score: below 30 Low, below 70 Moderate, otherwise High.
#[no_mangle]
pub extern "C" fn fire_risk_classify(score: i64) -> FireRiskLevel {
    classify_risk(score).into()
}

/// Find the hazard closest to `observer` and score it.
///
/// Hazards with an invalid location are skipped. On equal distances the
/// earliest hazard wins.
///
/// # Arguments
/// * `observer` - Observer position (must be valid)
/// * `hazards` - Array of `len` hazards (may be null only when `len` is 0)
/// * `out` - Receives the nearest hazard; untouched when none is found
/// * `out_found` - Set to whether a hazard was found
///
/// # Safety
/// `hazards` must point to `len` readable `FireRiskHazard` values. `out` and
/// `out_found` must be writable.
#[no_mangle]
pub extern "C" fn fire_risk_find_nearest(
    observer: FireRiskCoordinate,
    hazards: *const FireRiskHazard,
    len: usize,
    out: *mut FireRiskAssessment,
    out_found: *mut bool,
) -> FireRiskErrorCode {
    clear_last_error();
    if out.is_null() {
        return track_error(&DefaultFireRiskError::null_pointer("out"));
    }
    if out_found.is_null() {
        return track_error(&DefaultFireRiskError::null_pointer("out_found"));
    }
    if hazards.is_null() && len > 0 {
        return track_error(&DefaultFireRiskError::null_pointer("hazards"));
    }
    if len > isize::MAX.unsigned_abs() / size_of::<FireRiskHazard>() {
        return track_error(&DefaultFireRiskError::invalid_parameter(format!(
            "Hazard count {len} is too large"
        )));
    }

    let observer = match validated("observer", observer) {
        Ok(c) => c,
        Err(e) => return track_error(&e),
    };

    let records: Vec<HazardRecord> = if len == 0 {
        Vec::new()
    } else {
        let hazards = unsafe { slice::from_raw_parts(hazards, len) };
        hazards.iter().copied().map(FireRiskHazard::to_record).collect()
    };

    let nearest = GeoRiskEngine::new().find_nearest(observer, &records);
    unsafe {
        *out_found = nearest.is_some();
        if let Some(assessment) = &nearest {
            *out = assessment.into();
        }
    }
    FireRiskErrorCode::Ok
}
