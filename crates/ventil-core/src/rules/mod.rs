pub mod builtin;
pub mod schema;

use crate::error::VentilError;
use schema::{Limit, ThresholdProfile};
use std::path::Path;

/// Load a threshold profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<ThresholdProfile, VentilError> {
    let content = std::fs::read_to_string(path).map_err(|e| VentilError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a threshold profile from a JSON string read from `source`.
pub fn parse_profile(json: &str, source: &Path) -> Result<ThresholdProfile, VentilError> {
    let profile: ThresholdProfile =
        serde_json::from_str(json).map_err(|e| VentilError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a threshold profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<ThresholdProfile, VentilError> {
    let profile: ThresholdProfile = serde_json::from_str(json).map_err(VentilError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is internally consistent.
pub fn validate_profile(profile: &ThresholdProfile) -> Result<(), VentilError> {
    if profile.name.trim().is_empty() {
        return Err(VentilError::ProfileInvalid(
            "profile name must not be empty".into(),
        ));
    }

    ordered("suction_pressure", &profile.suction_pressure.low, &profile.suction_pressure.high)?;
    ordered(
        "discharge_pressure",
        &profile.discharge_pressure.low,
        &profile.discharge_pressure.high,
    )?;
    ordered("suction_temp", &profile.suction_temp.low, &profile.suction_temp.high)?;
    ordered("supply_temp", &profile.supply_temp.very_low, &profile.supply_temp.high)?;
    ordered("compression_ratio", &profile.compression_ratio.low, &profile.compression_ratio.high)?;
    ordered("outdoor_humidity", &profile.outdoor_humidity.low, &profile.outdoor_humidity.high)?;
    ordered("indoor_humidity", &profile.indoor_humidity.low, &profile.indoor_humidity.high)?;
    ordered("outdoor_temp", &profile.outdoor_temp.low, &profile.outdoor_temp.high)?;
    ordered("setpoint", &profile.setpoint.undershoot, &profile.setpoint.overshoot)?;
    ordered("subcooling", &profile.subcooling.low, &profile.subcooling.high)?;

    let split = &profile.temperature_split;
    if !(split.min.is_finite() && split.max.is_finite() && split.min < split.max) {
        return Err(VentilError::ProfileInvalid(format!(
            "temperature_split: min {} must be below max {}",
            split.min, split.max
        )));
    }

    let comfort = &profile.comfort;
    if !(comfort.temp_min.is_finite() && comfort.temp_max.is_finite())
        || comfort.temp_min >= comfort.temp_max
    {
        return Err(VentilError::ProfileInvalid(format!(
            "comfort: temp_min {} must be below temp_max {}",
            comfort.temp_min, comfort.temp_max
        )));
    }
    non_negative("comfort.humidity_max", comfort.humidity_max)?;

    non_negative("suction_pressure.max_stddev", profile.suction_pressure.max_stddev)?;
    non_negative("discharge_pressure.max_stddev", profile.discharge_pressure.max_stddev)?;
    non_negative("suction_temp.max_stddev", profile.suction_temp.max_stddev)?;
    non_negative("indoor_humidity.max_stddev", profile.indoor_humidity.max_stddev)?;
    non_negative("supply_temp.max_spread", profile.supply_temp.max_spread)?;
    non_negative("temperature_variation.max_range", profile.temperature_variation.max_range)?;
    non_negative("patterns.decline_drop", profile.patterns.decline_drop)?;

    fraction("patterns.cycling_fraction", profile.patterns.cycling_fraction)?;
    fraction("patterns.hunting_fraction", profile.patterns.hunting_fraction)?;
    fraction("outliers.max_fraction", profile.outliers.max_fraction)?;

    if !(profile.patterns.cycling_sigma.is_finite() && profile.patterns.cycling_sigma > 0.0) {
        return Err(VentilError::ProfileInvalid(
            "patterns.cycling_sigma must be positive".into(),
        ));
    }
    if !(profile.outliers.fence_multiplier.is_finite() && profile.outliers.fence_multiplier > 0.0)
    {
        return Err(VentilError::ProfileInvalid(
            "outliers.fence_multiplier must be positive".into(),
        ));
    }

    if profile.actions.limit == Some(0) {
        return Err(VentilError::ProfileInvalid(
            "actions.limit must be at least 1 (use null for no limit)".into(),
        ));
    }

    Ok(())
}

fn ordered(section: &str, low: &Limit, high: &Limit) -> Result<(), VentilError> {
    if !low.threshold.is_finite() || !high.threshold.is_finite() {
        return Err(VentilError::ProfileInvalid(format!(
            "{section}: thresholds must be finite numbers"
        )));
    }
    if low.threshold >= high.threshold {
        return Err(VentilError::ProfileInvalid(format!(
            "{section}: low threshold {} must be below high threshold {}",
            low.threshold, high.threshold
        )));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), VentilError> {
    if !value.is_finite() || value < 0.0 {
        return Err(VentilError::ProfileInvalid(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn fraction(field: &str, value: f64) -> Result<(), VentilError> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(VentilError::ProfileInvalid(format!(
            "{field} must be in (0, 1], got {value}"
        )));
    }
    Ok(())
}
