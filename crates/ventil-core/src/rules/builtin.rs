use crate::error::VentilError;
use crate::rules::schema::ThresholdProfile;

const STANDARD_JSON: &str = include_str!("../../../../rules/standard.json");
const STRICT_JSON: &str = include_str!("../../../../rules/strict.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["standard", "strict"];

/// Preset used when none is named.
pub const DEFAULT_PRESET: &str = "standard";

/// Load a predefined threshold profile by name.
pub fn load_preset(name: &str) -> Result<ThresholdProfile, VentilError> {
    match name {
        "standard" => {
            let profile: ThresholdProfile = serde_json::from_str(STANDARD_JSON)?;
            Ok(profile)
        }
        "strict" => {
            let profile: ThresholdProfile = serde_json::from_str(STRICT_JSON)?;
            Ok(profile)
        }
        _ => Err(VentilError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use crate::rules::schema::ThresholdProfile;
    use crate::rules::validate_profile;

    #[test]
    fn test_standard_matches_defaults() {
        let p = load_preset("standard").unwrap();
        let bare: ThresholdProfile = serde_json::from_str(r#"{ "name": "standard" }"#).unwrap();
        assert_eq!(p.suction_pressure, bare.suction_pressure);
        assert_eq!(p.patterns, bare.patterns);
        assert_eq!(p.comfort, bare.comfort);
        assert_eq!(p.actions, bare.actions);
    }

    #[test]
    fn test_standard_is_default_profile() {
        let p = load_preset("standard").unwrap();
        let d = ThresholdProfile::default();
        assert_eq!(p.name, d.name);
        assert_eq!(p.outdoor_temp, d.outdoor_temp);
        assert_eq!(p.subcooling, d.subcooling);
        assert_eq!(p.setpoint, d.setpoint);
        assert_eq!(p.outliers, d.outliers);
    }

    #[test]
    fn test_strict_overrides() {
        let p = load_preset("strict").unwrap();
        assert_eq!(p.suction_pressure.low.threshold, 50.0);
        assert_eq!(p.suction_pressure.low.severity, Severity::Medium);
        assert_eq!(p.suction_pressure.high.severity, Severity::High);
        assert_eq!(p.outliers.min_samples, 5);
        assert_eq!(p.actions.limit, None);
        assert_eq!(p.discharge_pressure.high.threshold, 400.0);
    }

    #[test]
    fn test_presets_validate() {
        for name in PRESETS {
            validate_profile(&load_preset(name).unwrap()).unwrap();
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("lenient").is_err());
    }
}
