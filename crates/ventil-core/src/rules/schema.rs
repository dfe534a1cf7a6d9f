use crate::model::Severity;
use serde::{Deserialize, Serialize};

/// A named set of diagnostic thresholds.
///
/// Every section falls back to the standard calibration when omitted, so a
/// profile file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub suction_pressure: SuctionPressureLimits,
    #[serde(default)]
    pub discharge_pressure: DischargePressureLimits,
    #[serde(default)]
    pub suction_temp: SuctionTempLimits,
    #[serde(default)]
    pub supply_temp: SupplyTempLimits,
    #[serde(default)]
    pub temperature_variation: VariationLimits,
    #[serde(default)]
    pub compression_ratio: BandLimits,
    #[serde(default = "default_outdoor_humidity")]
    pub outdoor_humidity: BandLimits,
    #[serde(default)]
    pub indoor_humidity: IndoorHumidityLimits,
    #[serde(default = "default_outdoor_temp")]
    pub outdoor_temp: BandLimits,
    #[serde(default)]
    pub temperature_split: SplitLimits,
    #[serde(default)]
    pub setpoint: SetpointLimits,
    #[serde(default)]
    pub patterns: PatternLimits,
    #[serde(default)]
    pub outliers: OutlierLimits,
    #[serde(default = "default_subcooling")]
    pub subcooling: BandLimits,
    #[serde(default)]
    pub comfort: ComfortBand,
    #[serde(default)]
    pub actions: ActionSettings,
}

impl Default for ThresholdProfile {
    /// The standard calibration.
    fn default() -> Self {
        ThresholdProfile {
            name: "standard".to_string(),
            description: None,
            version: default_version(),
            suction_pressure: SuctionPressureLimits::default(),
            discharge_pressure: DischargePressureLimits::default(),
            suction_temp: SuctionTempLimits::default(),
            supply_temp: SupplyTempLimits::default(),
            temperature_variation: VariationLimits::default(),
            compression_ratio: BandLimits::default(),
            outdoor_humidity: default_outdoor_humidity(),
            indoor_humidity: IndoorHumidityLimits::default(),
            outdoor_temp: default_outdoor_temp(),
            temperature_split: SplitLimits::default(),
            setpoint: SetpointLimits::default(),
            patterns: PatternLimits::default(),
            outliers: OutlierLimits::default(),
            subcooling: default_subcooling(),
            comfort: ComfortBand::default(),
            actions: ActionSettings::default(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

/// A threshold and the severity of crossing it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub threshold: f64,
    pub severity: Severity,
}

impl Limit {
    pub const fn new(threshold: f64, severity: Severity) -> Limit {
        Limit {
            threshold,
            severity,
        }
    }
}

/// A plain low/high pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandLimits {
    pub low: Limit,
    pub high: Limit,
}

impl Default for BandLimits {
    /// Compressor discharge/suction ratio.
    fn default() -> Self {
        BandLimits {
            low: Limit::new(2.0, Severity::Medium),
            high: Limit::new(4.5, Severity::High),
        }
    }
}

fn default_outdoor_humidity() -> BandLimits {
    BandLimits {
        low: Limit::new(20.0, Severity::Low),
        high: Limit::new(85.0, Severity::Medium),
    }
}

fn default_outdoor_temp() -> BandLimits {
    BandLimits {
        low: Limit::new(32.0, Severity::Low),
        high: Limit::new(95.0, Severity::Medium),
    }
}

fn default_subcooling() -> BandLimits {
    BandLimits {
        low: Limit::new(5.0, Severity::Medium),
        high: Limit::new(20.0, Severity::Low),
    }
}

/// Suction pressure in PSI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuctionPressureLimits {
    pub low: Limit,
    pub high: Limit,
    pub max_stddev: f64,
}

impl Default for SuctionPressureLimits {
    fn default() -> Self {
        SuctionPressureLimits {
            low: Limit::new(60.0, Severity::High),
            high: Limit::new(90.0, Severity::Medium),
            max_stddev: 15.0,
        }
    }
}

/// Discharge (head) pressure in PSI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DischargePressureLimits {
    pub low: Limit,
    pub high: Limit,
    pub max_stddev: f64,
}

impl Default for DischargePressureLimits {
    fn default() -> Self {
        DischargePressureLimits {
            low: Limit::new(150.0, Severity::Medium),
            high: Limit::new(400.0, Severity::High),
            max_stddev: 20.0,
        }
    }
}

/// Suction line temperature in °F.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuctionTempLimits {
    pub low: Limit,
    pub high: Limit,
    pub max_stddev: f64,
    /// Any reading below this flags an icing risk.
    pub icing_point: f64,
}

impl Default for SuctionTempLimits {
    fn default() -> Self {
        SuctionTempLimits {
            low: Limit::new(35.0, Severity::High),
            high: Limit::new(65.0, Severity::Medium),
            max_stddev: 8.0,
            icing_point: 32.0,
        }
    }
}

/// Supply-air and discharge temperatures in °F.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyTempLimits {
    pub very_low: Limit,
    pub high: Limit,
    pub max_spread: f64,
}

impl Default for SupplyTempLimits {
    fn default() -> Self {
        SupplyTempLimits {
            very_low: Limit::new(50.0, Severity::Medium),
            high: Limit::new(120.0, Severity::High),
            max_spread: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationLimits {
    pub max_range: f64,
}

impl Default for VariationLimits {
    fn default() -> Self {
        VariationLimits { max_range: 25.0 }
    }
}

/// Indoor relative humidity in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndoorHumidityLimits {
    pub low: Limit,
    pub high: Limit,
    pub max_stddev: f64,
}

impl Default for IndoorHumidityLimits {
    fn default() -> Self {
        IndoorHumidityLimits {
            low: Limit::new(30.0, Severity::Low),
            high: Limit::new(60.0, Severity::Medium),
            max_stddev: 10.0,
        }
    }
}

/// Indoor minus supply-air temperature, °F.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitLimits {
    pub min: f64,
    pub max: f64,
    pub severity: Severity,
}

impl Default for SplitLimits {
    fn default() -> Self {
        SplitLimits {
            min: 15.0,
            max: 25.0,
            severity: Severity::Medium,
        }
    }
}

/// Indoor temperature minus cooling setpoint, °F.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetpointLimits {
    pub overshoot: Limit,
    pub undershoot: Limit,
}

impl Default for SetpointLimits {
    fn default() -> Self {
        SetpointLimits {
            overshoot: Limit::new(3.0, Severity::Medium),
            undershoot: Limit::new(-2.0, Severity::Low),
        }
    }
}

/// Time-series pattern detectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternLimits {
    /// Series must be longer than this for cycling and hunting checks.
    pub min_samples: usize,
    /// A step counts as abrupt beyond this many standard deviations of the steps.
    pub cycling_sigma: f64,
    pub cycling_fraction: f64,
    pub hunting_fraction: f64,
    /// Series must be longer than this for the decline check.
    pub decline_min_samples: usize,
    pub decline_drop: f64,
}

impl Default for PatternLimits {
    fn default() -> Self {
        PatternLimits {
            min_samples: 10,
            cycling_sigma: 2.0,
            cycling_fraction: 0.20,
            hunting_fraction: 0.30,
            decline_min_samples: 50,
            decline_drop: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierLimits {
    pub fence_multiplier: f64,
    /// Series must be longer than this to be checked.
    pub min_samples: usize,
    pub max_fraction: f64,
}

impl Default for OutlierLimits {
    fn default() -> Self {
        OutlierLimits {
            fence_multiplier: 1.5,
            min_samples: 10,
            max_fraction: 0.15,
        }
    }
}

/// Indoor comfort band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComfortBand {
    pub humidity_max: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Humidity columns left out of the comfort check, by exact header.
    pub excluded_humidity_columns: Vec<String>,
}

impl Default for ComfortBand {
    fn default() -> Self {
        ComfortBand {
            humidity_max: 60.0,
            temp_min: 70.0,
            temp_max: 75.0,
            excluded_humidity_columns: vec!["RH Setpoint".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    /// Maximum number of actions; `null` for no limit.
    pub limit: Option<usize>,
}

impl Default for ActionSettings {
    fn default() -> Self {
        ActionSettings { limit: Some(15) }
    }
}
