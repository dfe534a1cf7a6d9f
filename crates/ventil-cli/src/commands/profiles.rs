use std::path::Path;

use ventil_core::error::VentilError;
use ventil_core::rules::builtin;
use ventil_core::rules::schema::{BandLimits, Limit, ThresholdProfile};

pub fn list() -> Result<(), VentilError> {
    println!("Available threshold profiles:\n");
    for name in builtin::PRESETS {
        let p = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!("  {:<10} v{}{}", name, p.version, default_marker);
        if let Some(ref desc) = p.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), VentilError> {
    let p = builtin::load_preset(preset)?;
    print_profile(&p);
    Ok(())
}

fn limit(label: &str, l: &Limit, unit: &str) {
    println!(
        "  {:<34} {:>8} {:<4} {}",
        label, l.threshold, unit, l.severity
    );
}

fn band(title: &str, b: &BandLimits, unit: &str) {
    limit(&format!("{title}, below"), &b.low, unit);
    limit(&format!("{title}, above"), &b.high, unit);
}

fn plain(label: &str, value: impl std::fmt::Display, unit: &str) {
    println!("  {:<34} {:>8} {}", label, value, unit);
}

fn print_profile(p: &ThresholdProfile) {
    println!("{} (version {})\n", p.name, p.version);
    if let Some(ref desc) = p.description {
        println!("{}\n", desc);
    }

    println!("Averages below/above a threshold raise a finding of the listed severity.\n");
    println!("  {:<34} {:>8} {:<4} Severity", "Check", "Value", "Unit");
    println!("  {}", "-".repeat(60));

    limit("Suction pressure, below", &p.suction_pressure.low, "PSI");
    limit("Suction pressure, above", &p.suction_pressure.high, "PSI");
    plain("Suction pressure, max std dev", p.suction_pressure.max_stddev, "PSI");
    limit("Discharge pressure, below", &p.discharge_pressure.low, "PSI");
    limit("Discharge pressure, above", &p.discharge_pressure.high, "PSI");
    plain("Discharge pressure, max std dev", p.discharge_pressure.max_stddev, "PSI");
    band("Compression ratio", &p.compression_ratio, "");
    limit("Suction temperature, below", &p.suction_temp.low, "°F");
    limit("Suction temperature, above", &p.suction_temp.high, "°F");
    plain("Suction temperature, max std dev", p.suction_temp.max_stddev, "°F");
    plain("Suction temperature, icing point", p.suction_temp.icing_point, "°F");
    limit("Supply temperature, very low", &p.supply_temp.very_low, "°F");
    limit("Supply temperature, above", &p.supply_temp.high, "°F");
    plain("Supply temperature, max spread", p.supply_temp.max_spread, "°F");
    plain("Temperature variation, max range", p.temperature_variation.max_range, "°F");
    limit("Indoor humidity, below", &p.indoor_humidity.low, "%");
    limit("Indoor humidity, above", &p.indoor_humidity.high, "%");
    plain("Indoor humidity, max std dev", p.indoor_humidity.max_stddev, "%");
    band("Outdoor humidity", &p.outdoor_humidity, "%");
    band("Outdoor temperature", &p.outdoor_temp, "°F");
    band("Subcooling", &p.subcooling, "°F");
    println!(
        "  {:<34} {:>8} {:<4} {}",
        "Temperature split, range",
        format!("{}-{}", p.temperature_split.min, p.temperature_split.max),
        "°F",
        p.temperature_split.severity
    );
    limit("Setpoint overshoot", &p.setpoint.overshoot, "°F");
    limit("Setpoint undershoot", &p.setpoint.undershoot, "°F");

    println!("\nPatterns:");
    plain("Cycling/hunting, min samples", p.patterns.min_samples, "");
    plain("Cycling, abrupt step sigma", p.patterns.cycling_sigma, "");
    plain("Cycling, max step fraction", p.patterns.cycling_fraction, "");
    plain("Hunting, max reversal fraction", p.patterns.hunting_fraction, "");
    plain("Decline, min samples", p.patterns.decline_min_samples, "");
    plain("Decline, max drop", p.patterns.decline_drop, "%");
    plain("Outliers, fence multiplier", p.outliers.fence_multiplier, "IQR");
    plain("Outliers, min samples", p.outliers.min_samples, "");
    plain("Outliers, max fraction", p.outliers.max_fraction, "");

    println!("\nComfort band:");
    plain("Indoor humidity, max", p.comfort.humidity_max, "%");
    println!(
        "  {:<34} {:>8} °F",
        "Indoor temperature",
        format!("{}-{}", p.comfort.temp_min, p.comfort.temp_max)
    );
    if !p.comfort.excluded_humidity_columns.is_empty() {
        println!(
            "  Humidity columns not checked: {}",
            p.comfort.excluded_humidity_columns.join(", ")
        );
    }

    println!();
    match p.actions.limit {
        Some(n) => println!("At most {n} actions are listed.\n"),
        None => println!("All actions are listed.\n"),
    }
}

pub fn schema() -> Result<(), VentilError> {
    print!(
        r#"JSON Profile Schema
===================

A profile file sets the thresholds `ventil analyze --profile FILE` checks
each sensor column against. Only `name` is required; every section that
is left out keeps the values of the "standard" preset, and inside a
section every field that is left out does too.

Top-level fields:
  name                  (string, required)  Profile name shown in reports
  description           (string, optional)  What this profile is for
  version               (string, optional)  Default: "1.0"

A limit is an object {{ "threshold": <number>, "severity": "high"|"medium"|"low" }}.

Sections (all optional):
  suction_pressure      low, high (limits, PSI), max_stddev (number)
  discharge_pressure    low, high (limits, PSI), max_stddev (number)
  suction_temp          low, high (limits, °F), max_stddev, icing_point
  supply_temp           very_low, high (limits, °F), max_spread
  temperature_variation max_range (°F)
  compression_ratio     low, high (limits, discharge/suction)
  indoor_humidity       low, high (limits, %), max_stddev
  outdoor_humidity      low, high (limits, %)
  outdoor_temp          low, high (limits, °F)
  subcooling            low, high (limits, °F)
  temperature_split     min, max (°F), severity
  setpoint              overshoot, undershoot (limits, °F above setpoint)
  patterns              min_samples, cycling_sigma, cycling_fraction,
                        hunting_fraction, decline_min_samples, decline_drop
  outliers              fence_multiplier, min_samples, max_fraction
  comfort               humidity_max, temp_min, temp_max,
                        excluded_humidity_columns (array of headers)
  actions               limit (number, or null for no limit)

Example:
{{
  "name": "site-x",
  "description": "R-410A rooftop units at Site X",
  "suction_pressure": {{
    "low": {{ "threshold": 110, "severity": "high" }},
    "high": {{ "threshold": 145, "severity": "medium" }}
  }},
  "comfort": {{ "temp_min": 68, "temp_max": 76 }},
  "actions": {{ "limit": 25 }}
}}

Low thresholds must be below high thresholds, fractions must lie in 0..1
and standard deviations must not be negative. Run
`ventil profiles validate FILE` to check a file.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), VentilError> {
    let p = ventil_core::rules::load_profile(file)?;

    println!("Profile '{}' (v{}) is valid.", p.name, p.version);

    let standard = ThresholdProfile::default();
    let mut changed = Vec::new();
    if p.suction_pressure != standard.suction_pressure {
        changed.push("suction_pressure");
    }
    if p.discharge_pressure != standard.discharge_pressure {
        changed.push("discharge_pressure");
    }
    if p.suction_temp != standard.suction_temp {
        changed.push("suction_temp");
    }
    if p.supply_temp != standard.supply_temp {
        changed.push("supply_temp");
    }
    if p.temperature_variation != standard.temperature_variation {
        changed.push("temperature_variation");
    }
    if p.compression_ratio != standard.compression_ratio {
        changed.push("compression_ratio");
    }
    if p.indoor_humidity != standard.indoor_humidity {
        changed.push("indoor_humidity");
    }
    if p.outdoor_humidity != standard.outdoor_humidity {
        changed.push("outdoor_humidity");
    }
    if p.outdoor_temp != standard.outdoor_temp {
        changed.push("outdoor_temp");
    }
    if p.subcooling != standard.subcooling {
        changed.push("subcooling");
    }
    if p.temperature_split != standard.temperature_split {
        changed.push("temperature_split");
    }
    if p.setpoint != standard.setpoint {
        changed.push("setpoint");
    }
    if p.patterns != standard.patterns {
        changed.push("patterns");
    }
    if p.outliers != standard.outliers {
        changed.push("outliers");
    }
    if p.comfort != standard.comfort {
        changed.push("comfort");
    }
    if p.actions != standard.actions {
        changed.push("actions");
    }

    if changed.is_empty() {
        println!("  Same thresholds as the standard preset.");
    } else {
        println!("  Differs from standard in: {}", changed.join(", "));
    }

    Ok(())
}
