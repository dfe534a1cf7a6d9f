use crate::diagnose::outcome::{ComfortKind, ComfortResult};
use crate::diagnose::stats;
use crate::parsing::{NumericSeries, RoleSeries};
use crate::rules::schema::ComfortBand;

/// Check indoor humidity and temperature columns against the comfort band.
///
/// Humidity columns named in `band.excluded_humidity_columns` and empty
/// series are skipped.
pub fn check_comfort(series: &RoleSeries, band: &ComfortBand) -> Vec<ComfortResult> {
    let mut results = Vec::new();

    for s in &series.indoor_humidity {
        if band.excluded_humidity_columns.iter().any(|c| *c == s.name) {
            tracing::debug!(column = %s.name, "humidity column excluded from comfort check");
            continue;
        }
        if let Some(r) = share_outside(s, ComfortKind::IndoorHumidity, |v| v > band.humidity_max) {
            results.push(r);
        }
    }

    for s in &series.indoor_temps {
        if let Some(r) = share_outside(s, ComfortKind::IndoorTemperature, |v| {
            v < band.temp_min || v > band.temp_max
        }) {
            results.push(r);
        }
    }

    results
}

fn share_outside(
    s: &NumericSeries,
    kind: ComfortKind,
    outside: impl Fn(f64) -> bool,
) -> Option<ComfortResult> {
    let average = stats::mean(&s.values)?;
    let count = s.values.iter().filter(|v| outside(**v)).count();
    let percent_outside = count as f64 * 100.0 / s.values.len() as f64;
    Some(ComfortResult {
        kind,
        column: s.name.clone(),
        average,
        percent_outside,
        compliant: count == 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, values: &[f64]) -> NumericSeries {
        NumericSeries {
            column: 0,
            name: name.to_string(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_all_in_band_is_compliant() {
        let rs = RoleSeries {
            indoor_temps: vec![series("Indoor Temp", &[72.0; 6])],
            ..Default::default()
        };
        let results = check_comfort(&rs, &ComfortBand::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].percent_outside, 0.0);
        assert!(results[0].compliant);
        assert_eq!(results[0].average, 72.0);
    }

    #[test]
    fn test_half_out_of_band() {
        let rs = RoleSeries {
            indoor_temps: vec![series("Indoor Temp", &[80.0, 80.0, 72.0, 72.0])],
            ..Default::default()
        };
        let results = check_comfort(&rs, &ComfortBand::default());
        assert_eq!(results[0].percent_outside, 50.0);
        assert!(!results[0].compliant);
    }

    #[test]
    fn test_band_edges_are_inside() {
        let rs = RoleSeries {
            indoor_temps: vec![series("T", &[70.0, 75.0])],
            indoor_humidity: vec![series("RH", &[60.0, 60.0])],
            ..Default::default()
        };
        let results = check_comfort(&rs, &ComfortBand::default());
        assert!(results.iter().all(|r| r.compliant));
        assert_eq!(results[0].kind, ComfortKind::IndoorHumidity);
    }

    #[test]
    fn test_sentinel_humidity_column_skipped() {
        let rs = RoleSeries {
            indoor_humidity: vec![series("RH Setpoint", &[50.0]), series("Zone RH", &[65.0, 55.0])],
            ..Default::default()
        };
        let results = check_comfort(&rs, &ComfortBand::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].column, "Zone RH");
        assert_eq!(results[0].percent_outside, 50.0);
    }

    #[test]
    fn test_empty_series_skipped() {
        let rs = RoleSeries {
            indoor_temps: vec![series("T", &[])],
            ..Default::default()
        };
        assert!(check_comfort(&rs, &ComfortBand::default()).is_empty());
    }
}
