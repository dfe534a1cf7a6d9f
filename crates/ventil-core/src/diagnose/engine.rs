use crate::diagnose::catalog::RuleId;
use crate::diagnose::outcome::Finding;
use crate::diagnose::stats;
use crate::model::{Role, Severity};
use crate::parsing::{NumericSeries, RoleSeries};
use crate::rules::schema::{Limit, ThresholdProfile};

type RuleFn = fn(&RoleSeries, &ThresholdProfile, &mut Vec<Finding>);

/// Diagnostic rules in evaluation order.
const RULES: &[(&str, RuleFn)] = &[
    ("low_suction_pressure", low_suction_pressure),
    ("high_suction_pressure", high_suction_pressure),
    ("suction_pressure_instability", suction_pressure_instability),
    ("high_discharge_pressure", high_discharge_pressure),
    ("low_discharge_pressure", low_discharge_pressure),
    ("discharge_pressure_instability", discharge_pressure_instability),
    ("high_suction_temp", high_suction_temp),
    ("low_suction_temp", low_suction_temp),
    ("suction_temp_instability", suction_temp_instability),
    ("high_supply_temp", high_supply_temp),
    ("very_low_supply_temp", very_low_supply_temp),
    ("wide_supply_spread", wide_supply_spread),
    ("temperature_variation", temperature_variation),
    ("compression_ratio", compression_ratio),
    ("outdoor_humidity", outdoor_humidity),
    ("indoor_humidity", indoor_humidity),
    ("humidity_instability", humidity_instability),
    ("extreme_outdoor_temp", extreme_outdoor_temp),
    ("evaporator_icing", evaporator_icing),
    ("temperature_split", temperature_split),
    ("setpoint_deviation", setpoint_deviation),
    ("short_cycling", short_cycling),
    ("control_hunting", control_hunting),
    ("gradual_pressure_decline", gradual_pressure_decline),
    ("outlier_frequency", outlier_frequency),
    ("subcooling", subcooling),
];

/// Supply-air and discharge temperatures are judged together.
const SUPPLY_ROLES: [Role; 2] = [Role::SupplyAirTemp, Role::DischargeTemp];

/// Every temperature role; each column's overall range is checked.
const VARIATION_ROLES: [Role; 5] = [
    Role::SuctionTemp,
    Role::SupplyAirTemp,
    Role::DischargeTemp,
    Role::OutdoorAirTemp,
    Role::IndoorTemp,
];

const CYCLING_ROLES: [Role; 2] = [Role::SuctionPressure, Role::DischargePressure];
const HUNTING_ROLES: [Role; 2] = [Role::SupplyAirTemp, Role::IndoorTemp];

/// Evaluate every diagnostic rule against the classified series.
///
/// Findings come out in rule order, then column order. Rules whose input
/// series are missing or too short produce nothing.
pub fn evaluate(series: &RoleSeries, profile: &ThresholdProfile) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (name, rule) in RULES {
        let before = findings.len();
        rule(series, profile, &mut findings);
        let fired = findings.len() - before;
        if fired > 0 {
            tracing::debug!(rule = name, fired, "rule produced findings");
        } else {
            tracing::trace!(rule = name, "rule produced no findings");
        }
    }
    findings
}

fn reading(value: f64, role: Role) -> String {
    match role.unit() {
        "PSI" => format!("{value:.1} PSI"),
        unit => format!("{value:.1}{unit}"),
    }
}

/// Emit `rule` for every series whose mean falls below `limit`.
fn mean_below(
    columns: &[NumericSeries],
    role: Role,
    limit: &Limit,
    rule: RuleId,
    out: &mut Vec<Finding>,
) {
    for s in columns {
        if let Some(avg) = stats::mean(&s.values) {
            if avg < limit.threshold {
                let detail = format!("avg {}", reading(avg, role));
                out.push(Finding::new(rule, limit.severity, &s.name, avg, detail));
            }
        }
    }
}

fn mean_above(
    columns: &[NumericSeries],
    role: Role,
    limit: &Limit,
    rule: RuleId,
    out: &mut Vec<Finding>,
) {
    for s in columns {
        if let Some(avg) = stats::mean(&s.values) {
            if avg > limit.threshold {
                let detail = format!("avg {}", reading(avg, role));
                out.push(Finding::new(rule, limit.severity, &s.name, avg, detail));
            }
        }
    }
}

fn std_above(
    columns: &[NumericSeries],
    role: Role,
    max_stddev: f64,
    severity: Severity,
    rule: RuleId,
    out: &mut Vec<Finding>,
) {
    for s in columns {
        if let Some(sd) = stats::sample_std(&s.values) {
            if sd > max_stddev {
                let detail = format!("std dev {}", reading(sd, role));
                out.push(Finding::new(rule, severity, &s.name, sd, detail));
            }
        }
    }
}

fn low_suction_pressure(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::SuctionPressure;
    let rule = RuleId::LowSuctionPressure;
    mean_below(series.get(role), role, &p.suction_pressure.low, rule, out);
}

fn high_suction_pressure(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::SuctionPressure;
    let rule = RuleId::HighSuctionPressure;
    mean_above(series.get(role), role, &p.suction_pressure.high, rule, out);
}

fn suction_pressure_instability(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::SuctionPressure;
    std_above(
        series.get(role),
        role,
        p.suction_pressure.max_stddev,
        Severity::Medium,
        RuleId::SuctionPressureInstability,
        out,
    );
}

fn high_discharge_pressure(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::DischargePressure;
    let rule = RuleId::HighDischargePressure;
    mean_above(series.get(role), role, &p.discharge_pressure.high, rule, out);
}

fn low_discharge_pressure(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::DischargePressure;
    let rule = RuleId::LowDischargePressure;
    mean_below(series.get(role), role, &p.discharge_pressure.low, rule, out);
}

fn discharge_pressure_instability(
    series: &RoleSeries,
    p: &ThresholdProfile,
    out: &mut Vec<Finding>,
) {
    let role = Role::DischargePressure;
    std_above(
        series.get(role),
        role,
        p.discharge_pressure.max_stddev,
        Severity::Medium,
        RuleId::DischargePressureInstability,
        out,
    );
}

fn high_suction_temp(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::SuctionTemp;
    mean_above(series.get(role), role, &p.suction_temp.high, RuleId::HighSuctionTemp, out);
}

fn low_suction_temp(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::SuctionTemp;
    mean_below(series.get(role), role, &p.suction_temp.low, RuleId::LowSuctionTemp, out);
}

fn suction_temp_instability(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::SuctionTemp;
    std_above(
        series.get(role),
        role,
        p.suction_temp.max_stddev,
        Severity::Low,
        RuleId::SuctionTempInstability,
        out,
    );
}

fn high_supply_temp(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    for role in SUPPLY_ROLES {
        mean_above(series.get(role), role, &p.supply_temp.high, RuleId::HighSupplyTemp, out);
    }
}

fn very_low_supply_temp(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    for role in SUPPLY_ROLES {
        let rule = RuleId::VeryLowSupplyTemp;
        mean_below(series.get(role), role, &p.supply_temp.very_low, rule, out);
    }
}

fn range_above(
    series: &RoleSeries,
    roles: &[Role],
    max_range: f64,
    rule: RuleId,
    out: &mut Vec<Finding>,
) {
    for role in roles {
        for s in series.get(*role) {
            if let Some(spread) = stats::range(&s.values) {
                if spread > max_range {
                    out.push(Finding::new(
                        rule,
                        Severity::Medium,
                        &s.name,
                        spread,
                        format!("range {}", reading(spread, *role)),
                    ));
                }
            }
        }
    }
}

fn wide_supply_spread(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let rule = RuleId::WideSupplySpread;
    range_above(series, &SUPPLY_ROLES, p.supply_temp.max_spread, rule, out);
}

fn temperature_variation(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    range_above(
        series,
        &VARIATION_ROLES,
        p.temperature_variation.max_range,
        RuleId::HighTemperatureVariation,
        out,
    );
}

/// The i-th column of one role paired with the i-th column of another.
fn pairs<'a>(
    a: &'a [NumericSeries],
    b: &'a [NumericSeries],
) -> impl Iterator<Item = (&'a NumericSeries, &'a NumericSeries)> {
    a.iter().zip(b.iter())
}

fn pair_name(a: &NumericSeries, b: &NumericSeries) -> String {
    format!("{}/{}", a.name, b.name)
}

fn compression_ratio(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let limits = &p.compression_ratio;
    for (discharge, suction) in pairs(&series.discharge_pressures, &series.suction_pressures) {
        let n = discharge.len().min(suction.len());
        let (Some(head), Some(suct)) = (
            stats::mean(&discharge.values[..n]),
            stats::mean(&suction.values[..n]),
        ) else {
            continue;
        };
        if suct <= 0.0 {
            continue;
        }
        let ratio = head / suct;
        let column = pair_name(discharge, suction);
        if ratio > limits.high.threshold {
            out.push(Finding::new(
                RuleId::HighCompressionRatio,
                limits.high.severity,
                &column,
                ratio,
                format!("ratio {ratio:.2}"),
            ));
        } else if ratio < limits.low.threshold {
            out.push(Finding::new(
                RuleId::LowCompressionRatio,
                limits.low.severity,
                &column,
                ratio,
                format!("ratio {ratio:.2}"),
            ));
        }
    }
}

fn outdoor_humidity(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::OutdoorHumidity;
    let limits = &p.outdoor_humidity;
    for s in series.get(role) {
        let Some(avg) = stats::mean(&s.values) else {
            continue;
        };
        let (rule, limit) = if avg > limits.high.threshold {
            (RuleId::HighOutdoorHumidity, &limits.high)
        } else if avg < limits.low.threshold {
            (RuleId::LowOutdoorHumidity, &limits.low)
        } else {
            continue;
        };
        let detail = format!("avg {}", reading(avg, role));
        out.push(Finding::new(rule, limit.severity, &s.name, avg, detail));
    }
}

fn indoor_humidity(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::IndoorHumidity;
    let limits = &p.indoor_humidity;
    for s in series.get(role) {
        let Some(avg) = stats::mean(&s.values) else {
            continue;
        };
        let (rule, limit) = if avg > limits.high.threshold {
            (RuleId::HighIndoorHumidity, &limits.high)
        } else if avg < limits.low.threshold {
            (RuleId::LowIndoorHumidity, &limits.low)
        } else {
            continue;
        };
        let detail = format!("avg {}", reading(avg, role));
        out.push(Finding::new(rule, limit.severity, &s.name, avg, detail));
    }
}

fn humidity_instability(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::IndoorHumidity;
    std_above(
        series.get(role),
        role,
        p.indoor_humidity.max_stddev,
        Severity::Low,
        RuleId::HumidityInstability,
        out,
    );
}

fn extreme_outdoor_temp(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::OutdoorAirTemp;
    let limits = &p.outdoor_temp;
    for s in series.get(role) {
        if let Some(hottest) = stats::max(&s.values) {
            if hottest > limits.high.threshold {
                out.push(Finding::new(
                    RuleId::ExtremeOutdoorHeat,
                    limits.high.severity,
                    &s.name,
                    hottest,
                    format!("max {}", reading(hottest, role)),
                ));
            }
        }
        if let Some(coldest) = stats::min(&s.values) {
            if coldest < limits.low.threshold {
                out.push(Finding::new(
                    RuleId::ExtremeOutdoorCold,
                    limits.low.severity,
                    &s.name,
                    coldest,
                    format!("min {}", reading(coldest, role)),
                ));
            }
        }
    }
}

fn evaporator_icing(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let role = Role::SuctionTemp;
    let icing_point = p.suction_temp.icing_point;
    for s in series.get(role) {
        let below = s.values.iter().filter(|v| **v < icing_point).count();
        if below == 0 {
            continue;
        }
        if let Some(coldest) = stats::min(&s.values) {
            let detail = format!(
                "{below} readings below {}, min {}",
                reading(icing_point, role),
                reading(coldest, role)
            );
            out.push(Finding::new(
                RuleId::EvaporatorIcingRisk,
                Severity::High,
                &s.name,
                coldest,
                detail,
            ));
        }
    }
}

fn temperature_split(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let limits = &p.temperature_split;
    for (indoor, supply) in pairs(&series.indoor_temps, &series.supply_air_temps) {
        let Some(split) = stats::paired_mean(&indoor.values, &supply.values, |i, s| i - s) else {
            continue;
        };
        let rule = if split < limits.min {
            RuleId::LowTemperatureSplit
        } else if split > limits.max {
            RuleId::HighTemperatureSplit
        } else {
            continue;
        };
        out.push(Finding::new(
            rule,
            limits.severity,
            &pair_name(indoor, supply),
            split,
            format!("avg split {}", reading(split, Role::IndoorTemp)),
        ));
    }
}

fn setpoint_deviation(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let limits = &p.setpoint;
    for (indoor, setpoint) in pairs(&series.indoor_temps, &series.cooling_setpoints) {
        let Some(dev) = stats::paired_mean(&indoor.values, &setpoint.values, |i, s| i - s) else {
            continue;
        };
        let (rule, severity) = if dev > limits.overshoot.threshold {
            (RuleId::SetpointOvershoot, limits.overshoot.severity)
        } else if dev < limits.undershoot.threshold {
            (RuleId::SetpointUndershoot, limits.undershoot.severity)
        } else {
            continue;
        };
        out.push(Finding::new(
            rule,
            severity,
            &pair_name(indoor, setpoint),
            dev,
            format!("avg {dev:+.1}°F from setpoint"),
        ));
    }
}

fn short_cycling(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let limits = &p.patterns;
    for s in series.across(&CYCLING_ROLES) {
        if s.len() <= limits.min_samples {
            continue;
        }
        let Some(fraction) = stats::abrupt_step_fraction(&s.values, limits.cycling_sigma) else {
            continue;
        };
        if fraction > limits.cycling_fraction {
            out.push(Finding::new(
                RuleId::ShortCycling,
                Severity::Medium,
                &s.name,
                fraction,
                format!("{:.0}% abrupt pressure changes", fraction * 100.0),
            ));
        }
    }
}

fn control_hunting(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let limits = &p.patterns;
    for s in series.across(&HUNTING_ROLES) {
        if s.len() <= limits.min_samples {
            continue;
        }
        let Some(fraction) = stats::direction_change_fraction(&s.values) else {
            continue;
        };
        if fraction > limits.hunting_fraction {
            out.push(Finding::new(
                RuleId::ControlHunting,
                Severity::Medium,
                &s.name,
                fraction,
                format!("{:.0}% direction changes", fraction * 100.0),
            ));
        }
    }
}

fn gradual_pressure_decline(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let limits = &p.patterns;
    for s in series.get(Role::DischargePressure) {
        if s.len() <= limits.decline_min_samples {
            continue;
        }
        let Some(drop) = stats::half_mean_drop(&s.values) else {
            continue;
        };
        if drop > limits.decline_drop {
            out.push(Finding::new(
                RuleId::GradualPressureDecline,
                Severity::Medium,
                &s.name,
                drop,
                format!("dropped {}", reading(drop, Role::DischargePressure)),
            ));
        }
    }
}

fn outlier_frequency(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let limits = &p.outliers;
    for s in series.all() {
        if s.len() <= limits.min_samples {
            continue;
        }
        let count = stats::tukey_outliers(&s.values, limits.fence_multiplier);
        let fraction = count as f64 / s.len() as f64;
        if fraction > limits.max_fraction {
            let mut finding = Finding::new(
                RuleId::FrequentOutliers,
                Severity::Medium,
                &s.name,
                fraction,
                format!("{count} outliers ({:.0}% of readings)", fraction * 100.0),
            );
            finding.outlier_count = Some(count);
            out.push(finding);
        }
    }
}

/// Rough saturation temperature (°F) for a gauge pressure (PSI).
fn saturation_temp(psi: f64) -> f64 {
    32.0 + (psi - 14.7) * 0.25
}

fn subcooling(series: &RoleSeries, p: &ThresholdProfile, out: &mut Vec<Finding>) {
    let limits = &p.subcooling;
    for (pressure, temp) in pairs(&series.discharge_pressures, &series.discharge_temps) {
        let Some(sc) =
            stats::paired_mean(&pressure.values, &temp.values, |p, t| saturation_temp(p) - t)
        else {
            continue;
        };
        let (rule, severity) = if sc < limits.low.threshold {
            (RuleId::LowSubcooling, limits.low.severity)
        } else if sc > limits.high.threshold {
            (RuleId::HighSubcooling, limits.high.severity)
        } else {
            continue;
        };
        out.push(Finding::new(
            rule,
            severity,
            &pair_name(pressure, temp),
            sc,
            format!("est. {}", reading(sc, Role::DischargeTemp)),
        ));
    }
}
