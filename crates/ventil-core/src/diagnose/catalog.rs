use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment subsystem a finding points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    RefrigerantSystem,
    CondenserSystem,
    EvaporatorSystem,
    CompressorSystem,
    ControlSystem,
    TemperatureControl,
    AirflowSystem,
    HumidityControl,
    AmbientConditions,
    SensorSystem,
}

impl IssueType {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::RefrigerantSystem => "refrigerant_system",
            IssueType::CondenserSystem => "condenser_system",
            IssueType::EvaporatorSystem => "evaporator_system",
            IssueType::CompressorSystem => "compressor_system",
            IssueType::ControlSystem => "control_system",
            IssueType::TemperatureControl => "temperature_control",
            IssueType::AirflowSystem => "airflow_system",
            IssueType::HumidityControl => "humidity_control",
            IssueType::AmbientConditions => "ambient_conditions",
            IssueType::SensorSystem => "sensor_system",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every branch of every diagnostic rule.
///
/// The title, explanation, suggestions, issue type and priority of a
/// finding are fixed per rule; only the column and the statistic vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    LowSuctionPressure,
    HighSuctionPressure,
    SuctionPressureInstability,
    HighDischargePressure,
    LowDischargePressure,
    DischargePressureInstability,
    HighSuctionTemp,
    LowSuctionTemp,
    SuctionTempInstability,
    HighSupplyTemp,
    VeryLowSupplyTemp,
    WideSupplySpread,
    HighTemperatureVariation,
    HighCompressionRatio,
    LowCompressionRatio,
    HighOutdoorHumidity,
    LowOutdoorHumidity,
    HighIndoorHumidity,
    LowIndoorHumidity,
    HumidityInstability,
    ExtremeOutdoorHeat,
    ExtremeOutdoorCold,
    EvaporatorIcingRisk,
    LowTemperatureSplit,
    HighTemperatureSplit,
    SetpointOvershoot,
    SetpointUndershoot,
    ShortCycling,
    ControlHunting,
    GradualPressureDecline,
    FrequentOutliers,
    LowSubcooling,
    HighSubcooling,
}

const CHECK_CHARGE: &str = "Check refrigerant charge with gauges and compare to the nameplate";
const LEAK_CHECK: &str =
    "Leak-check the refrigerant circuit (brazed joints, service valves, coils)";
const CHECK_FILTERS: &str = "Inspect and replace air filters";
const CHECK_AIRFLOW: &str = "Verify indoor blower speed and airflow across the evaporator";
const CLEAN_EVAP: &str = "Inspect and clean the evaporator coil";
const CLEAN_CONDENSER: &str = "Clean condenser coil";
const CHECK_CONDENSER_FAN: &str = "Verify condenser fan operation and motor amperage";
const CHECK_METERING: &str = "Check the metering device (TXV bulb contact and superheat setting)";
const TUNE_CONTROLS: &str = "Review control loop tuning (deadband, PID gains, staging delays)";
const CALIBRATE_SENSORS: &str = "Verify sensor calibration against a reference instrument";
const CHECK_THERMOSTAT: &str = "Check thermostat location, calibration and schedule";
const CHECK_COMPRESSOR: &str = "Measure compressor amperage and check valve efficiency";
const CHECK_DUCTS: &str = "Inspect ductwork for leaks and closed dampers";

impl RuleId {
    /// Every rule, in declaration order.
    pub const ALL: [RuleId; 33] = [
        RuleId::LowSuctionPressure,
        RuleId::HighSuctionPressure,
        RuleId::SuctionPressureInstability,
        RuleId::HighDischargePressure,
        RuleId::LowDischargePressure,
        RuleId::DischargePressureInstability,
        RuleId::HighSuctionTemp,
        RuleId::LowSuctionTemp,
        RuleId::SuctionTempInstability,
        RuleId::HighSupplyTemp,
        RuleId::VeryLowSupplyTemp,
        RuleId::WideSupplySpread,
        RuleId::HighTemperatureVariation,
        RuleId::HighCompressionRatio,
        RuleId::LowCompressionRatio,
        RuleId::HighOutdoorHumidity,
        RuleId::LowOutdoorHumidity,
        RuleId::HighIndoorHumidity,
        RuleId::LowIndoorHumidity,
        RuleId::HumidityInstability,
        RuleId::ExtremeOutdoorHeat,
        RuleId::ExtremeOutdoorCold,
        RuleId::EvaporatorIcingRisk,
        RuleId::LowTemperatureSplit,
        RuleId::HighTemperatureSplit,
        RuleId::SetpointOvershoot,
        RuleId::SetpointUndershoot,
        RuleId::ShortCycling,
        RuleId::ControlHunting,
        RuleId::GradualPressureDecline,
        RuleId::FrequentOutliers,
        RuleId::LowSubcooling,
        RuleId::HighSubcooling,
    ];

    pub fn title(self) -> &'static str {
        match self {
            RuleId::LowSuctionPressure => "Low suction pressure",
            RuleId::HighSuctionPressure => "High suction pressure",
            RuleId::SuctionPressureInstability => "Unstable suction pressure",
            RuleId::HighDischargePressure => "High discharge pressure",
            RuleId::LowDischargePressure => "Low discharge pressure",
            RuleId::DischargePressureInstability => "Unstable discharge pressure",
            RuleId::HighSuctionTemp => "High suction temperature",
            RuleId::LowSuctionTemp => "Low suction temperature",
            RuleId::SuctionTempInstability => "Unstable suction temperature",
            RuleId::HighSupplyTemp => "High supply/discharge temperature",
            RuleId::VeryLowSupplyTemp => "Very low supply temperature",
            RuleId::WideSupplySpread => "Wide supply temperature swing",
            RuleId::HighTemperatureVariation => "High temperature variation",
            RuleId::HighCompressionRatio => "High compression ratio",
            RuleId::LowCompressionRatio => "Low compression ratio",
            RuleId::HighOutdoorHumidity => "High outdoor humidity",
            RuleId::LowOutdoorHumidity => "Low outdoor humidity",
            RuleId::HighIndoorHumidity => "High indoor humidity",
            RuleId::LowIndoorHumidity => "Low indoor humidity",
            RuleId::HumidityInstability => "Unstable indoor humidity",
            RuleId::ExtremeOutdoorHeat => "Extreme outdoor heat",
            RuleId::ExtremeOutdoorCold => "Freezing outdoor temperature",
            RuleId::EvaporatorIcingRisk => "Evaporator icing risk",
            RuleId::LowTemperatureSplit => "Low temperature split",
            RuleId::HighTemperatureSplit => "High temperature split",
            RuleId::SetpointOvershoot => "Space above cooling setpoint",
            RuleId::SetpointUndershoot => "Space below cooling setpoint",
            RuleId::ShortCycling => "Short cycling",
            RuleId::ControlHunting => "Control hunting",
            RuleId::GradualPressureDecline => "Gradual pressure decline",
            RuleId::FrequentOutliers => "Frequent outlier readings",
            RuleId::LowSubcooling => "Low subcooling",
            RuleId::HighSubcooling => "High subcooling",
        }
    }

    pub fn issue_type(self) -> IssueType {
        use IssueType::*;
        match self {
            RuleId::LowSuctionPressure | RuleId::HighSuctionPressure => RefrigerantSystem,
            RuleId::SuctionPressureInstability => ControlSystem,
            RuleId::HighDischargePressure | RuleId::LowDischargePressure => CondenserSystem,
            RuleId::DischargePressureInstability => ControlSystem,
            RuleId::HighSuctionTemp => RefrigerantSystem,
            RuleId::LowSuctionTemp => EvaporatorSystem,
            RuleId::SuctionTempInstability => ControlSystem,
            RuleId::HighSupplyTemp => TemperatureControl,
            RuleId::VeryLowSupplyTemp => AirflowSystem,
            RuleId::WideSupplySpread => ControlSystem,
            RuleId::HighTemperatureVariation => TemperatureControl,
            RuleId::HighCompressionRatio | RuleId::LowCompressionRatio => CompressorSystem,
            RuleId::HighOutdoorHumidity | RuleId::LowOutdoorHumidity => AmbientConditions,
            RuleId::HighIndoorHumidity
            | RuleId::LowIndoorHumidity
            | RuleId::HumidityInstability => HumidityControl,
            RuleId::ExtremeOutdoorHeat | RuleId::ExtremeOutdoorCold => AmbientConditions,
            RuleId::EvaporatorIcingRisk => EvaporatorSystem,
            RuleId::LowTemperatureSplit | RuleId::HighTemperatureSplit => AirflowSystem,
            RuleId::SetpointOvershoot | RuleId::SetpointUndershoot => ControlSystem,
            RuleId::ShortCycling => CompressorSystem,
            RuleId::ControlHunting => ControlSystem,
            RuleId::GradualPressureDecline => RefrigerantSystem,
            RuleId::FrequentOutliers => SensorSystem,
            RuleId::LowSubcooling | RuleId::HighSubcooling => RefrigerantSystem,
        }
    }

    /// Lower is more urgent.
    pub fn priority(self) -> u8 {
        match self {
            RuleId::LowSuctionPressure
            | RuleId::HighDischargePressure
            | RuleId::LowSuctionTemp
            | RuleId::HighSupplyTemp
            | RuleId::HighCompressionRatio
            | RuleId::EvaporatorIcingRisk => 1,
            RuleId::HighSuctionPressure
            | RuleId::HighSuctionTemp
            | RuleId::VeryLowSupplyTemp
            | RuleId::LowCompressionRatio
            | RuleId::HighIndoorHumidity
            | RuleId::LowTemperatureSplit
            | RuleId::HighTemperatureSplit
            | RuleId::SetpointOvershoot
            | RuleId::ShortCycling
            | RuleId::GradualPressureDecline
            | RuleId::LowSubcooling => 2,
            RuleId::SuctionPressureInstability
            | RuleId::LowDischargePressure
            | RuleId::DischargePressureInstability
            | RuleId::WideSupplySpread
            | RuleId::ExtremeOutdoorHeat
            | RuleId::ControlHunting => 3,
            RuleId::SuctionTempInstability
            | RuleId::HighTemperatureVariation
            | RuleId::HighOutdoorHumidity
            | RuleId::LowIndoorHumidity
            | RuleId::HumidityInstability
            | RuleId::SetpointUndershoot
            | RuleId::HighSubcooling => 4,
            RuleId::LowOutdoorHumidity | RuleId::ExtremeOutdoorCold | RuleId::FrequentOutliers => {
                5
            }
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            RuleId::LowSuctionPressure => {
                "Suction pressure well below the normal operating range usually means the \
                 evaporator is starved: low refrigerant charge, a restriction in the liquid line \
                 or metering device, or too little airflow over the coil."
            }
            RuleId::HighSuctionPressure => {
                "Elevated suction pressure points to an overcharged system, a metering device \
                 stuck open, a high heat load on the evaporator, or worn compressor valves."
            }
            RuleId::SuctionPressureInstability => {
                "Large swings in suction pressure indicate the refrigerant feed or compressor \
                 staging is not settling, often from a hunting TXV or aggressive staging."
            }
            RuleId::HighDischargePressure => {
                "High head pressure means the condenser cannot reject heat fast enough: dirty \
                 coil, failed condenser fan, non-condensables, overcharge or recirculating air."
            }
            RuleId::LowDischargePressure => {
                "Low head pressure suggests low charge, an inefficient compressor, or excessive \
                 condenser capacity at low ambient without head pressure control."
            }
            RuleId::DischargePressureInstability => {
                "Discharge pressure is swinging widely, typical of condenser fan cycling, \
                 compressor staging or an unstable refrigerant feed."
            }
            RuleId::HighSuctionTemp => {
                "Warm suction gas means high superheat: the evaporator is underfed, so the \
                 compressor runs hot and capacity drops."
            }
            RuleId::LowSuctionTemp => {
                "Very cold suction gas indicates low evaporator load or flooding, risking coil \
                 frost and liquid reaching the compressor."
            }
            RuleId::SuctionTempInstability => {
                "Suction temperature varies more than expected, a sign of an unstable metering \
                 device or fluctuating load."
            }
            RuleId::HighSupplyTemp => {
                "Supply or discharge air this hot suggests cooling is not happening or heating \
                 is running uncontrolled."
            }
            RuleId::VeryLowSupplyTemp => {
                "Very cold supply air points to low airflow across the evaporator or an \
                 overfed coil, both of which can freeze the coil."
            }
            RuleId::WideSupplySpread => {
                "Supply temperature swings over a wide band, meaning capacity control is \
                 cycling rather than modulating."
            }
            RuleId::HighTemperatureVariation => {
                "This temperature point varies over a wide range during the log, which \
                 points to poor control or intermittent operation."
            }
            RuleId::HighCompressionRatio => {
                "The ratio of discharge to suction pressure is high, increasing compressor \
                 heat and wear. Usually caused by high head pressure or low suction pressure."
            }
            RuleId::LowCompressionRatio => {
                "A low compression ratio indicates the compressor is not pumping effectively, \
                 for example leaking valves or a bypassing reversing valve."
            }
            RuleId::HighOutdoorHumidity => {
                "High ambient humidity raises latent load on the system and can explain higher \
                 run times and indoor humidity."
            }
            RuleId::LowOutdoorHumidity => {
                "Very dry outdoor air. Check that this matches local weather; otherwise the \
                 sensor may be faulty."
            }
            RuleId::HighIndoorHumidity => {
                "Indoor humidity above 60% encourages mould growth and discomfort. The system \
                 is not removing enough moisture."
            }
            RuleId::LowIndoorHumidity => {
                "Indoor air is very dry, which causes discomfort and static. Often seasonal or \
                 caused by excessive outdoor air."
            }
            RuleId::HumidityInstability => {
                "Indoor humidity varies strongly, suggesting intermittent dehumidification or \
                 large ventilation swings."
            }
            RuleId::ExtremeOutdoorHeat => {
                "Outdoor temperatures above the typical design condition push head pressure up \
                 and can exceed equipment capacity."
            }
            RuleId::ExtremeOutdoorCold => {
                "Outdoor temperatures dropped below freezing. Cooling operation in these \
                 conditions needs low-ambient controls."
            }
            RuleId::EvaporatorIcingRisk => {
                "Suction line readings below 32°F mean the evaporator surface can freeze, \
                 blocking airflow and risking liquid slugging."
            }
            RuleId::LowTemperatureSplit => {
                "The difference between room and supply air is small, so the coil is removing \
                 little heat: low charge, high airflow or a dirty coil."
            }
            RuleId::HighTemperatureSplit => {
                "The difference between room and supply air is large, typically caused by low \
                 airflow across the coil."
            }
            RuleId::SetpointOvershoot => {
                "The space runs warmer than the cooling setpoint on average, so the system is \
                 not keeping up with the load."
            }
            RuleId::SetpointUndershoot => {
                "The space runs cooler than the cooling setpoint on average, wasting energy \
                 and indicating control issues."
            }
            RuleId::ShortCycling => {
                "Pressure readings show frequent abrupt jumps, consistent with the compressor \
                 starting and stopping too often."
            }
            RuleId::ControlHunting => {
                "The reading alternates direction on most samples, a sign of a control loop \
                 oscillating around its setpoint."
            }
            RuleId::GradualPressureDecline => {
                "Discharge pressure fell steadily between the first and second half of the \
                 log, a pattern consistent with a slow refrigerant leak."
            }
            RuleId::FrequentOutliers => {
                "An unusually large share of readings fall outside the normal statistical \
                 range, which usually indicates a faulty or poorly mounted sensor."
            }
            RuleId::LowSubcooling => {
                "Estimated liquid subcooling is low, typical of undercharge or a condenser \
                 that cannot fully condense the refrigerant."
            }
            RuleId::HighSubcooling => {
                "Estimated liquid subcooling is high, typical of overcharge or a restriction \
                 in the liquid line."
            }
        }
    }

    /// Ordered technician suggestions.
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            RuleId::LowSuctionPressure => {
                &[CHECK_CHARGE, LEAK_CHECK, CHECK_FILTERS, CHECK_METERING]
            }
            RuleId::HighSuctionPressure => &[
                CHECK_CHARGE,
                CHECK_METERING,
                CHECK_COMPRESSOR,
                "Confirm the space load is within equipment capacity",
            ],
            RuleId::SuctionPressureInstability => &[CHECK_METERING, TUNE_CONTROLS, CHECK_CHARGE],
            RuleId::HighDischargePressure => &[
                CLEAN_CONDENSER,
                CHECK_CONDENSER_FAN,
                "Check for non-condensables and overcharge",
                "Remove obstructions and hot-air recirculation around the condenser",
            ],
            RuleId::LowDischargePressure => &[
                CHECK_CHARGE,
                CHECK_COMPRESSOR,
                "Check head pressure control at low ambient",
            ],
            RuleId::DischargePressureInstability => &[
                CHECK_CONDENSER_FAN,
                TUNE_CONTROLS,
                "Review compressor staging sequence",
            ],
            RuleId::HighSuctionTemp => &[CHECK_CHARGE, CHECK_METERING, LEAK_CHECK],
            RuleId::LowSuctionTemp => &[
                CHECK_AIRFLOW,
                CHECK_FILTERS,
                CLEAN_EVAP,
                CHECK_METERING,
            ],
            RuleId::SuctionTempInstability => &[CHECK_METERING, CALIBRATE_SENSORS],
            RuleId::HighSupplyTemp => &[
                "Confirm the compressor is running when cooling is called",
                CHECK_CHARGE,
                "Check heating valve or burner control for lockout or leak-through",
            ],
            RuleId::VeryLowSupplyTemp => &[CHECK_AIRFLOW, CHECK_FILTERS, CLEAN_EVAP],
            RuleId::WideSupplySpread => &[TUNE_CONTROLS, "Review compressor staging sequence"],
            RuleId::HighTemperatureVariation => {
                &[TUNE_CONTROLS, CHECK_THERMOSTAT, CALIBRATE_SENSORS]
            }
            RuleId::HighCompressionRatio => &[CLEAN_CONDENSER, CHECK_CHARGE, CHECK_COMPRESSOR],
            RuleId::LowCompressionRatio => &[
                CHECK_COMPRESSOR,
                "Check reversing valve and hot gas bypass for leakage",
            ],
            RuleId::HighOutdoorHumidity => &[
                "Review outdoor air damper minimum position",
                "Consider dehumidification sequences during humid weather",
            ],
            RuleId::LowOutdoorHumidity => &[CALIBRATE_SENSORS],
            RuleId::HighIndoorHumidity => &[
                "Lower blower speed during cooling to increase moisture removal",
                "Review outdoor air damper minimum position",
                CHECK_CHARGE,
                "Check the condensate drain for blockage",
            ],
            RuleId::LowIndoorHumidity => &[
                "Review outdoor air damper minimum position",
                "Consider humidification during heating season",
            ],
            RuleId::HumidityInstability => &[TUNE_CONTROLS, CALIBRATE_SENSORS],
            RuleId::ExtremeOutdoorHeat => &[CLEAN_CONDENSER, "Shade the condenser from direct sun"],
            RuleId::ExtremeOutdoorCold => &[
                "Verify low-ambient lockout and head pressure control",
                "Check crankcase heater operation",
            ],
            RuleId::EvaporatorIcingRisk => &[
                CHECK_AIRFLOW,
                CHECK_FILTERS,
                CHECK_CHARGE,
                "Defrost the coil before further testing",
            ],
            RuleId::LowTemperatureSplit => &[CHECK_CHARGE, CHECK_AIRFLOW, CLEAN_EVAP],
            RuleId::HighTemperatureSplit => &[CHECK_FILTERS, CHECK_AIRFLOW, CHECK_DUCTS],
            RuleId::SetpointOvershoot => &[
                CHECK_THERMOSTAT,
                "Confirm equipment capacity matches the cooling load",
                CHECK_CHARGE,
            ],
            RuleId::SetpointUndershoot => &[CHECK_THERMOSTAT, TUNE_CONTROLS],
            RuleId::ShortCycling => &[
                "Check anti-short-cycle timer and minimum run time settings",
                CHECK_THERMOSTAT,
                "Check high and low pressure switches for nuisance trips",
                CHECK_CHARGE,
            ],
            RuleId::ControlHunting => &[TUNE_CONTROLS, CALIBRATE_SENSORS],
            RuleId::GradualPressureDecline => &[LEAK_CHECK, CHECK_CHARGE],
            RuleId::FrequentOutliers => &[
                CALIBRATE_SENSORS,
                "Check sensor wiring and mounting",
                "Review data logger sampling configuration",
            ],
            RuleId::LowSubcooling => &[CHECK_CHARGE, LEAK_CHECK, CLEAN_CONDENSER],
            RuleId::HighSubcooling => &[
                "Recover excess refrigerant to the nameplate charge",
                "Check the liquid line filter drier for restriction",
            ],
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condenser_rule_content() {
        let rule = RuleId::HighDischargePressure;
        assert_eq!(rule.issue_type(), IssueType::CondenserSystem);
        assert_eq!(rule.priority(), 1);
        assert!(rule.suggestions().contains(&"Clean condenser coil"));
    }

    #[test]
    fn test_every_rule_has_suggestions() {
        for rule in RuleId::ALL {
            assert!(!rule.suggestions().is_empty(), "{rule:?}");
            assert!(!rule.explanation().is_empty(), "{rule:?}");
            assert!(!rule.title().is_empty(), "{rule:?}");
            assert!((1..=5).contains(&rule.priority()), "{rule:?}");
        }
    }

    #[test]
    fn test_all_lists_each_rule_once() {
        let mut names: Vec<String> = RuleId::ALL
            .iter()
            .map(|r| serde_json::to_string(r).unwrap())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), RuleId::ALL.len());
    }

    #[test]
    fn test_issue_type_serializes_snake_case() {
        let json = serde_json::to_string(&IssueType::CondenserSystem).unwrap();
        assert_eq!(json, "\"condenser_system\"");
        assert_eq!(IssueType::SensorSystem.to_string(), "sensor_system");
    }
}
