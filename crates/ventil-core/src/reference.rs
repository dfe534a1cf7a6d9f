use crate::diagnose::catalog::IssueType;
use crate::diagnose::outcome::Finding;
use serde::{Deserialize, Serialize};

/// Background material for one known problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceProblem {
    pub title: String,
    pub symptoms: String,
    pub causes: String,
    pub diagnostics: Vec<String>,
    pub solutions: Vec<String>,
}

/// Reference problems for one issue category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSection {
    pub issue_type: IssueType,
    pub title: String,
    pub problems: Vec<ReferenceProblem>,
}

struct Entry {
    title: &'static str,
    symptoms: &'static str,
    causes: &'static str,
    diagnostics: &'static [&'static str],
    solutions: &'static [&'static str],
}

impl Entry {
    fn to_problem(&self) -> ReferenceProblem {
        ReferenceProblem {
            title: self.title.to_string(),
            symptoms: self.symptoms.to_string(),
            causes: self.causes.to_string(),
            diagnostics: self.diagnostics.iter().map(|s| s.to_string()).collect(),
            solutions: self.solutions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const REFRIGERANT: &[Entry] = &[
    Entry {
        title: "Low refrigerant charge",
        symptoms: "Low suction pressure, high superheat, low subcooling, poor cooling capacity",
        causes: "Leak at brazed joints, Schrader cores, flare fittings or coil tubing; undercharge at install",
        diagnostics: &[
            "Measure superheat and subcooling and compare to the manufacturer's chart",
            "Electronic or bubble leak test on joints and coils",
            "Check sight glass for bubbles on systems that have one",
        ],
        solutions: &[
            "Repair the leak before adding refrigerant",
            "Evacuate and weigh in the nameplate charge after major repairs",
        ],
    },
    Entry {
        title: "Overcharge or liquid line restriction",
        symptoms: "High subcooling, high head pressure, low superheat or starved evaporator",
        causes: "Refrigerant added without measurement, plugged filter drier, kinked liquid line",
        diagnostics: &[
            "Measure temperature drop across the filter drier",
            "Compare subcooling with the target value",
        ],
        solutions: &[
            "Recover refrigerant down to the nameplate charge",
            "Replace the filter drier",
        ],
    },
];

const CONDENSER: &[Entry] = &[
    Entry {
        title: "Condenser not rejecting heat",
        symptoms: "High discharge pressure, high compressor amperage, tripping on high pressure",
        causes: "Dirty coil, failed condenser fan, recirculating discharge air, non-condensables",
        diagnostics: &[
            "Measure condenser approach temperature (condensing minus ambient)",
            "Check fan motor amperage and blade rotation",
            "Inspect the coil face for debris and fin damage",
        ],
        solutions: &[
            "Clean condenser coil",
            "Replace the failed fan motor or capacitor",
            "Evacuate and recharge if non-condensables are suspected",
        ],
    },
    Entry {
        title: "Low head pressure",
        symptoms: "Low discharge pressure, reduced capacity at low ambient",
        causes: "Low charge, worn compressor, missing head pressure control",
        diagnostics: &[
            "Check compressor amperage against rated load amps",
            "Verify fan cycling controls",
        ],
        solutions: &[
            "Install or repair head pressure control",
            "Repair compressor valves or replace compressor",
        ],
    },
];

const EVAPORATOR: &[Entry] = &[Entry {
    title: "Frozen or starved evaporator",
    symptoms: "Suction line below freezing, ice on the coil, very cold supply air, reduced airflow",
    causes: "Dirty filters, slow blower, dirty coil, low charge, metering device failure",
    diagnostics: &[
        "Measure static pressure across the coil and filter",
        "Inspect the coil face and filters",
        "Check blower speed tap and belt tension",
    ],
    solutions: &[
        "Defrost the coil and restore airflow before charging",
        "Replace filters and clean the coil",
        "Correct blower speed",
    ],
}];

const COMPRESSOR: &[Entry] = &[
    Entry {
        title: "Short cycling",
        symptoms: "Frequent compressor starts, pressure spikes, poor humidity removal",
        causes: "Oversized equipment, thermostat too close to a supply register, pressure switch trips, low charge",
        diagnostics: &[
            "Count starts per hour from the log or a run-time meter",
            "Check pressure switch settings and wiring",
            "Check thermostat location and anticipator settings",
        ],
        solutions: &[
            "Set a minimum run time and anti-short-cycle delay",
            "Relocate the thermostat",
            "Correct refrigerant charge",
        ],
    },
    Entry {
        title: "Abnormal compression ratio",
        symptoms: "High discharge temperature, high amperage, or low pressure differential",
        causes: "High head pressure, low suction pressure, leaking compressor valves",
        diagnostics: &[
            "Compare absolute discharge and suction pressures",
            "Run a compressor pump-down test",
        ],
        solutions: &[
            "Correct the condenser or evaporator fault first",
            "Replace the compressor when valves leak",
        ],
    },
];

const CONTROL: &[Entry] = &[Entry {
    title: "Unstable control",
    symptoms: "Temperatures or pressures oscillating, space not holding setpoint",
    causes: "Aggressive PID tuning, narrow deadband, hunting expansion valve, staging delays too short",
    diagnostics: &[
        "Trend the controlled variable against its output",
        "Check TXV sensing bulb mounting and insulation",
        "Compare setpoints with actual schedules",
    ],
    solutions: &[
        "Widen the deadband or reduce proportional gain",
        "Lengthen staging delays",
        "Re-mount or replace the TXV bulb",
    ],
}];

const TEMPERATURE: &[Entry] = &[Entry {
    title: "Poor temperature control",
    symptoms: "Wide temperature swings, supply air too hot or too cold",
    causes: "Compressor not running, heating leak-through, oversized equipment, control faults",
    diagnostics: &[
        "Verify call for cooling versus compressor status",
        "Check heating valve seat and burner controls",
    ],
    solutions: &["Repair the failed stage", "Tune the control sequence"],
}];

const AIRFLOW: &[Entry] = &[Entry {
    title: "Incorrect airflow",
    symptoms: "Temperature split outside 15 to 25°F, noisy registers, cold coil",
    causes: "Dirty filters, closed dampers, duct leakage, wrong blower speed",
    diagnostics: &[
        "Measure the temperature split at the return and supply",
        "Measure external static pressure",
        "Inspect dampers and ducts",
    ],
    solutions: &[
        "Replace filters",
        "Open or rebalance dampers",
        "Seal duct leaks",
        "Adjust blower speed",
    ],
}];

const HUMIDITY: &[Entry] = &[Entry {
    title: "Humidity out of range",
    symptoms: "Clammy space, condensation, mould odour, or very dry air",
    causes: "High blower speed during cooling, oversized equipment, excessive outdoor air, blocked condensate drain",
    diagnostics: &[
        "Compare indoor and outdoor humidity trends",
        "Check outdoor air damper position",
        "Inspect the condensate drain and pan",
    ],
    solutions: &[
        "Reduce blower speed or enable dehumidification mode",
        "Adjust outdoor air minimums",
        "Add humidification during heating season",
    ],
}];

const AMBIENT: &[Entry] = &[Entry {
    title: "Extreme ambient conditions",
    symptoms: "Capacity loss in heat waves, low-pressure trips in cold weather",
    causes: "Operation outside the equipment design envelope",
    diagnostics: &[
        "Compare outdoor conditions with the equipment rating",
        "Verify low-ambient controls",
    ],
    solutions: &[
        "Keep the condenser clean and shaded",
        "Install low-ambient kits where cooling runs in winter",
    ],
}];

const SENSOR: &[Entry] = &[Entry {
    title: "Faulty or noisy sensor",
    symptoms: "Spikes, flat-lined or impossible readings in the trend log",
    causes: "Loose wiring, failed sensor, poor mounting, electrical interference, logger misconfiguration",
    diagnostics: &[
        "Compare against a calibrated handheld instrument",
        "Inspect wiring terminations and shielding",
        "Check logger sample interval and scaling",
    ],
    solutions: &[
        "Recalibrate or replace the sensor",
        "Repair wiring",
        "Correct logger configuration",
    ],
}];

fn section_for(issue: IssueType) -> (&'static str, &'static [Entry]) {
    match issue {
        IssueType::RefrigerantSystem => ("Refrigerant system", REFRIGERANT),
        IssueType::CondenserSystem => ("Condenser system", CONDENSER),
        IssueType::EvaporatorSystem => ("Evaporator system", EVAPORATOR),
        IssueType::CompressorSystem => ("Compressor system", COMPRESSOR),
        IssueType::ControlSystem => ("Control system", CONTROL),
        IssueType::TemperatureControl => ("Temperature control", TEMPERATURE),
        IssueType::AirflowSystem => ("Airflow system", AIRFLOW),
        IssueType::HumidityControl => ("Humidity control", HUMIDITY),
        IssueType::AmbientConditions => ("Ambient conditions", AMBIENT),
        IssueType::SensorSystem => ("Sensors", SENSOR),
    }
}

/// Reference material for every issue category present in `findings`, in
/// the order the categories first appear.
pub fn diagnostic_reference(findings: &[Finding]) -> Vec<ReferenceSection> {
    let mut seen: Vec<IssueType> = Vec::new();
    for f in findings {
        if !seen.contains(&f.issue_type) {
            seen.push(f.issue_type);
        }
    }

    seen.into_iter()
        .map(|issue_type| {
            let (title, entries) = section_for(issue_type);
            ReferenceSection {
                issue_type,
                title: title.to_string(),
                problems: entries.iter().map(Entry::to_problem).collect(),
            }
        })
        .collect()
}
