use crate::model::{ColumnRoleMap, Role};
use crate::trace::ColumnDecision;

/// Lower-cased views of one header used by the keyword rules.
struct HeaderKey {
    /// Trimmed, lower-cased header.
    lower: String,
    /// `lower` with every non-alphanumeric character removed.
    compact: String,
    /// `lower` split on non-alphanumeric characters.
    tokens: Vec<String>,
}

impl HeaderKey {
    fn new(header: &str) -> HeaderKey {
        let lower = header.trim().to_lowercase();
        let compact = lower.chars().filter(|c| c.is_alphanumeric()).collect();
        let tokens = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        HeaderKey {
            lower,
            compact,
            tokens,
        }
    }

    fn has(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    fn has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }

    fn compact_has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.compact.contains(n))
    }

    /// A whole token equal to `stem`, ignoring numbering ("RH", "rh2", "1OA").
    fn has_token(&self, stem: &str) -> bool {
        self.tokens.iter().any(|t| strip_numbering(t) == stem)
    }

    /// The whole header is `stem` with optional numbering ("SucPr1", "2SucT").
    fn is_tag(&self, stems: &[&str]) -> bool {
        let bare = strip_numbering(&self.compact);
        stems.iter().any(|s| bare == *s)
    }
}

fn strip_numbering(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_digit())
}

/// One step of the classification cascade.
struct HeaderRule {
    name: &'static str,
    role: Role,
    matches: fn(&HeaderKey) -> bool,
}

/// Rules in priority order. A header takes the role of the first rule that
/// matches and is not examined further.
const CASCADE: &[HeaderRule] = &[
    HeaderRule {
        name: "datetime",
        role: Role::Datetime,
        matches: is_datetime,
    },
    HeaderRule {
        name: "date",
        role: Role::Date,
        matches: |k| k.has("date"),
    },
    HeaderRule {
        name: "time",
        role: Role::Time,
        matches: |k| k.has("time"),
    },
    HeaderRule {
        name: "outdoor_humidity",
        role: Role::OutdoorHumidity,
        matches: |k| is_humidity(k) && is_outdoor(k),
    },
    HeaderRule {
        name: "indoor_humidity",
        role: Role::IndoorHumidity,
        matches: is_humidity,
    },
    HeaderRule {
        name: "indoor_temp",
        role: Role::IndoorTemp,
        matches: |k| k.compact_has_any(&["indoortemp", "roomtemp", "spacetemp", "zonetemp"]),
    },
    HeaderRule {
        name: "suction_temp",
        role: Role::SuctionTemp,
        matches: is_suction_temp,
    },
    HeaderRule {
        name: "supply_air_temp",
        role: Role::SupplyAirTemp,
        matches: is_supply_air_temp,
    },
    HeaderRule {
        name: "discharge_temp",
        role: Role::DischargeTemp,
        matches: |k| k.has("disch") && k.has("temp"),
    },
    HeaderRule {
        name: "outdoor_air_temp",
        role: Role::OutdoorAirTemp,
        matches: |k| {
            k.is_tag(&["oat"])
                || k.has_token("oat")
                || (is_outdoor(k) && k.has_any(&["temp", "air"]))
        },
    },
    HeaderRule {
        name: "suction_pressure",
        role: Role::SuctionPressure,
        matches: |k| {
            k.is_tag(&["sucpr", "suctpr", "sucp", "suctp", "sucpress"])
                || (k.has("suc") && k.has_any(&["pr", "pressure"]))
        },
    },
    HeaderRule {
        name: "discharge_pressure",
        role: Role::DischargePressure,
        matches: |k| {
            k.is_tag(&["dischg", "dischpr", "dischgpr", "headpr", "condpr"])
                || k.has_any(&["head pr", "cond pr"])
                || (k.has_any(&["discharge", "disch", "head", "cond"])
                    && k.has_any(&["pr", "pressure"]))
        },
    },
    HeaderRule {
        name: "cooling_setpoint",
        role: Role::CoolingSetpoint,
        matches: |k| k.has_any(&["cool", "csp"]) && k.has_any(&["sp", "setpoint"]),
    },
    HeaderRule {
        name: "heating_setpoint",
        role: Role::HeatingSetpoint,
        matches: |k| k.has_any(&["heat", "hsp"]) && k.has_any(&["sp", "setpoint"]),
    },
];

fn is_datetime(k: &HeaderKey) -> bool {
    k.has_any(&["timestamp", "datetime", "date time", "date/time", "date_time", "date-time"])
}

fn is_humidity(k: &HeaderKey) -> bool {
    k.has_any(&["rel hum", "relative humidity", "humidity"])
        || k.compact.contains("relhum")
        || k.has_token("rh")
}

fn is_outdoor(k: &HeaderKey) -> bool {
    k.has_any(&["outdoor", "outside"]) || k.has_token("oa")
}

fn is_suction_temp(k: &HeaderKey) -> bool {
    k.compact_has_any(&["suctiontemp", "suctemp", "sucttemp"])
        || (k.has_any(&["suction", "suct"]) && k.has("temp"))
        || k.is_tag(&["suct", "suctt", "sst"])
}

fn is_supply_air_temp(k: &HeaderKey) -> bool {
    k.has_any(&["supply air", "supply temp", "discharge air", "sa temp", "da temp"])
        || k.compact_has_any(&["supplyair", "supplytemp", "dischargeair"])
        || k.is_tag(&["sat", "dat", "satemp", "datemp"])
}

/// Classify a header list into semantic roles.
///
/// Never fails: unmatched headers are simply left out of the map.
pub fn classify_headers<S: AsRef<str>>(headers: &[S]) -> ColumnRoleMap {
    explain_headers(headers).0
}

/// Classify a header list and record which rule fired for every header.
pub fn explain_headers<S: AsRef<str>>(headers: &[S]) -> (ColumnRoleMap, Vec<ColumnDecision>) {
    let mut map = ColumnRoleMap::default();
    let mut decisions = Vec::with_capacity(headers.len());

    for (index, header) in headers.iter().enumerate() {
        let header = header.as_ref();
        let key = HeaderKey::new(header);
        let fired = CASCADE.iter().find(|rule| (rule.matches)(&key));

        let decision = match fired {
            Some(rule) => {
                let assigned = map.assign(rule.role, index);
                if assigned {
                    tracing::debug!(index, header, rule = rule.name, "classified column");
                } else {
                    tracing::debug!(
                        index,
                        header,
                        rule = rule.name,
                        "column matched an already assigned single-valued role, ignored"
                    );
                }
                ColumnDecision {
                    index,
                    header: header.to_string(),
                    role: assigned.then_some(rule.role),
                    rule: Some(rule.name.to_string()),
                }
            }
            None => {
                tracing::debug!(index, header, "unclassified column");
                ColumnDecision {
                    index,
                    header: header.to_string(),
                    role: None,
                    rule: None,
                }
            }
        };
        decisions.push(decision);
    }

    (map, decisions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(header: &str) -> Option<Role> {
        classify_headers(&[header]).role_of(0)
    }

    #[test]
    fn test_scenario_a_headers() {
        let map = classify_headers(&["Date", "Time", "SucPr1", "Dischg1"]);
        assert_eq!(map.date, Some(0));
        assert_eq!(map.time, Some(1));
        assert_eq!(map.suction_pressures, vec![2]);
        assert_eq!(map.discharge_pressures, vec![3]);
    }

    #[test]
    fn test_timestamp_keywords() {
        assert_eq!(role("Timestamp"), Some(Role::Datetime));
        assert_eq!(role("Date/Time"), Some(Role::Datetime));
        assert_eq!(role("DateTime (UTC)"), Some(Role::Datetime));
    }

    #[test]
    fn test_single_valued_roles_keep_first_occurrence() {
        let (map, decisions) = explain_headers(&["Date", "Update Date", "Run Time"]);
        assert_eq!(map.date, Some(0));
        assert_eq!(map.time, Some(2));
        assert_eq!(decisions[1].role, None);
        assert_eq!(decisions[1].rule.as_deref(), Some("date"));
    }

    #[test]
    fn test_humidity_split() {
        assert_eq!(role("Indoor RH"), Some(Role::IndoorHumidity));
        assert_eq!(role("Zone Humidity %"), Some(Role::IndoorHumidity));
        assert_eq!(role("OA RH"), Some(Role::OutdoorHumidity));
        assert_eq!(role("Outdoor Relative Humidity"), Some(Role::OutdoorHumidity));
        assert_eq!(role("%RH"), Some(Role::IndoorHumidity));
    }

    #[test]
    fn test_rh_is_a_token_not_a_substring() {
        assert_eq!(role("Superheat"), None);
    }

    #[test]
    fn test_indoor_temp_separator_variants() {
        assert_eq!(role("Indoor Temp"), Some(Role::IndoorTemp));
        assert_eq!(role("Indoor_Temp"), Some(Role::IndoorTemp));
        assert_eq!(role("RoomTemp"), Some(Role::IndoorTemp));
        assert_eq!(role("space-temp"), Some(Role::IndoorTemp));
    }

    #[test]
    fn test_suction_temp_forms() {
        assert_eq!(role("Suction Temp"), Some(Role::SuctionTemp));
        assert_eq!(role("Suction Line Temperature"), Some(Role::SuctionTemp));
        assert_eq!(role("SucT1"), Some(Role::SuctionTemp));
        assert_eq!(role("2SucT"), Some(Role::SuctionTemp));
    }

    #[test]
    fn test_supply_and_discharge_temps() {
        assert_eq!(role("Supply Air Temp"), Some(Role::SupplyAirTemp));
        assert_eq!(role("Discharge Air Temp"), Some(Role::SupplyAirTemp));
        assert_eq!(role("SAT"), Some(Role::SupplyAirTemp));
        assert_eq!(role("DAT2"), Some(Role::SupplyAirTemp));
        assert_eq!(role("Discharge Temp"), Some(Role::DischargeTemp));
        assert_eq!(role("Dischg Temp 1"), Some(Role::DischargeTemp));
    }

    #[test]
    fn test_discharge_temp_wins_over_pressure_keyword() {
        // "pr" appears but the discharge-temp rule comes first
        assert_eq!(role("Discharge Temp Probe"), Some(Role::DischargeTemp));
    }

    #[test]
    fn test_outdoor_air_temp() {
        assert_eq!(role("Outdoor Air Temp"), Some(Role::OutdoorAirTemp));
        assert_eq!(role("OA Temp"), Some(Role::OutdoorAirTemp));
        assert_eq!(role("OAT"), Some(Role::OutdoorAirTemp));
    }

    #[test]
    fn test_pressures() {
        assert_eq!(role("Suction Pressure"), Some(Role::SuctionPressure));
        assert_eq!(role("Suc Pr 2"), Some(Role::SuctionPressure));
        assert_eq!(role("Discharge Pressure"), Some(Role::DischargePressure));
        assert_eq!(role("Head Pr"), Some(Role::DischargePressure));
        assert_eq!(role("CondPr1"), Some(Role::DischargePressure));
        assert_eq!(role("Condenser Pressure"), Some(Role::DischargePressure));
    }

    #[test]
    fn test_setpoints() {
        assert_eq!(role("Cooling Setpoint"), Some(Role::CoolingSetpoint));
        assert_eq!(role("CSP"), Some(Role::CoolingSetpoint));
        assert_eq!(role("Heating SP"), Some(Role::HeatingSetpoint));
        assert_eq!(role("HSP"), Some(Role::HeatingSetpoint));
    }

    #[test]
    fn test_unmatched_header_is_dropped() {
        let (map, decisions) = explain_headers(&["Fan Status", "Compressor Amps"]);
        assert!(map.is_empty());
        assert!(decisions.iter().all(|d| d.role.is_none() && d.rule.is_none()));
    }

    #[test]
    fn test_empty_header_list() {
        let headers: [&str; 0] = [];
        assert_eq!(classify_headers(&headers), ColumnRoleMap::default());
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(role("  SUCTION PRESSURE  "), Some(Role::SuctionPressure));
    }
}
