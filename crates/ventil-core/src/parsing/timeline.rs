use crate::model::{Cell, ColumnRoleMap, Dataset};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Year assumed for day-month dates such as "31-May".
pub const DEFAULT_REFERENCE_YEAR: i32 = 2024;

/// Two-digit year formats come first: `%Y` would happily read "24" as year 24.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M:%S",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
];

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Inputs to timestamp construction that are not part of the table.
#[derive(Debug, Clone)]
pub struct TimelineOptions {
    /// Year used when a day-month date carries none.
    pub reference_year: i32,
    /// Date attached to time-only readings.
    pub today: NaiveDate,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        TimelineOptions {
            reference_year: DEFAULT_REFERENCE_YEAR,
            today: Local::now().date_naive(),
        }
    }
}

/// Where the per-row timestamps came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineSource {
    Datetime { column: usize },
    DateAndTime { date_column: usize, time_column: usize },
    DateOnly { column: usize },
    TimeOnly { column: usize },
    /// Evenly spaced hourly placeholders. Not real timestamps.
    Synthetic { reason: String },
}

/// One optional timestamp per dataset row, in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub timestamps: Vec<Option<NaiveDateTime>>,
    pub source: TimelineSource,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.source, TimelineSource::Synthetic { .. })
    }

    /// Rows that received a timestamp.
    pub fn parsed_count(&self) -> usize {
        self.timestamps.iter().filter(|t| t.is_some()).count()
    }
}

/// Build the per-row timeline from whichever timestamp columns were classified.
///
/// Rows that fail to parse get `None`. When the chosen source yields no
/// timestamp at all, the whole timeline switches to a synthetic hourly
/// sequence so downstream plotting keeps working.
pub fn build_timeline(
    dataset: &Dataset,
    roles: &ColumnRoleMap,
    options: &TimelineOptions,
) -> Timeline {
    let rows = dataset.rows();
    let year = options.reference_year;

    let (source, timestamps): (TimelineSource, Vec<Option<NaiveDateTime>>) =
        match (roles.datetime, roles.date, roles.time) {
            (Some(column), _, _) => (
                TimelineSource::Datetime { column },
                rows.iter()
                    .map(|row| text_at(row, column).and_then(|s| parse_datetime(&s, year)))
                    .collect(),
            ),
            (None, Some(date_column), Some(time_column)) => (
                TimelineSource::DateAndTime {
                    date_column,
                    time_column,
                },
                rows.iter()
                    .map(|row| {
                        let date = text_at(row, date_column)?;
                        let time = text_at(row, time_column)?;
                        combine_date_time(&date, &time, year)
                    })
                    .collect(),
            ),
            (None, Some(column), None) => (
                TimelineSource::DateOnly { column },
                rows.iter()
                    .map(|row| text_at(row, column).and_then(|s| parse_datetime(&s, year)))
                    .collect(),
            ),
            (None, None, Some(column)) => (
                TimelineSource::TimeOnly { column },
                rows.iter()
                    .map(|row| {
                        let text = text_at(row, column)?;
                        parse_time(&text).map(|t| options.today.and_time(t))
                    })
                    .collect(),
            ),
            (None, None, None) => {
                return synthetic(rows.len(), "no date or time column detected".into());
            }
        };

    let parsed = timestamps.iter().filter(|t| t.is_some()).count();
    if parsed == 0 && !rows.is_empty() {
        let reason = format!(
            "no row of the {} could be parsed",
            describe_source(&source, dataset.headers())
        );
        tracing::warn!(%reason, rows = rows.len(), "falling back to a synthetic hourly timeline");
        return synthetic(rows.len(), reason);
    }

    tracing::debug!(parsed, rows = rows.len(), "built timeline");
    Timeline { timestamps, source }
}

fn synthetic(rows: usize, reason: String) -> Timeline {
    let start = synthetic_start();
    let timestamps = (0..rows)
        .map(|i| Some(start + Duration::hours(i as i64)))
        .collect();
    Timeline {
        timestamps,
        source: TimelineSource::Synthetic { reason },
    }
}

/// First synthetic timestamp: 2024-01-01 00:00:00.
pub fn synthetic_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::default())
}

fn describe_source(source: &TimelineSource, headers: &[String]) -> String {
    let name = |i: &usize| headers.get(*i).map(String::as_str).unwrap_or("?");
    match source {
        TimelineSource::Datetime { column } => format!("timestamp column '{}'", name(column)),
        TimelineSource::DateAndTime {
            date_column,
            time_column,
        } => format!(
            "date/time columns '{}' and '{}'",
            name(date_column),
            name(time_column)
        ),
        TimelineSource::DateOnly { column } => format!("date column '{}'", name(column)),
        TimelineSource::TimeOnly { column } => format!("time column '{}'", name(column)),
        TimelineSource::Synthetic { .. } => "synthetic timeline".into(),
    }
}

fn text_at(row: &[Cell], column: usize) -> Option<String> {
    row.get(column).and_then(Cell::as_text)
}

/// Parse a combined date+time string, a date alone (midnight), or a
/// day-month date such as "31-May".
pub fn parse_datetime(s: &str, reference_year: i32) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(normalized) = normalize_day_month(s, reference_year) {
        return parse_datetime_plain(&normalized);
    }
    parse_datetime_plain(s)
}

fn parse_datetime_plain(s: &str) -> Option<NaiveDateTime> {
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    parse_date(s).map(|d| d.and_time(NaiveTime::default()))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a time of day ("14:30", "2:30 PM", "14:30:15.250").
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Join a date cell and a time cell with a single space and parse.
///
/// Spreadsheet exports often carry a midnight time inside the date cell
/// ("2024-05-31 00:00:00"); when the joined text does not parse, the date
/// part and the time part are parsed separately and combined.
pub fn combine_date_time(date: &str, time: &str, reference_year: i32) -> Option<NaiveDateTime> {
    let date = date.trim();
    let time = time.trim();
    let date = normalize_day_month(date, reference_year).unwrap_or_else(|| date.to_string());

    if let Some(dt) = parse_datetime_plain(&format!("{date} {time}")) {
        return Some(dt);
    }

    let day = parse_datetime_plain(&date)?.date();
    let time_of_day = parse_time(time).or_else(|| parse_datetime_plain(time).map(|dt| dt.time()))?;
    Some(day.and_time(time_of_day))
}

/// Rewrite a day-month date ("31-May", "5-jun-2023", "7-Aug-23") as
/// `YYYY-MM-DD`. Returns `None` when the text is not in that form.
pub fn normalize_day_month(s: &str, reference_year: i32) -> Option<String> {
    let parts: Vec<&str> = s.trim().split('-').collect();
    let (day, month, year) = match parts.as_slice() {
        [day, month] => (*day, *month, None),
        [day, month, year] => (*day, *month, Some(*year)),
        _ => return None,
    };

    if day.is_empty() || day.len() > 2 || !day.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let day: u32 = day.parse().ok()?;

    let month = month.to_lowercase();
    if month.len() != 3 {
        return None;
    }
    let month = MONTHS.iter().position(|m| *m == month)? + 1;

    let year = match year {
        None => reference_year,
        Some(y) if y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()) => y.parse().ok()?,
        Some(y) if y.len() == 2 && y.chars().all(|c| c.is_ascii_digit()) => {
            2000 + y.parse::<i32>().ok()?
        }
        Some(_) => return None,
    };

    Some(format!("{year:04}-{month:02}-{day:02}"))
}
