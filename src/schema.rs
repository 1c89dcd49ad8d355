//! Column layout of the occupancy extract and the weekday domain.
//!
//! One row of the source CSV is one calendar day for one car park: a
//! day-first date, a weekday label, eight stay-duration bucket counts,
//! the non-subscriber total, the subscriber count, and a free-text
//! comment field.

use crate::error::{ParkstatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date column, `DD/MM/YYYY` in the raw file.
pub const DATE: &str = "Date";
/// Weekday label column.
pub const DAY: &str = "Day";
/// Aggregate of the duration buckets, excluding subscribers.
pub const TOTAL_EXC_SUB: &str = "Total Exc Sub";
/// Subscriber (contract parking) count column.
pub const SUBSCRIBERS: &str = "Subscribers";
/// Free-text annotation column.
pub const COMMENTS: &str = "Comments";

/// The eight stay-duration bucket columns, shortest stay first.
pub const DURATION_BUCKETS: [&str; 8] = [
    "Up to 1 hr",
    "1 to 2 hrs",
    "2 to 3 hrs",
    "3 to 4 hrs",
    "4 to 5 hrs",
    "5 to 6 hrs",
    "6 to <24 hours",
    "24 hours +",
];

/// The nine repairable count columns: the duration buckets plus
/// `Subscribers`. `Total Exc Sub` is coerced separately because it also
/// passes through the negative-floor correction.
pub fn count_columns() -> Vec<String> {
    let mut cols: Vec<String> = DURATION_BUCKETS.iter().map(|s| s.to_string()).collect();
    cols.push(SUBSCRIBERS.to_string());
    cols
}

/// All columns expected in the extract, in source order.
pub fn expected_columns() -> Vec<String> {
    let mut cols = vec![DATE.to_string(), DAY.to_string()];
    cols.extend(DURATION_BUCKETS.iter().map(|s| s.to_string()));
    cols.push(TOTAL_EXC_SUB.to_string());
    cols.push(SUBSCRIBERS.to_string());
    cols.push(COMMENTS.to_string());
    cols
}

/// Day of week, ordered Mon through Sun.
///
/// The `Day` column stays a string column in the frame; this enum is the
/// validated domain, and its ordering drives every per-weekday output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All weekdays in canonical order, Mon first, Sun last.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Canonical short label as it appears in the cleaned column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ParkstatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Mon" => Ok(Weekday::Mon),
            "Tue" => Ok(Weekday::Tue),
            "Wed" => Ok(Weekday::Wed),
            "Thu" => Ok(Weekday::Thu),
            "Fri" => Ok(Weekday::Fri),
            "Sat" => Ok(Weekday::Sat),
            "Sun" => Ok(Weekday::Sun),
            other => Err(ParkstatError::UnknownWeekday {
                column: DAY.to_string(),
                value: other.to_string(),
            }),
        }
    }
}
