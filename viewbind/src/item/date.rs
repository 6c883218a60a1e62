//! Date input formats and normalisation for date-range items.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Stored value format for full dates, e.g. `2021-03-01T00:00:00+00:00`.
pub const DATE_VALUE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Stored value format for year-month inputs, e.g. `2021-03`.
pub const YEAR_MONTH_FORMAT: &str = "%Y-%m";

/// Display formats a date input may be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputDateFormat {
    #[serde(rename = "YYYY/MM/DD")]
    SlashPadded,
    #[serde(rename = "YYYY/M/D")]
    Slash,
    #[serde(rename = "YYYYMMDD")]
    CompactPadded,
    #[serde(rename = "YYYYMD")]
    Compact,
    #[serde(rename = "YYYY.MM.DD")]
    DotPadded,
    #[serde(rename = "YYYY.M.D")]
    Dot,
    #[serde(rename = "YYYYMM")]
    YearMonthCompact,
    #[serde(rename = "YYYY/MM")]
    YearMonthSlash,
}

impl InputDateFormat {
    /// Whether inputs in this format carry no day component.
    pub fn is_year_month(&self) -> bool {
        matches!(self, Self::YearMonthCompact | Self::YearMonthSlash)
    }

    /// `chrono` pattern used to render a stored value for display.
    pub fn display_pattern(&self) -> &'static str {
        match self {
            Self::SlashPadded => "%Y/%m/%d",
            Self::Slash => "%Y/%-m/%-d",
            Self::CompactPadded => "%Y%m%d",
            Self::Compact => "%Y%-m%-d",
            Self::DotPadded => "%Y.%m.%d",
            Self::Dot => "%Y.%-m.%-d",
            Self::YearMonthCompact => "%Y%m",
            Self::YearMonthSlash => "%Y/%m",
        }
    }
}

const FULL_DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];
const YEAR_MONTH_PATTERNS: &[&str] = &["%Y-%m", "%Y/%m", "%Y%m", "%Y.%m"];

/// Parse a loosely formatted date into a calendar date.
///
/// Accepts RFC 3339 timestamps, the full-date forms `2021-03-01`,
/// `2021/3/1`, `2021.03.01`, `20210301`, and year-month forms (which
/// resolve to the first of the month).
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }

    FULL_DATE_PATTERNS
        .iter()
        .find_map(|p| NaiveDate::parse_from_str(input, p).ok())
        .or_else(|| {
            // chrono needs a day to build a date
            let with_day = format!("{input}-01");
            YEAR_MONTH_PATTERNS
                .iter()
                .find_map(|p| NaiveDate::parse_from_str(&with_day, &format!("{p}-%d")).ok())
        })
}

/// Normalise a user input into the stored value format.
///
/// Empty and unparsable inputs collapse to `None`.
pub fn normalize_date(input: Option<&str>, year_month: bool) -> Option<String> {
    let date = parse_date(input?)?;
    if year_month {
        Some(date.format(YEAR_MONTH_FORMAT).to_string())
    } else {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        Some(midnight.format(DATE_VALUE_FORMAT).to_string())
    }
}
