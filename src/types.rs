//! Type definitions for serial-date
//!
//! This module defines the values passed through the lite and calendar layers:
//! the format specifiers, period types, the instant itself and the tagged
//! union used for polymorphic date input.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{DateUtilError, Result};
use crate::lite::civil;

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Whole days between 1899-12-30 (serial 0) and 1970-01-01.
pub const EXCEL_UNIX_EPOCH_OFFSET: f64 = 25_569.0;

/// Serial day counts below this are treated as plain numbers rather than dates.
pub const DATE_SERIAL_NUMBER_CUTOFF: i64 = 10_000;

/// Largest distance from the UNIX epoch an [`Instant`] may have, in milliseconds.
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Predefined output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    /// `20170331`
    #[serde(rename = "yyyymmdd")]
    Yyyymmdd,
    /// `2017-03-31T20:43:47.314Z`
    #[serde(rename = "iso8601")]
    Iso8601,
    /// `20170331T000000Z`
    #[serde(rename = "amz-iso8601")]
    AmzIso8601,
    /// `20170331204347314`
    #[serde(rename = "yyyymmddhhmmssmmm")]
    YyyymmddHhmmssMmm,
    /// `2017-03-31`
    #[serde(rename = "yyyy-mm-dd")]
    YyyyMmDd,
    /// Excel serial number, e.g. `42825.86374206019`
    #[serde(rename = "excel")]
    ExcelSerial,
}

impl DateFormat {
    /// Every format, in declaration order.
    pub const ALL: [DateFormat; 6] = [
        DateFormat::Yyyymmdd,
        DateFormat::Iso8601,
        DateFormat::AmzIso8601,
        DateFormat::YyyymmddHhmmssMmm,
        DateFormat::YyyyMmDd,
        DateFormat::ExcelSerial,
    ];

    /// Lookup key, also used as the serde name.
    pub fn key(self) -> &'static str {
        match self {
            DateFormat::Yyyymmdd => "yyyymmdd",
            DateFormat::Iso8601 => "iso8601",
            DateFormat::AmzIso8601 => "amz-iso8601",
            DateFormat::YyyymmddHhmmssMmm => "yyyymmddhhmmssmmm",
            DateFormat::YyyyMmDd => "yyyy-mm-dd",
            DateFormat::ExcelSerial => "excel",
        }
    }

    /// Name of the public constant, e.g. `AMZ_ISO8601`.
    pub fn constant_name(self) -> &'static str {
        match self {
            DateFormat::Yyyymmdd => "YYYYMMDD",
            DateFormat::Iso8601 => "ISO8601",
            DateFormat::AmzIso8601 => "AMZ_ISO8601",
            DateFormat::YyyymmddHhmmssMmm => "YYYYMMDDHHMMSSMMM",
            DateFormat::YyyyMmDd => "YYYY-MM-DD",
            DateFormat::ExcelSerial => "EXCEL_SERIAL",
        }
    }
}

impl FromStr for DateFormat {
    type Err = DateUtilError;

    /// Accepts either the lookup key or the constant name.
    fn from_str(s: &str) -> Result<Self> {
        DateFormat::ALL
            .into_iter()
            .find(|f| f.key() == s || f.constant_name() == s)
            .ok_or_else(|| DateUtilError::UnknownFormat(s.to_string()))
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Calendar period selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Year,
    Month,
    Day,
    Week,
    Quarter,
    Half,
}

impl PeriodType {
    pub fn name(self) -> &'static str {
        match self {
            PeriodType::Year => "year",
            PeriodType::Month => "month",
            PeriodType::Day => "day",
            PeriodType::Week => "week",
            PeriodType::Quarter => "quarter",
            PeriodType::Half => "half",
        }
    }
}

impl FromStr for PeriodType {
    type Err = DateUtilError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "year" => Ok(PeriodType::Year),
            "month" => Ok(PeriodType::Month),
            "day" => Ok(PeriodType::Day),
            "week" => Ok(PeriodType::Week),
            "quarter" => Ok(PeriodType::Quarter),
            "half" => Ok(PeriodType::Half),
            _ => Err(DateUtilError::UnknownPeriod(s.to_string())),
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of formatting an instant: a string for the text templates,
/// a number for the Excel serial format.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedDate {
    Text(String),
    Serial(f64),
}

impl FormattedDate {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormattedDate::Text(s) => Some(s),
            FormattedDate::Serial(_) => None,
        }
    }

    pub fn as_serial(&self) -> Option<f64> {
        match self {
            FormattedDate::Text(_) => None,
            FormattedDate::Serial(v) => Some(*v),
        }
    }
}

impl fmt::Display for FormattedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattedDate::Text(s) => f.write_str(s),
            FormattedDate::Serial(v) => write!(f, "{v}"),
        }
    }
}

/// UTC calendar fields of an [`Instant`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDateTime {
    pub year: i64,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

/// An absolute point in time: milliseconds since 1970-01-01T00:00:00Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    millis: i64,
}

impl Instant {
    /// The UNIX epoch.
    pub const EPOCH: Instant = Instant { millis: 0 };

    /// Fails when `millis` is outside ±[`MAX_EPOCH_MILLIS`].
    pub fn from_epoch_millis(millis: i64) -> Result<Self> {
        if millis.unsigned_abs() > MAX_EPOCH_MILLIS as u64 {
            return Err(DateUtilError::OutOfRange(format!("{millis} ms")));
        }
        Ok(Instant { millis })
    }

    /// Rounds to the nearest millisecond.
    pub fn from_epoch_millis_f64(millis: f64) -> Result<Self> {
        let rounded = millis.round();
        if !rounded.is_finite() || rounded.abs() > MAX_EPOCH_MILLIS as f64 {
            return Err(DateUtilError::OutOfRange(format!("{millis} ms")));
        }
        Ok(Instant {
            millis: rounded as i64,
        })
    }

    /// Truncates toward zero, like an ECMAScript time clip.
    pub fn from_epoch_millis_trunc(millis: f64) -> Result<Self> {
        Self::from_epoch_millis_f64(millis.trunc())
    }

    /// Builds an instant from UTC calendar fields. Returns `None` for
    /// out-of-range fields.
    pub fn from_ymd_hms_milli(
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Option<Self> {
        if !(-271_821..=275_760).contains(&year)
            || !(1..=12).contains(&month)
            || day == 0
            || day > civil::days_in_month(year, month)
            || hour > 23
            || minute > 59
            || second > 59
            || millisecond > 999
        {
            return None;
        }
        let days = civil::days_from_civil(year, month, day);
        let millis = days.checked_mul(86_400_000)?.checked_add(
            i64::from(hour) * 3_600_000
                + i64::from(minute) * 60_000
                + i64::from(second) * 1_000
                + i64::from(millisecond),
        )?;
        Instant::from_epoch_millis(millis).ok()
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as i64,
            Err(e) => -(e.duration().as_millis() as i64),
        };
        Instant { millis }
    }

    pub fn epoch_millis(&self) -> i64 {
        self.millis
    }

    /// UTC calendar fields.
    pub fn civil(&self) -> CivilDateTime {
        let days = self.millis.div_euclid(86_400_000);
        let ms_of_day = self.millis.rem_euclid(86_400_000);
        let (year, month, day) = civil::civil_from_days(days);
        CivilDateTime {
            year,
            month,
            day,
            hour: (ms_of_day / 3_600_000) as u32,
            minute: (ms_of_day / 60_000 % 60) as u32,
            second: (ms_of_day / 1_000 % 60) as u32,
            millisecond: (ms_of_day % 1_000) as u32,
        }
    }

    /// `YYYY-MM-DDTHH:mm:ss.sssZ`, with `±YYYYYY` for years outside 0-9999.
    pub fn to_iso_string(&self) -> String {
        let c = self.civil();
        let year = if (0..=9999).contains(&c.year) {
            format!("{:04}", c.year)
        } else {
            format!("{:+07}", c.year)
        };
        format!(
            "{year}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            c.month, c.day, c.hour, c.minute, c.second, c.millisecond
        )
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl FromStr for Instant {
    type Err = DateUtilError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_instant(s)
    }
}

/// Anything the lite layer accepts as a date.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DateInput {
    #[default]
    Absent,
    Instant(Instant),
    EpochMillis(f64),
    Text(String),
}

impl DateInput {
    /// `Absent`, zero or NaN milliseconds, and the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            DateInput::Absent => true,
            DateInput::Instant(_) => false,
            DateInput::EpochMillis(ms) => *ms == 0.0 || ms.is_nan(),
            DateInput::Text(s) => s.is_empty(),
        }
    }

    /// Coerces to an instant; `None` for falsy input.
    pub fn resolve(&self) -> Result<Option<Instant>> {
        if self.is_falsy() {
            return Ok(None);
        }
        match self {
            DateInput::Absent => Ok(None),
            DateInput::Instant(instant) => Ok(Some(*instant)),
            DateInput::EpochMillis(ms) => Instant::from_epoch_millis_trunc(*ms).map(Some),
            DateInput::Text(s) => crate::parser::parse_instant(s).map(Some),
        }
    }
}

impl From<Instant> for DateInput {
    fn from(value: Instant) -> Self {
        DateInput::Instant(value)
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        DateInput::EpochMillis(value as f64)
    }
}

impl From<f64> for DateInput {
    fn from(value: f64) -> Self {
        DateInput::EpochMillis(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl<T: Into<DateInput>> From<Option<T>> for DateInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(DateInput::Absent, Into::into)
    }
}
