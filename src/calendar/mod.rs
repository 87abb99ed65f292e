//! Calendar date utilities
//!
//! Period boundaries, period indices and comparisons on top of the lite
//! layer, backed by chrono. Inputs may be chrono values or anything the lite
//! layer accepts; absent inputs flow through as `None`.
//!
//! All calendar arithmetic is done in UTC.

mod period;

use chrono::{DateTime, Utc, Weekday};

use crate::error::{DateUtilError, Result};
use crate::lite::{self, LiteDateUtil, SerialConversion};
use crate::settings::{Settings, WeekStart};
use crate::types::{DateFormat, DateInput, FormattedDate, Instant, PeriodType};

/// Date wrapper type of the calendar layer
pub type CalendarValue = DateTime<Utc>;

/// Anything the calendar layer accepts as a date.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CalendarInput {
    #[default]
    Absent,
    Calendar(CalendarValue),
    Native(DateInput),
}

impl CalendarInput {
    pub fn is_falsy(&self) -> bool {
        match self {
            CalendarInput::Absent => true,
            CalendarInput::Calendar(_) => false,
            CalendarInput::Native(input) => input.is_falsy(),
        }
    }

    /// Coerces to a chrono value; `None` for falsy input.
    pub fn resolve(&self) -> Result<Option<CalendarValue>> {
        match self {
            CalendarInput::Absent => Ok(None),
            CalendarInput::Calendar(value) => Ok(Some(*value)),
            CalendarInput::Native(input) => input.resolve()?.map(instant_to_calendar).transpose(),
        }
    }
}

impl From<CalendarValue> for CalendarInput {
    fn from(value: CalendarValue) -> Self {
        CalendarInput::Calendar(value)
    }
}

impl From<DateInput> for CalendarInput {
    fn from(value: DateInput) -> Self {
        CalendarInput::Native(value)
    }
}

impl From<Instant> for CalendarInput {
    fn from(value: Instant) -> Self {
        CalendarInput::Native(value.into())
    }
}

impl From<i64> for CalendarInput {
    fn from(value: i64) -> Self {
        CalendarInput::Native(value.into())
    }
}

impl From<f64> for CalendarInput {
    fn from(value: f64) -> Self {
        CalendarInput::Native(value.into())
    }
}

impl From<&str> for CalendarInput {
    fn from(value: &str) -> Self {
        CalendarInput::Native(value.into())
    }
}

impl From<String> for CalendarInput {
    fn from(value: String) -> Self {
        CalendarInput::Native(value.into())
    }
}

impl<T: Into<CalendarInput>> From<Option<T>> for CalendarInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(CalendarInput::Absent, Into::into)
    }
}

fn instant_to_calendar(instant: Instant) -> Result<CalendarValue> {
    DateTime::from_timestamp_millis(instant.epoch_millis())
        .ok_or_else(|| DateUtilError::OutOfRange(instant.to_iso_string()))
}

fn calendar_to_instant(value: &CalendarValue) -> Result<Instant> {
    Instant::from_epoch_millis(value.timestamp_millis())
}

fn weekday(week_start: WeekStart) -> Weekday {
    match week_start {
        WeekStart::Monday => Weekday::Mon,
        WeekStart::Sunday => Weekday::Sun,
    }
}

/// Comparison side that failed to coerce counts as absent.
fn coerce_for_comparison(input: &CalendarInput) -> Option<CalendarValue> {
    input.resolve().unwrap_or_else(|e| {
        log::warn!("comparing against an unusable date, treating it as absent: {e}");
        None
    })
}

/// Date utility with calendar-period support
#[derive(Debug, Clone, Default)]
pub struct CalendarDateUtil {
    lite: LiteDateUtil,
}

impl CalendarDateUtil {
    /// Uses the process-wide [`Settings::global`].
    pub fn new() -> Self {
        Self {
            lite: LiteDateUtil::new(),
        }
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            lite: LiteDateUtil::with_settings(settings),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.lite.settings()
    }

    /// The lite utility this one delegates to.
    pub fn lite(&self) -> &LiteDateUtil {
        &self.lite
    }

    fn week_start(&self) -> Weekday {
        weekday(self.settings().week_start)
    }

    /// Format a chrono value with one of the predefined formats.
    pub fn format(&self, value: &CalendarValue, format: DateFormat) -> Result<FormattedDate> {
        Ok(self.lite.format(&calendar_to_instant(value)?, format))
    }

    /// True for chrono values and native instants.
    pub fn is_date_or_moment(&self, value: &CalendarInput) -> bool {
        matches!(
            value,
            CalendarInput::Calendar(_) | CalendarInput::Native(DateInput::Instant(_))
        )
    }

    pub fn to_calendar_value<I: Into<CalendarInput>>(&self, value: I) -> Result<Option<CalendarValue>> {
        value.into().resolve()
    }

    /// Midnight UTC on the first day of the period.
    pub fn start_of<I: Into<CalendarInput>>(
        &self,
        value: I,
        period: PeriodType,
    ) -> Result<Option<CalendarValue>> {
        let week_start = self.week_start();
        self.with_value(value, |v| period::start_of(v, period, week_start))
    }

    /// Last millisecond of the period.
    pub fn end_of<I: Into<CalendarInput>>(
        &self,
        value: I,
        period: PeriodType,
    ) -> Result<Option<CalendarValue>> {
        let week_start = self.week_start();
        self.with_value(value, |v| period::end_of(v, period, week_start))
    }

    fn with_value<I, F>(&self, value: I, f: F) -> Result<Option<CalendarValue>>
    where
        I: Into<CalendarInput>,
        F: FnOnce(&CalendarValue) -> Option<CalendarValue>,
    {
        let Some(value) = value.into().resolve()? else {
            return Ok(None);
        };
        f(&value)
            .map(Some)
            .ok_or_else(|| DateUtilError::OutOfRange(value.to_rfc3339()))
    }

    /// Week number, zero-based month, quarter (1-4), half (1-2) or year.
    /// `Day` has no index.
    pub fn period_index<I: Into<CalendarInput>>(
        &self,
        value: I,
        period: PeriodType,
    ) -> Result<Option<i32>> {
        let week_start = self.week_start();
        Ok(value
            .into()
            .resolve()?
            .and_then(|v| period::period_index(&v, period, week_start)))
    }

    /// Like [`period_index`](Self::period_index), with an unrecognized
    /// period name giving `None`.
    pub fn period_index_named<I: Into<CalendarInput>>(
        &self,
        value: I,
        period: &str,
    ) -> Result<Option<i32>> {
        match period.parse::<PeriodType>() {
            Ok(period) => self.period_index(value, period),
            Err(_) => Ok(None),
        }
    }

    fn coerce_pair(
        &self,
        a: &CalendarInput,
        b: &CalendarInput,
    ) -> Option<(CalendarValue, CalendarValue)> {
        Some((coerce_for_comparison(a)?, coerce_for_comparison(b)?))
    }

    /// Equal to the millisecond. Two absent dates are the same.
    pub fn is_same<A: Into<CalendarInput>, B: Into<CalendarInput>>(&self, a: A, b: B) -> bool {
        let (a, b) = (a.into(), b.into());
        if a.is_falsy() && b.is_falsy() {
            return true;
        }
        self.coerce_pair(&a, &b)
            .is_some_and(|(a, b)| a.timestamp_millis() == b.timestamp_millis())
    }

    pub fn is_before<A: Into<CalendarInput>, B: Into<CalendarInput>>(&self, a: A, b: B) -> bool {
        self.coerce_pair(&a.into(), &b.into())
            .is_some_and(|(a, b)| a.timestamp_millis() < b.timestamp_millis())
    }

    pub fn is_after<A: Into<CalendarInput>, B: Into<CalendarInput>>(&self, a: A, b: B) -> bool {
        self.coerce_pair(&a.into(), &b.into())
            .is_some_and(|(a, b)| a.timestamp_millis() > b.timestamp_millis())
    }

    /// Earlier of two dates. An absent side yields the other one.
    pub fn min<A: Into<CalendarInput>, B: Into<CalendarInput>>(
        &self,
        a: A,
        b: B,
    ) -> Result<Option<CalendarValue>> {
        let (a, b) = (a.into().resolve()?, b.into().resolve()?);
        Ok(match (a, b) {
            (Some(a), Some(b)) if b.timestamp_millis() < a.timestamp_millis() => Some(b),
            (Some(a), _) => Some(a),
            (None, b) => b,
        })
    }

    /// Later of two dates. An absent side yields the other one.
    pub fn max<A: Into<CalendarInput>, B: Into<CalendarInput>>(
        &self,
        a: A,
        b: B,
    ) -> Result<Option<CalendarValue>> {
        let (a, b) = (a.into().resolve()?, b.into().resolve()?);
        Ok(match (a, b) {
            (Some(a), Some(b)) if b.timestamp_millis() > a.timestamp_millis() => Some(b),
            (Some(a), _) => Some(a),
            (None, b) => b,
        })
    }
}

impl SerialConversion for CalendarDateUtil {
    type Input = CalendarInput;
    type Output = CalendarValue;

    fn number_cutoff(&self) -> i64 {
        self.settings().number_cutoff
    }

    /// Chrono values are read through their epoch milliseconds.
    fn to_serial_value<I: Into<CalendarInput>>(&self, input: I) -> Result<f64> {
        match input.into() {
            CalendarInput::Absent => Ok(0.0),
            CalendarInput::Calendar(value) => {
                let instant = calendar_to_instant(&value)?;
                Ok(lite::epoch_millis_to_serial(instant.epoch_millis()))
            }
            CalendarInput::Native(input) => lite::to_serial_value(input),
        }
    }

    fn from_serial_value(&self, serial: f64) -> Result<Option<CalendarValue>> {
        lite::from_serial_value(serial)?
            .map(instant_to_calendar)
            .transpose()
    }
}
