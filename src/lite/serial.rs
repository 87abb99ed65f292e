//! Excel serial number conversion
//!
//! Serial numbers count days since 1899-12-30T00:00:00Z. The integer part is
//! the day, the fraction is the time of day (0.5 = noon). Zero is the
//! "no date" sentinel in both directions.

use crate::error::Result;
use crate::types::{DateInput, EXCEL_UNIX_EPOCH_OFFSET, Instant, MS_PER_DAY};

/// Serial conversion entry points shared by the lite and calendar layers.
///
/// Implementors supply the two primitive conversions; the day-granular
/// helpers and the number-vs-date heuristic are derived from them.
pub trait SerialConversion {
    /// Accepted date input.
    type Input;
    /// Date type produced from a serial number.
    type Output;

    /// Serial day counts below this are plain numbers.
    fn number_cutoff(&self) -> i64;

    /// Serial number of `input`, or `0.0` when the input is absent.
    fn to_serial_value<I: Into<Self::Input>>(&self, input: I) -> Result<f64>;

    /// Date for `serial`, or `None` for a zero (or NaN) serial.
    fn from_serial_value(&self, serial: f64) -> Result<Option<Self::Output>>;

    /// Whole-day serial number, time of day discarded.
    fn to_serial_days<I: Into<Self::Input>>(&self, input: I) -> Result<i64> {
        Ok(self.to_serial_value(input)?.floor() as i64)
    }

    /// Date at midnight of the serial day.
    fn from_serial_days(&self, serial: f64) -> Result<Option<Self::Output>> {
        if is_absent_serial(serial) {
            return Ok(None);
        }
        self.from_serial_value(serial.floor())
    }

    /// Should a raw spreadsheet number be shown as a number rather than a date?
    fn is_likely_numeric_rather_than_date<I: Into<Self::Input>>(&self, input: I) -> Result<bool> {
        Ok(self.to_serial_days(input)? < self.number_cutoff())
    }
}

pub(crate) fn is_absent_serial(serial: f64) -> bool {
    serial == 0.0 || serial.is_nan()
}

/// `millis / 86_400_000 + 25569`
pub fn epoch_millis_to_serial(millis: i64) -> f64 {
    millis as f64 / MS_PER_DAY + EXCEL_UNIX_EPOCH_OFFSET
}

/// `(serial - 25569) * 86_400_000`, computed in one step and rounded to the
/// nearest millisecond.
pub fn serial_to_instant(serial: f64) -> Result<Instant> {
    Instant::from_epoch_millis_f64((serial - EXCEL_UNIX_EPOCH_OFFSET) * MS_PER_DAY)
}

pub fn to_serial_value<I: Into<DateInput>>(input: I) -> Result<f64> {
    Ok(input
        .into()
        .resolve()?
        .map_or(0.0, |instant| epoch_millis_to_serial(instant.epoch_millis())))
}

pub fn from_serial_value(serial: f64) -> Result<Option<Instant>> {
    if is_absent_serial(serial) {
        return Ok(None);
    }
    serial_to_instant(serial).map(Some)
}

pub fn to_serial_days<I: Into<DateInput>>(input: I) -> Result<i64> {
    Ok(to_serial_value(input)?.floor() as i64)
}

pub fn from_serial_days(serial: f64) -> Result<Option<Instant>> {
    if is_absent_serial(serial) {
        return Ok(None);
    }
    from_serial_value(serial.floor())
}

/// True when the serial day count is below
/// [`DATE_SERIAL_NUMBER_CUTOFF`](crate::types::DATE_SERIAL_NUMBER_CUTOFF),
/// roughly any date before 1927.
pub fn is_likely_numeric_rather_than_date<I: Into<DateInput>>(input: I) -> Result<bool> {
    Ok(to_serial_days(input)? < crate::types::DATE_SERIAL_NUMBER_CUTOFF)
}
