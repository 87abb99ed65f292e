//! Lite date utilities
//!
//! Formatting and Excel serial conversion over [`Instant`] only, with no
//! calendar library involved. The free functions are the primary API;
//! [`LiteDateUtil`] bundles them with a [`Settings`] value.

pub(crate) mod civil;
mod format;
mod serial;

pub use format::{current_date_string, date_to_string, format_instant};
pub use serial::{
    SerialConversion, epoch_millis_to_serial, from_serial_days, from_serial_value,
    is_likely_numeric_rather_than_date, serial_to_instant, to_serial_days, to_serial_value,
};

use crate::error::Result;
use crate::settings::Settings;
use crate::types::{DateFormat, DateInput, FormattedDate, Instant};

/// Stateless date utility over [`Instant`]
#[derive(Debug, Clone, Default)]
pub struct LiteDateUtil {
    settings: Settings,
}

impl LiteDateUtil {
    /// Uses the process-wide [`Settings::global`].
    pub fn new() -> Self {
        Self::with_settings(Settings::global().clone())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn format(&self, instant: &Instant, format: DateFormat) -> FormattedDate {
        format_instant(instant, format)
    }

    /// Formats with the configured default format.
    pub fn format_default(&self, instant: &Instant) -> FormattedDate {
        format_instant(instant, self.settings.default_format)
    }

    pub fn current(&self, format: DateFormat) -> FormattedDate {
        current_date_string(format)
    }
}

impl SerialConversion for LiteDateUtil {
    type Input = DateInput;
    type Output = Instant;

    fn number_cutoff(&self) -> i64 {
        self.settings.number_cutoff
    }

    fn to_serial_value<I: Into<DateInput>>(&self, input: I) -> Result<f64> {
        to_serial_value(input)
    }

    fn from_serial_value(&self, serial: f64) -> Result<Option<Instant>> {
        from_serial_value(serial)
    }
}
