//! Fixed-template formatting
//!
//! Every text template is derived from the ISO-8601 rendering, so all of
//! them agree on the UTC calendar fields.

use crate::error::Result;
use crate::lite::serial::epoch_millis_to_serial;
use crate::types::{DateFormat, FormattedDate, Instant};

/// Format an instant with one of the predefined formats
///
/// # Examples
/// ```
/// use serial_date::lite::format_instant;
/// use serial_date::types::{DateFormat, Instant};
///
/// let instant: Instant = "2017-03-31T20:43:47.314Z".parse().unwrap();
/// assert_eq!(format_instant(&instant, DateFormat::Yyyymmdd).to_string(), "20170331");
/// ```
pub fn format_instant(instant: &Instant, format: DateFormat) -> FormattedDate {
    match format {
        DateFormat::Iso8601 => FormattedDate::Text(instant.to_iso_string()),
        DateFormat::Yyyymmdd => FormattedDate::Text(compact_date(instant)),
        DateFormat::YyyymmddHhmmssMmm => FormattedDate::Text(
            instant
                .to_iso_string()
                .replace(['-', ':', '.', 'T', 'Z'], ""),
        ),
        DateFormat::AmzIso8601 => {
            FormattedDate::Text(format!("{}T000000Z", compact_date(instant)))
        }
        DateFormat::YyyyMmDd => FormattedDate::Text(dashed_date(instant)),
        DateFormat::ExcelSerial => {
            FormattedDate::Serial(epoch_millis_to_serial(instant.epoch_millis()))
        }
    }
}

/// Format an instant with a format looked up by key (`"yyyy-mm-dd"`) or
/// constant name (`"YYYY-MM-DD"`).
pub fn date_to_string(instant: &Instant, format: &str) -> Result<FormattedDate> {
    Ok(format_instant(instant, format.parse()?))
}

/// Format the current wall-clock time.
pub fn current_date_string(format: DateFormat) -> FormattedDate {
    format_instant(&Instant::now(), format)
}

fn dashed_date(instant: &Instant) -> String {
    let mut iso = instant.to_iso_string();
    iso.truncate(10);
    iso
}

fn compact_date(instant: &Instant) -> String {
    dashed_date(instant).replace('-', "")
}
