//! Text date parsing module
//!
//! Turns the timestamp shapes this crate understands into an [`Instant`]:
//! extended ISO-8601 (`2021-04-09`, `2021-04-09T10:00:00.000Z`, `±YYYYYY`
//! years, numeric offsets) and the basic forms the formatter emits
//! (`20210409`, `20210409T000000Z`, `20210409100000000`).
//!
//! Timestamps without an offset are read as UTC.

mod fields;

use winnow::Parser;

use crate::error::{DateUtilError, Result};
use crate::lite::civil;
use crate::types::Instant;
use fields::Fields;

/// Parse a timestamp string
///
/// # Examples
/// ```
/// use serial_date::parser::parse_instant;
///
/// let instant = parse_instant("2009-07-06").unwrap();
/// assert_eq!(instant.epoch_millis(), 1_246_838_400_000);
/// ```
pub fn parse_instant(text: &str) -> Result<Instant> {
    let trimmed = text.trim();
    let fields = fields::timestamp.parse(trimmed).map_err(|e| {
        log::debug!("rejected timestamp {text:?} at offset {}", e.offset());
        unparseable(text, format!("unexpected input at offset {}", e.offset()))
    })?;
    resolve(text, &fields)
}

fn unparseable(text: &str, reason: String) -> DateUtilError {
    DateUtilError::UnparseableDate {
        input: text.to_string(),
        reason,
    }
}

fn resolve(text: &str, f: &Fields) -> Result<Instant> {
    if !(1..=12).contains(&f.month) {
        return Err(unparseable(text, format!("month {} out of range", f.month)));
    }
    if f.day == 0 || f.day > civil::days_in_month(f.year, f.month) {
        return Err(unparseable(text, format!("day {} out of range", f.day)));
    }
    if f.hour > 23 || f.minute > 59 || f.second > 59 {
        return Err(unparseable(
            text,
            format!("time {:02}:{:02}:{:02} out of range", f.hour, f.minute, f.second),
        ));
    }
    if let Some(offset) = f.offset {
        if offset.hours > 23 || offset.minutes > 59 {
            return Err(unparseable(text, "UTC offset out of range".to_string()));
        }
    }

    let local = Instant::from_ymd_hms_milli(
        f.year,
        f.month,
        f.day,
        f.hour,
        f.minute,
        f.second,
        f.millisecond,
    )
    .ok_or_else(|| DateUtilError::OutOfRange(text.to_string()))?;
    let shift = f.offset.map_or(0, |o| o.total_minutes() * 60_000);
    Instant::from_epoch_millis(local.epoch_millis() - shift)
}
