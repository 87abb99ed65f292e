//! Fixed-template date formatting and Excel serial date conversion.
//!
//! [`lite`] works on [`Instant`] alone. With the `calendar` feature (on by
//! default), [`calendar`] adds period boundaries, period indices and
//! comparisons backed by chrono.
//!
//! ```
//! use serial_date::{DateFormat, LiteDateUtil, SerialConversion};
//!
//! let util = LiteDateUtil::new();
//! let instant = util.from_serial_value(40000.0).unwrap().unwrap();
//! assert_eq!(instant.to_iso_string(), "2009-07-06T00:00:00.000Z");
//! assert_eq!(util.format(&instant, DateFormat::Yyyymmdd).to_string(), "20090706");
//! ```

#[cfg(feature = "calendar")]
pub mod calendar;
pub mod error;
pub mod lite;
pub mod parser;
pub mod settings;
pub mod types;

// Main API
#[cfg(feature = "calendar")]
pub use calendar::{CalendarDateUtil, CalendarInput, CalendarValue};
pub use error::{DateUtilError, Result};
pub use lite::{LiteDateUtil, SerialConversion};
pub use settings::{Settings, WeekStart};
pub use types::*;
