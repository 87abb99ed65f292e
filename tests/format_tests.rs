use serial_date::lite::{current_date_string, date_to_string, format_instant};
use serial_date::types::{DateFormat, FormattedDate, Instant};
use serial_date::{LiteDateUtil, Settings};

// 2021-04-09T10:00:00.000Z
const APRIL_9_MILLIS: i64 = 1_617_962_400_000;
// 2017-03-31T20:43:47.314Z
const MARCH_31_MILLIS: i64 = 1_490_993_027_314;

fn april_9() -> Instant {
    Instant::from_epoch_millis(APRIL_9_MILLIS).unwrap()
}

fn march_31() -> Instant {
    Instant::from_epoch_millis(MARCH_31_MILLIS).unwrap()
}

fn text(instant: &Instant, format: DateFormat) -> String {
    match format_instant(instant, format) {
        FormattedDate::Text(s) => s,
        other => panic!("expected text, got {other:?}"),
    }
}

// --- Templates ---
#[test]
fn test_dashed_date() {
    assert_eq!(text(&april_9(), DateFormat::YyyyMmDd), "2021-04-09");
}

#[test]
fn test_compact_date() {
    assert_eq!(text(&april_9(), DateFormat::Yyyymmdd), "20210409");
}

#[test]
fn test_iso8601() {
    assert_eq!(
        text(&march_31(), DateFormat::Iso8601),
        "2017-03-31T20:43:47.314Z"
    );
    assert_eq!(
        text(&april_9(), DateFormat::Iso8601),
        "2021-04-09T10:00:00.000Z"
    );
}

#[test]
fn test_compact_datetime() {
    let s = text(&march_31(), DateFormat::YyyymmddHhmmssMmm);
    assert_eq!(s, "20170331204347314");
    assert_eq!(s.len(), 17);
    assert!(s.bytes().all(|b| b.is_ascii_digit()));
}

#[test]
fn test_amz_date_drops_time_of_day() {
    assert_eq!(text(&march_31(), DateFormat::AmzIso8601), "20170331T000000Z");
}

#[test]
fn test_excel_serial_format() {
    let formatted = format_instant(&april_9(), DateFormat::ExcelSerial);
    let serial = formatted.as_serial().unwrap();
    assert!((serial - 44295.416_666_666_67).abs() < 1e-9);
}

#[test]
fn test_pre_epoch_dates() {
    let instant = Instant::from_ymd_hms_milli(1899, 12, 30, 6, 0, 0, 0).unwrap();
    assert_eq!(text(&instant, DateFormat::YyyyMmDd), "1899-12-30");
    assert_eq!(
        format_instant(&instant, DateFormat::ExcelSerial).as_serial(),
        Some(0.25)
    );
}

// --- Lookup ---
#[test]
fn test_lookup_by_string() {
    let instant = april_9();
    assert_eq!(
        date_to_string(&instant, "yyyymmdd").unwrap(),
        FormattedDate::Text("20210409".to_string())
    );
    assert_eq!(
        date_to_string(&instant, "YYYY-MM-DD").unwrap().to_string(),
        "2021-04-09"
    );
    assert!(date_to_string(&instant, "excel").unwrap().as_serial().is_some());
}

#[test]
fn test_lookup_miss_is_invalid_argument() {
    let err = date_to_string(&april_9(), "mm/dd/yyyy").unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err.to_string(), "unknown date format: \"mm/dd/yyyy\"");
}

// --- Current time ---
#[test]
fn test_current_date_string() {
    let before = Instant::now();
    let iso = current_date_string(DateFormat::Iso8601).to_string();
    let after = Instant::now();
    let parsed: Instant = iso.parse().unwrap();
    assert!(before <= parsed && parsed <= after);
}

// --- Service object ---
#[test]
fn test_format_default_uses_settings() {
    let util = LiteDateUtil::new();
    assert_eq!(util.format_default(&april_9()).to_string(), "2021-04-09");

    let settings = Settings::from_toml_str("default_format = \"AMZ_ISO8601\"");
    // constant names are not serde names
    assert!(settings.is_err());

    let settings = Settings::from_toml_str("default_format = \"amz-iso8601\"").unwrap();
    let util = LiteDateUtil::with_settings(settings);
    assert_eq!(
        util.format_default(&april_9()).to_string(),
        "20210409T000000Z"
    );
    assert_eq!(
        util.format(&april_9(), DateFormat::Yyyymmdd).to_string(),
        "20210409"
    );
}

#[test]
fn test_every_text_format_parses_back() {
    let instant = april_9();
    for format in DateFormat::ALL {
        if let FormattedDate::Text(s) = format_instant(&instant, format) {
            let parsed: Instant = s.parse().unwrap();
            let expected = match format {
                DateFormat::Iso8601 | DateFormat::YyyymmddHhmmssMmm => instant,
                _ => Instant::from_ymd_hms_milli(2021, 4, 9, 0, 0, 0, 0).unwrap(),
            };
            assert_eq!(parsed, expected, "{format}");
        }
    }
}
