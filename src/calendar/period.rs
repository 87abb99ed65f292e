//! Period boundaries and period indices over chrono dates, in UTC.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, Weekday};

use super::CalendarValue;
use crate::types::PeriodType;

fn midnight(date: NaiveDate) -> CalendarValue {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn quarter(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// Days from the most recent `start` weekday (inclusive) to `day`.
fn days_into_week(day: Weekday, start: Weekday) -> u64 {
    u64::from((7 + day.num_days_from_monday() - start.num_days_from_monday()) % 7)
}

fn period_start_date(date: NaiveDate, period: PeriodType, week_start: Weekday) -> Option<NaiveDate> {
    match period {
        PeriodType::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        PeriodType::Half => {
            NaiveDate::from_ymd_opt(date.year(), if date.month() <= 6 { 1 } else { 7 }, 1)
        }
        PeriodType::Quarter => NaiveDate::from_ymd_opt(date.year(), date.month0() / 3 * 3 + 1, 1),
        PeriodType::Month => date.with_day(1),
        PeriodType::Week => {
            date.checked_sub_days(Days::new(days_into_week(date.weekday(), week_start)))
        }
        PeriodType::Day => Some(date),
    }
}

fn next_period_start(start: NaiveDate, period: PeriodType) -> Option<NaiveDate> {
    match period {
        PeriodType::Year => start.checked_add_months(Months::new(12)),
        PeriodType::Half => start.checked_add_months(Months::new(6)),
        PeriodType::Quarter => start.checked_add_months(Months::new(3)),
        PeriodType::Month => start.checked_add_months(Months::new(1)),
        PeriodType::Week => start.checked_add_days(Days::new(7)),
        PeriodType::Day => start.checked_add_days(Days::new(1)),
    }
}

/// Midnight on the first day of the period containing `value`.
pub(crate) fn start_of(
    value: &CalendarValue,
    period: PeriodType,
    week_start: Weekday,
) -> Option<CalendarValue> {
    period_start_date(value.date_naive(), period, week_start).map(midnight)
}

/// Last millisecond of the period containing `value`.
pub(crate) fn end_of(
    value: &CalendarValue,
    period: PeriodType,
    week_start: Weekday,
) -> Option<CalendarValue> {
    let start = period_start_date(value.date_naive(), period, week_start)?;
    let next = next_period_start(start, period)?;
    midnight(next).checked_sub_signed(chrono::Duration::milliseconds(1))
}

/// Week of the year. Monday-start weeks use ISO numbering; otherwise week 1
/// is the week containing January 1st.
pub(crate) fn week_number(date: NaiveDate, week_start: Weekday) -> Option<u32> {
    if week_start == Weekday::Mon {
        return Some(date.iso_week().week());
    }
    let week_end = date.checked_add_days(Days::new(6 - days_into_week(date.weekday(), week_start)))?;
    Some((week_end.ordinal() - 1) / 7 + 1)
}

/// Index of the period containing `value` within its year. `Day` has none.
pub(crate) fn period_index(
    value: &CalendarValue,
    period: PeriodType,
    week_start: Weekday,
) -> Option<i32> {
    let date = value.date_naive();
    match period {
        PeriodType::Week => week_number(date, week_start).map(|w| w as i32),
        PeriodType::Month => Some(date.month0() as i32),
        PeriodType::Quarter => Some(quarter(date) as i32),
        PeriodType::Half => Some(if quarter(date) > 2 { 2 } else { 1 }),
        PeriodType::Year => Some(date.year()),
        PeriodType::Day => None,
    }
}
