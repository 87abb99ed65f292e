use winnow::combinator::{alt, eof, opt, preceded};
use winnow::token::{one_of, take_while};
use winnow::{ModalResult, Parser};

/// UTC offset as written, e.g. `+05:30`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub negative: bool,
    pub hours: u32,
    pub minutes: u32,
}

impl Offset {
    pub fn total_minutes(&self) -> i64 {
        let total = i64::from(self.hours * 60 + self.minutes);
        if self.negative { -total } else { total }
    }
}

/// Raw timestamp fields, not yet range checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
    pub offset: Option<Offset>,
}

impl Fields {
    fn midnight(year: i64, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
            offset: None,
        }
    }

    fn with_time(mut self, time: Time) -> Self {
        self.hour = time.hour;
        self.minute = time.minute;
        self.second = time.second;
        self.millisecond = time.millisecond;
        self.offset = time.offset;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Time {
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
    offset: Option<Offset>,
}

/// Exactly `count` ASCII digits
fn digits<'s>(count: usize) -> impl FnMut(&mut &'s str) -> ModalResult<u32> {
    move |input: &mut &'s str| {
        take_while(count, |c: char| c.is_ascii_digit())
            .try_map(|s: &str| s.parse::<u32>())
            .parse_next(input)
    }
}

fn end(input: &mut &str) -> ModalResult<()> {
    eof.void().parse_next(input)
}

/// `YYYY` or expanded `±YYYYYY`
fn year(input: &mut &str) -> ModalResult<i64> {
    alt((
        (one_of(['+', '-']), digits(6)).map(|(sign, y)| {
            if sign == '-' {
                -i64::from(y)
            } else {
                i64::from(y)
            }
        }),
        digits(4).map(i64::from),
    ))
    .parse_next(input)
}

/// `.f…` or `,f…`; digits past the third are dropped
fn fraction_millis(input: &mut &str) -> ModalResult<u32> {
    preceded(
        one_of(['.', ',']),
        take_while(1.., |c: char| c.is_ascii_digit()),
    )
    .map(|frac: &str| {
        frac.bytes()
            .chain(std::iter::repeat(b'0'))
            .take(3)
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    })
    .parse_next(input)
}

/// `Z`, `±HH:mm` or `±HHmm`
fn offset(input: &mut &str) -> ModalResult<Offset> {
    alt((
        one_of(['Z', 'z']).value(Offset {
            negative: false,
            hours: 0,
            minutes: 0,
        }),
        (one_of(['+', '-']), digits(2), opt(':'), digits(2)).map(|(sign, hours, _, minutes)| {
            Offset {
                negative: sign == '-',
                hours,
                minutes,
            }
        }),
    ))
    .parse_next(input)
}

/// `HH:mm[:ss[.sss]][offset]`
fn extended_time(input: &mut &str) -> ModalResult<Time> {
    (
        digits(2),
        preceded(':', digits(2)),
        opt(preceded(':', (digits(2), opt(fraction_millis)))),
        opt(offset),
    )
        .map(|(hour, minute, seconds, offset)| {
            let (second, millisecond) = seconds.map_or((0, 0), |(s, ms)| (s, ms.unwrap_or(0)));
            Time {
                hour,
                minute,
                second,
                millisecond,
                offset,
            }
        })
        .parse_next(input)
}

/// `HHmmss[.sss][offset]`
fn basic_time(input: &mut &str) -> ModalResult<Time> {
    (digits(2), digits(2), digits(2), opt(fraction_millis), opt(offset))
        .map(|(hour, minute, second, millisecond, offset)| Time {
            hour,
            minute,
            second,
            millisecond: millisecond.unwrap_or(0),
            offset,
        })
        .parse_next(input)
}

/// `YYYY[-MM[-DD[(T| )time]]]`, the time only after a full date
fn extended(input: &mut &str) -> ModalResult<Fields> {
    let year = year.parse_next(input)?;
    let mut fields = Fields::midnight(year, 1, 1);
    if let Some(month) = opt(preceded('-', digits(2))).parse_next(input)? {
        fields.month = month;
        if let Some(day) = opt(preceded('-', digits(2))).parse_next(input)? {
            fields.day = day;
            if let Some(time) =
                opt(preceded(one_of(['T', 't', ' ']), extended_time)).parse_next(input)?
            {
                fields = fields.with_time(time);
            }
        }
    }
    end.parse_next(input)?;
    Ok(fields)
}

/// `YYYYMMDD[Thhmmss[.sss][offset]]`, the compact-date and AMZ shapes
fn basic(input: &mut &str) -> ModalResult<Fields> {
    let (year, month, day) = (digits(4), digits(2), digits(2)).parse_next(input)?;
    let mut fields = Fields::midnight(i64::from(year), month, day);
    if let Some(time) = opt(preceded(one_of(['T', 't']), basic_time)).parse_next(input)? {
        fields = fields.with_time(time);
    }
    end.parse_next(input)?;
    Ok(fields)
}

/// `YYYYMMDDHHmmssSSS`, the compact datetime shape
fn compact_datetime(input: &mut &str) -> ModalResult<Fields> {
    let (year, month, day, hour, minute, second, millisecond) = (
        digits(4),
        digits(2),
        digits(2),
        digits(2),
        digits(2),
        digits(2),
        digits(3),
    )
        .parse_next(input)?;
    end.parse_next(input)?;
    Ok(Fields {
        year: i64::from(year),
        month,
        day,
        hour,
        minute,
        second,
        millisecond,
        offset: None,
    })
}

/// Any accepted timestamp shape
pub fn timestamp(input: &mut &str) -> ModalResult<Fields> {
    alt((compact_datetime, basic, extended)).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<Fields> {
        timestamp.parse(s).ok()
    }

    #[test]
    fn year_only() {
        let f = parse("2021").unwrap();
        assert_eq!((f.year, f.month, f.day), (2021, 1, 1));
    }

    #[test]
    fn expanded_year() {
        assert_eq!(parse("+010000-01-01").unwrap().year, 10000);
        assert_eq!(parse("-000001-12-31").unwrap().year, -1);
    }

    #[test]
    fn fraction_is_truncated_to_millis() {
        let f = parse("2021-04-09T10:00:00.123456Z").unwrap();
        assert_eq!(f.millisecond, 123);
        let f = parse("2021-04-09T10:00:00.5Z").unwrap();
        assert_eq!(f.millisecond, 500);
    }

    #[test]
    fn offsets() {
        let f = parse("2021-04-09T10:00+05:30").unwrap();
        assert_eq!(f.offset.unwrap().total_minutes(), 330);
        let f = parse("2021-04-09T10:00:00-0800").unwrap();
        assert_eq!(f.offset.unwrap().total_minutes(), -480);
        assert!(parse("2021-04-09T10:00:00").unwrap().offset.is_none());
    }

    #[test]
    fn time_requires_full_date() {
        assert!(parse("2021-04T10:00").is_none());
        assert!(parse("2021-04-09T10").is_none());
    }

    #[test]
    fn basic_shapes() {
        let f = parse("20210409").unwrap();
        assert_eq!((f.year, f.month, f.day), (2021, 4, 9));
        let f = parse("20210409T000000Z").unwrap();
        assert_eq!(f.hour, 0);
        assert!(f.offset.is_some());
        let f = parse("20170331204347314").unwrap();
        assert_eq!(
            (f.hour, f.minute, f.second, f.millisecond),
            (20, 43, 47, 314)
        );
    }

    #[test]
    fn rejects_other_text() {
        assert!(parse("Apr 9 2021").is_none());
        assert!(parse("2021-4-9").is_none());
        assert!(parse("202104").is_none());
    }
}
