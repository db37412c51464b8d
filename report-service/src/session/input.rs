use time::{Date, Month};

use super::SessionError;

/// Parses an operator-entered `dd.mm.yyyy` date. Single-digit day and month are accepted.
pub fn parse_date(input: &str) -> Result<Date, SessionError> {
    let input = input.trim();
    let parse_err = || SessionError::Parse {
        what: "date (expected dd.mm.yyyy)",
        input: input.to_string(),
    };

    let mut parts = input.split('.');
    let (Some(day), Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        return Err(parse_err());
    };

    let day: u8 = parse_digits(day, 1..=2).ok_or_else(parse_err)?;
    let month: u8 = parse_digits(month, 1..=2).ok_or_else(parse_err)?;
    let year: i32 = parse_digits(year, 4..=4).ok_or_else(parse_err)?;

    let month = Month::try_from(month).map_err(|_| SessionError::Validation(format!("month {month} is not between 1 and 12")))?;
    Date::from_calendar_date(year, month, day)
        .map_err(|_| SessionError::Validation(format!("{input} is not a valid calendar date")))
}

/// Parses an operator-entered month number `1`–`12`.
pub fn parse_month(input: &str) -> Result<Month, SessionError> {
    let input = input.trim();
    let number: i64 = input.parse().map_err(|_| SessionError::Parse {
        what: "month number",
        input: input.to_string(),
    })?;

    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .ok_or_else(|| SessionError::Validation(format!("month must be between 1 and 12, got {number}")))
}

/// Parses an all-ASCII-digit field whose length lies in `width`.
fn parse_digits<T: std::str::FromStr>(s: &str, width: std::ops::RangeInclusive<usize>) -> Option<T> {
    if !width.contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_padded_and_unpadded_dates() {
        assert_eq!(parse_date("01.01.2025").unwrap(), date!(2025 - 01 - 01));
        assert_eq!(parse_date(" 2.3.2025\n").unwrap(), date!(2025 - 03 - 02));
    }

    #[test]
    fn malformed_dates_are_parse_errors() {
        for input in [
            "",
            "2025-01-01",
            "01.01",
            "01.01.2025.1",
            "aa.01.2025",
            "-1.01.2025",
            "01..2025",
            "01.01.25",
            "01.01.02025",
            "001.01.2025",
            "100.01.2025",
            "300.01.2025",
            "01.001.2025",
        ] {
            assert!(
                matches!(parse_date(input), Err(SessionError::Parse { .. })),
                "expected parse error for {input:?}"
            );
        }
    }

    #[test]
    fn impossible_dates_are_validation_errors() {
        for input in ["32.01.2025", "29.02.2025", "01.13.2025", "00.01.2025"] {
            assert!(
                matches!(parse_date(input), Err(SessionError::Validation(_))),
                "expected validation error for {input:?}"
            );
        }
        assert_eq!(parse_date("29.02.2024").unwrap(), date!(2024 - 02 - 29));
    }

    #[test]
    fn month_numbers() {
        assert_eq!(parse_month("1").unwrap(), Month::January);
        assert_eq!(parse_month(" 12 ").unwrap(), Month::December);
        assert!(matches!(parse_month("x"), Err(SessionError::Parse { .. })));
        assert!(matches!(parse_month("1.5"), Err(SessionError::Parse { .. })));
        assert!(matches!(parse_month("0"), Err(SessionError::Validation(_))));
        assert!(matches!(parse_month("13"), Err(SessionError::Validation(_))));
        assert!(matches!(parse_month("-3"), Err(SessionError::Validation(_))));
    }
}
