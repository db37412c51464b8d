use time::{Date, Month};

/// Two fractional digits with a decimal comma, e.g. `1234,50`.
pub fn format_decimal(value: f64) -> String {
    format!("{value:.2}").replace('.', ",")
}

/// `dd.mm.yyyy`
pub fn format_date(date: Date) -> String {
    format!("{:02}.{:02}.{:04}", date.day(), u8::from(date.month()), date.year())
}

pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}
