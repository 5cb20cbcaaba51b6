use chrono::{DateTime, Datelike, TimeZone};

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// "martes, 14 de noviembre de 2023".
#[must_use]
pub fn format_long_date<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    let weekday = WEEKDAYS[value.weekday().num_days_from_monday() as usize];
    let month = MONTHS[value.month0() as usize];
    format!(
        "{weekday}, {} de {month} de {}",
        value.day(),
        value.year()
    )
}

/// "14/11/2023".
#[must_use]
pub fn format_short_date<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    format!("{:02}/{:02}/{}", value.day(), value.month(), value.year())
}
