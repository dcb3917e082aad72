use jiff::civil::{self, Date};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

/// Abbreviated Russian month names as shown on the dashboard timeline.
pub const RU_MONTHS_SHORT: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

/// Today's date as `YYYY-MM-DD`, used to prefill new request forms.
pub fn today_iso() -> String {
    Zoned::now().strftime("%Y-%m-%d").to_string()
}

/// Today's civil date in the local time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Parse a backend date value. Accepts RFC 3339 timestamps as well as bare
/// `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD` values, which are taken as UTC.
pub fn parse_when(raw: &str) -> Option<Timestamp> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = s.parse::<civil::DateTime>() {
        return dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }
    if let Ok(date) = s.parse::<Date>() {
        return date
            .at(0, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .ok()
            .map(|z| z.timestamp());
    }
    None
}

/// Table-cell date rendering: `dd.mm.yyyy` for parseable values, the raw
/// text unchanged for anything else.
pub fn format_date_ru(raw: &str) -> String {
    match parse_when(raw) {
        Some(ts) => ts.strftime("%d.%m.%Y").to_string(),
        None => raw.to_string(),
    }
}

/// Date part of a parseable value as `YYYY-MM-DD` for `<input type="date">`,
/// the raw text unchanged otherwise.
pub fn date_input_value(raw: &str) -> String {
    match parse_when(raw) {
        Some(ts) => ts.strftime("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

/// Timeline axis label such as `15 янв.`.
pub fn format_day_month_ru(date: Date) -> String {
    let month = RU_MONTHS_SHORT[date.month() as usize - 1];
    format!("{} {}", date.day(), month)
}
