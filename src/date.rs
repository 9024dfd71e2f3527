//! Parsing and display of article publication dates. Dates are stored as
//! ISO date strings without a time component and are always interpreted as
//! midnight; no timezone conversion takes place.

use chrono::{DateTime, Locale, NaiveDate, ParseResult, TimeZone, Utc};

/// The format of stored publication dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// The long pt-BR display form, e.g. `05 de março de 2024`.
pub const DISPLAY_FORMAT: &str = "%d de %B de %Y";

/// The locale month names are rendered in.
pub const DISPLAY_LOCALE: Locale = Locale::pt_BR;

/// What [`format_date`] renders for input it can't parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// Parses a stored date string (`YYYY-MM-DD`).
pub fn parse_date(iso: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(iso.trim(), ISO_DATE_FORMAT)
}

/// Returns midnight UTC on `date`.
pub fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Renders a stored date string in the fixed long display form. Input that
/// doesn't parse renders as [`INVALID_DATE`] rather than failing the page.
pub fn format_date(iso: &str) -> String {
    match parse_date(iso).ok().and_then(midnight_utc) {
        Some(date) => date
            .format_localized(DISPLAY_FORMAT, DISPLAY_LOCALE)
            .to_string(),
        None => {
            tracing::warn!(date = iso, "can't parse publication date");
            INVALID_DATE.to_owned()
        }
    }
}
