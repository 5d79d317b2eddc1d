use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Format used when sending timestamps to the API.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fixed display format: day/month/year, 24h clock.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Format used to prefill editable date fields (minute precision).
pub const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Shown in place of a missing date.
pub const NO_DATE: &str = "No date set";

/// Error text for a due date the user typed that we cannot read.
pub const INVALID_DATE_MESSAGE: &str = "Invalid due date. Use YYYY-MM-DD HH:MM";

/// Parse an ISO-8601 timestamp as sent by the API.
///
/// Offsets are converted to local wall-clock time; naive timestamps are
/// taken as already local.
pub fn parse_wire(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Render a timestamp for display, or the "no date" placeholder.
pub fn format_display(dt: Option<&NaiveDateTime>) -> String {
    match dt {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => NO_DATE.to_string(),
    }
}

/// Render a timestamp for an edit field, truncated to the minute.
pub fn to_input(dt: &NaiveDateTime) -> String {
    dt.format(INPUT_FORMAT).to_string()
}

/// Parse a due date typed by the user. Empty input means "no due date".
///
/// Accepts `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM`, `DD/MM/YYYY HH:MM` and a
/// bare `YYYY-MM-DD` (midnight).
pub fn parse_input(s: &str) -> Result<Option<NaiveDateTime>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    for fmt in [INPUT_FORMAT, "%Y-%m-%dT%H:%M", DISPLAY_FORMAT] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Some(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Some(date.and_time(NaiveTime::MIN)));
    }
    Err(INVALID_DATE_MESSAGE.to_string())
}

/// Current local wall-clock time, the reference for overdue checks.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Serde adapter for optional API timestamps.
///
/// `null`, a missing field and `""` all read as `None`. An unreadable
/// timestamp also reads as `None`, with a warning.
pub mod serde_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(super::WIRE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => {
                let parsed = super::parse_wire(s);
                if parsed.is_none() {
                    tracing::warn!(value = s, "unreadable timestamp; treated as unset");
                }
                Ok(parsed)
            }
        }
    }
}
