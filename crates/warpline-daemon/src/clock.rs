//! Timestamp formatting.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC 3339 with millisecond precision and a `Z` suffix,
/// the same shape the registration service uses for `created`/`updated`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_utc_millis() {
        let ts = now_iso8601();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        // 2026-01-01T00:00:00.000Z
        assert_eq!(ts.len(), 24);
    }
}
