// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! `modified` columns (§4.3.3) are stored as `YYYY-MM-DD HH:MM:SS` in UTC,
//! matching the original's `strftime` output exactly.

use jiff::{tz::TimeZone, Timestamp, Zoned};

const SQL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn format_modified(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::UTC)
        .strftime(SQL_FORMAT)
        .to_string()
}

pub(crate) fn now_utc_sql() -> String {
    format_modified(Timestamp::now())
}

/// Parse a `modified` column back into a [`Timestamp`]. Falls back to the
/// current time on malformed input (should never happen for rows this
/// crate itself wrote).
pub(crate) fn parse_modified(s: &str) -> Timestamp {
    Zoned::strptime(SQL_FORMAT, s)
        .map(|zoned| zoned.timestamp())
        .unwrap_or_else(|_| {
            debug_assert!(false, "malformed modified column: {s}");
            Timestamp::now()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_sql_format() {
        let now = Timestamp::now();
        let formatted = format_modified(now);
        let parsed = parse_modified(&formatted);
        // Seconds precision only; the sub-second component is truncated.
        assert_eq!(formatted, format_modified(parsed));
    }
}
