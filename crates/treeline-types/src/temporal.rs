use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The instant a commit was recorded.
///
/// Treeline never interprets timestamps beyond rendering them: the commit
/// hash covers [`Timestamp::canonical`], an RFC 3339 UTC string with the
/// shortest sub-second precision that represents the instant exactly
/// (`2024-05-01T12:00:00Z`, `2024-05-01T12:00:00.250Z`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap an existing UTC instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build a timestamp from milliseconds since the UNIX epoch.
    pub fn from_millis(millis: i64) -> Result<Self, TypeError> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Self)
            .ok_or_else(|| TypeError::InvalidTimestamp(format!("{millis}ms out of range")))
    }

    /// Milliseconds since the UNIX epoch.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The underlying UTC instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Canonical string form fed into the commit hash.
    pub fn canonical(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.canonical())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for Timestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| TypeError::InvalidTimestamp(format!("{s}: {e}")))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_whole_seconds() {
        let ts = Timestamp::from_millis(1_700_000_000_000).unwrap();
        assert_eq!(ts.canonical(), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn canonical_keeps_millis() {
        let ts = Timestamp::from_millis(1_700_000_000_250).unwrap();
        assert_eq!(ts.canonical(), "2023-11-14T22:13:20.250Z");
    }

    #[test]
    fn parse_normalizes_offsets_to_utc() {
        let ts: Timestamp = "2023-11-15T00:13:20+02:00".parse().unwrap();
        assert_eq!(ts.canonical(), "2023-11-14T22:13:20Z");
        assert_eq!(ts.as_millis(), 1_700_000_000_000);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "yesterday".parse::<Timestamp>().unwrap_err();
        assert!(matches!(err, TypeError::InvalidTimestamp(_)));
    }

    #[test]
    fn out_of_range_millis() {
        assert!(Timestamp::from_millis(i64::MAX).is_err());
    }

    #[test]
    fn now_produces_reasonable_timestamp() {
        // Should be after 2020-01-01 (1577836800000 ms)
        assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
    }

    #[test]
    fn ordering_follows_time() {
        let a = Timestamp::from_millis(100).unwrap();
        let b = Timestamp::from_millis(200).unwrap();
        assert!(a < b);
    }

    #[test]
    fn display_is_canonical() {
        let ts = Timestamp::from_millis(0).unwrap();
        assert_eq!(format!("{ts}"), "1970-01-01T00:00:00Z");
    }
}
