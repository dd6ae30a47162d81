use chrono::{DateTime, Utc};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A point in time with microsecond precision, as stored in every record.
///
/// ```
/// use brook::utils::timestamp::BrookTimestamp;
///
/// let timestamp = BrookTimestamp::from(1694968446131680);
/// assert_eq!(timestamp.to_utc_string("%Y-%m-%d %H:%M:%S"), "2023-09-17 16:34:06");
/// assert_eq!(timestamp.as_micros(), 1694968446131680);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct BrookTimestamp(SystemTime);

pub const UTC_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

impl BrookTimestamp {
    pub fn now() -> Self {
        BrookTimestamp::default()
    }

    pub fn zero() -> Self {
        BrookTimestamp(UNIX_EPOCH)
    }

    pub fn as_micros(&self) -> u64 {
        self.0
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_micros() as u64)
            .unwrap_or_default()
    }

    pub fn to_utc_string(&self, format: &str) -> String {
        DateTime::<Utc>::from(self.0).format(format).to_string()
    }
}

impl From<u64> for BrookTimestamp {
    fn from(timestamp: u64) -> Self {
        BrookTimestamp(UNIX_EPOCH + Duration::from_micros(timestamp))
    }
}

impl From<BrookTimestamp> for u64 {
    fn from(timestamp: BrookTimestamp) -> u64 {
        timestamp.as_micros()
    }
}

impl Default for BrookTimestamp {
    fn default() -> Self {
        BrookTimestamp::from(BrookTimestamp(SystemTime::now()).as_micros())
    }
}

impl fmt::Display for BrookTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_utc_string(UTC_TIME_FORMAT))
    }
}
