use humantime::format_duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
    time::Duration,
};

/// A duration which is written and parsed in the human readable form, e.g. `100ms` or `2s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct BrookDuration {
    duration: Duration,
}

impl BrookDuration {
    pub const ZERO: BrookDuration = BrookDuration {
        duration: Duration::ZERO,
    };

    pub fn new(duration: Duration) -> BrookDuration {
        BrookDuration { duration }
    }

    pub fn from_millis(millis: u64) -> BrookDuration {
        BrookDuration::new(Duration::from_millis(millis))
    }

    pub fn from_secs(secs: u64) -> BrookDuration {
        BrookDuration::new(Duration::from_secs(secs))
    }

    pub fn as_human_time_string(&self) -> String {
        format!("{}", format_duration(self.duration))
    }

    pub fn as_millis(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    pub fn get_duration(&self) -> Duration {
        self.duration
    }

    pub fn is_zero(&self) -> bool {
        self.duration.is_zero()
    }
}

impl FromStr for BrookDuration {
    type Err = humantime::DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = &s.to_lowercase();
        if s == "0" || s == "none" || s == "disabled" {
            Ok(BrookDuration::ZERO)
        } else {
            Ok(BrookDuration {
                duration: humantime::parse_duration(s)?,
            })
        }
    }
}

impl From<Duration> for BrookDuration {
    fn from(duration: Duration) -> Self {
        BrookDuration { duration }
    }
}

impl From<BrookDuration> for Duration {
    fn from(value: BrookDuration) -> Self {
        value.duration
    }
}

impl Display for BrookDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_human_time_string())
    }
}

impl Serialize for BrookDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_human_time_string())
    }
}

impl<'de> Deserialize<'de> for BrookDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        BrookDuration::from_str(&value).map_err(serde::de::Error::custom)
    }
}
