use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use regex::Regex;
use once_cell::sync::Lazy;
use crate::errors::SubtitleError;

// @module: WebVTT timestamp arithmetic

// @const: WebVTT timestamp regex, hours optional
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d{2}):)?(\d{2}):(\d{2})\.(\d{3})$").unwrap()
});

// @const: Length of one day in ms
const DAY_MS: u64 = 24 * 3_600_000;

/// A time of day with millisecond precision.
///
/// Timestamps are plain millisecond counts from `00:00:00.000` and never
/// reach `24:00:00.000`. Ordering follows the millisecond value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    // @field: Milliseconds since midnight
    millis: u32,
}

impl Timestamp {
    /// Midnight, the origin every segment's local clock is expected to use
    pub const ZERO: Timestamp = Timestamp { millis: 0 };

    /// Build a timestamp from milliseconds since midnight
    pub fn from_millis(millis: u64) -> Result<Self, SubtitleError> {
        if millis >= DAY_MS {
            return Err(SubtitleError::InvalidTimestamp(format!("{}ms", millis)));
        }
        Ok(Timestamp { millis: millis as u32 })
    }

    /// Parse `HH:MM:SS.mmm` (or the short `MM:SS.mmm` form)
    pub fn parse(timestamp: &str) -> Result<Self, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());
        let caps = TIMESTAMP_REGEX.captures(timestamp).ok_or_else(invalid)?;

        let field = |idx: usize| -> u64 {
            caps.get(idx).map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };
        let (hours, minutes, seconds, millis) = (field(1), field(2), field(3), field(4));

        if hours >= 24 || minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        Ok(Timestamp {
            millis: ((hours * 3600 + minutes * 60 + seconds) * 1000 + millis) as u32,
        })
    }

    /// Milliseconds since `00:00:00.000`
    pub fn as_millis(&self) -> u64 {
        u64::from(self.millis)
    }

    /// Offset from midnight as a `Duration`
    pub fn to_duration(&self) -> Duration {
        Duration::from_millis(self.as_millis())
    }

    /// Move the timestamp forward by `delta_ms`.
    ///
    /// Only forward shifts are allowed; a negative delta fails with
    /// `InvalidOffset`. A result at or past midnight fails with
    /// `TimestampOverflow` rather than wrapping into the next day.
    pub fn shift(&self, delta_ms: i64) -> Result<Self, SubtitleError> {
        if delta_ms < 0 {
            return Err(SubtitleError::InvalidOffset(delta_ms));
        }

        let shifted = self.as_millis().saturating_add(delta_ms as u64);
        if shifted >= DAY_MS {
            return Err(SubtitleError::TimestampOverflow {
                timestamp: self.to_string(),
                offset_ms: delta_ms,
            });
        }

        Ok(Timestamp { millis: shifted as u32 })
    }

    /// Chronological comparison, used as the merge sort key
    pub fn compare(&self, other: &Timestamp) -> Ordering {
        self.cmp(other)
    }
}

impl FromStr for Timestamp {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ms = self.millis;
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}
