/*!
 * Segment offset normalization.
 *
 * HLS subtitle segments carry an `X-TIMESTAMP-MAP` header that ties the
 * segment's local clock to the 90kHz MPEG-TS clock of the whole stream.
 * This module reads that header and moves every cue onto the global timeline.
 */

use log::debug;
use crate::errors::SubtitleError;
use crate::subtitle_processor::Document;

/// Metadata key holding the timestamp map
pub const TIMESTAMP_MAP_KEY: &str = "X-TIMESTAMP-MAP";

/// The only accepted `LOCAL` value
pub const ZERO_LOCAL: &str = "00:00:00.000";

/// Ticks per second of the MPEG-TS clock
pub const MPEGTS_CLOCK_HZ: i64 = 90_000;

/// Parsed `X-TIMESTAMP-MAP` value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampMap {
    /// Local cue time matching `mpegts`, the raw `LOCAL` value
    pub local: Option<String>,

    /// MPEG-TS clock value in 90kHz ticks
    pub mpegts: Option<i64>,
}

impl TimestampMap {
    /// Parse a `LOCAL:HH:MM:SS.mmm,MPEGTS:<ticks>` value. Pairs may come in
    /// any order; unknown names and empty values are ignored.
    pub fn parse(value: &str) -> Result<Self, SubtitleError> {
        let mut map = TimestampMap::default();

        for pair in value.split(',') {
            let (name, value) = pair.trim().split_once(':').unwrap_or((pair.trim(), ""));
            match name {
                // Empty values count as absent
                _ if value.is_empty() => {}
                "LOCAL" => map.local = Some(value.to_string()),
                "MPEGTS" => {
                    let ticks = value.parse::<i64>()
                        .map_err(|_| SubtitleError::InvalidTimestampMap(format!("MPEGTS is not an integer: {:?}", value)))?;
                    map.mpegts = Some(ticks);
                }
                _ => {}
            }
        }

        Ok(map)
    }

    /// Fails unless `LOCAL` is absent or exactly `00:00:00.000`
    pub fn check_local(&self) -> Result<(), SubtitleError> {
        match &self.local {
            Some(local) if local != ZERO_LOCAL => {
                Err(SubtitleError::UnsupportedLocalOffset(local.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Segment offset in milliseconds, rounded down so any negative tick
    /// count gives a negative offset
    pub fn offset_ms(&self) -> Result<i64, SubtitleError> {
        let ticks = self.mpegts.unwrap_or(0);
        let scaled = ticks.checked_mul(1000)
            .ok_or_else(|| SubtitleError::InvalidTimestampMap(format!("MPEGTS out of range: {}", ticks)))?;
        Ok(scaled.div_euclid(MPEGTS_CLOCK_HZ))
    }
}

/// Rewrite a document's cues onto the global timeline.
///
/// The `X-TIMESTAMP-MAP` entry is always removed once read. Documents
/// without one are left untouched.
pub fn normalize_offsets(document: &mut Document) -> Result<(), SubtitleError> {
    let Some(value) = document.metadata.get(TIMESTAMP_MAP_KEY) else {
        return Ok(());
    };

    let map = TimestampMap::parse(value)?;
    map.check_local()?;

    document.metadata.shift_remove(TIMESTAMP_MAP_KEY);

    let offset_ms = map.offset_ms()?;
    if offset_ms == 0 {
        return Ok(());
    }

    debug!("Shifting {} cues by {}ms", document.cues.len(), offset_ms);
    for cue in document.cues.iter_mut() {
        cue.shift(offset_ms)?;
    }

    Ok(())
}
