/*!
 * Error types for the vttmerge application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while parsing, shifting or normalizing subtitles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// The first line of the file is not exactly `WEBVTT`
    #[error("Missing header: expected WEBVTT, found {0:?}")]
    MalformedHeader(String),

    /// A cue timing line is missing the `-->` arrow or one of its timestamps
    #[error("Malformed cue timing line: {0:?}")]
    MalformedCue(String),

    /// A timestamp is not a valid `HH:MM:SS.mmm` time of day
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// The timestamp map declares a non-zero local clock origin
    #[error("Unexpected LOCAL in X-TIMESTAMP-MAP: {0}")]
    UnsupportedLocalOffset(String),

    /// The timestamp map could not be interpreted
    #[error("Invalid X-TIMESTAMP-MAP: {0}")]
    InvalidTimestampMap(String),

    /// Timestamps can only be shifted forward
    #[error("Negative offset: {0}")]
    InvalidOffset(i64),

    /// Shifting would move a timestamp past the end of the day
    #[error("Shifting {timestamp} by {offset_ms}ms crosses midnight")]
    TimestampOverflow {
        /// Timestamp before the shift
        timestamp: String,
        /// Requested shift in milliseconds
        offset_ms: i64,
    },
}

/// Errors raised by the command line front end. Everything past argument
/// parsing travels as `anyhow::Error` with file context attached.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad command line invocation
    #[error("Usage error: {0}")]
    Usage(String),
}
