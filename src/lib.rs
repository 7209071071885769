/*!
 * # vttmerge - WebVTT segment merger
 *
 * A Rust library for stitching segmented WebVTT subtitle tracks (as produced
 * for HLS/DASH streams) back into a single, continuous subtitle file.
 *
 * ## Features
 *
 * - Parse and encode WebVTT files, keeping header metadata and cue settings
 * - Apply each segment's `X-TIMESTAMP-MAP` to move cues onto the global timeline
 * - Read all segments of a directory concurrently
 * - Merge every cue into one chronologically sorted track
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timestamp`: Millisecond time-of-day values and forward shifting
 * - `subtitle_processor`: WebVTT documents and cues, parsing and encoding
 * - `timestamp_map`: `X-TIMESTAMP-MAP` handling for a single segment
 * - `file_utils`: Segment discovery and parallel reads
 * - `app_controller`: Main merge workflow
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod timestamp;
pub mod timestamp_map;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, MergeSummary};
pub use errors::{AppError, SubtitleError};
pub use subtitle_processor::{Cue, Document};
pub use timestamp::Timestamp;
pub use timestamp_map::{normalize_offsets, TimestampMap};
