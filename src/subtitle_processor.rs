use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Result, Context};
use indexmap::IndexMap;
use log::debug;
use crate::errors::SubtitleError;
use crate::timestamp::Timestamp;

// @module: WebVTT parsing and encoding

// @const: Required first header line
pub const WEBVTT_HEADER: &str = "WEBVTT";

// @const: Cue timing arrow token
pub const CUE_ARROW: &str = "-->";

// @const: Separator between header and cue blocks
const BLOCK_SEPARATOR: &str = "\n\n";

// @struct: Single WebVTT cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Start time
    pub start: Timestamp,

    // @field: End time
    pub end: Timestamp,

    // @field: Cue settings after the end timestamp, kept verbatim
    pub styles: String,

    // @field: Payload lines
    pub rows: Vec<String>,
}

impl Cue {
    /// Creates a new cue
    pub fn new(start: Timestamp, end: Timestamp, styles: impl Into<String>, rows: Vec<String>) -> Self {
        Cue {
            start,
            end,
            styles: styles.into(),
            rows,
        }
    }

    /// Parse one trimmed, non-empty cue block
    fn parse_block(block: &str) -> Result<Self, SubtitleError> {
        let mut lines = block.split('\n');
        let timing = lines.next().unwrap_or_default();

        let mut tokens = timing.split_whitespace();
        let (start, arrow, end) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(start), Some(arrow), Some(end)) => (start, arrow, end),
            _ => return Err(SubtitleError::MalformedCue(timing.to_string())),
        };

        if arrow != CUE_ARROW {
            return Err(SubtitleError::MalformedCue(timing.to_string()));
        }

        Ok(Cue {
            start: start.parse()?,
            end: end.parse()?,
            styles: tokens.collect::<Vec<_>>().join(" "),
            rows: lines.map(str::to_string).collect(),
        })
    }

    /// Shift both timestamps forward by `offset_ms`
    pub fn shift(&mut self, offset_ms: i64) -> Result<(), SubtitleError> {
        self.start = self.start.shift(offset_ms)?;
        self.end = self.end.shift(offset_ms)?;
        Ok(())
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.start, CUE_ARROW, self.end)?;
        if !self.styles.is_empty() {
            write!(f, " {}", self.styles)?;
        }
        for row in &self.rows {
            write!(f, "\n{}", row)?;
        }
        Ok(())
    }
}

/// A parsed WebVTT file: header metadata plus cues in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// `NAME=VALUE` header entries, in the order they appeared
    pub metadata: IndexMap<String, String>,

    /// Cues in the order they appeared
    pub cues: Vec<Cue>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document without metadata from a list of cues
    pub fn from_cues(cues: Vec<Cue>) -> Self {
        Document {
            metadata: IndexMap::new(),
            cues,
        }
    }

    /// Parse WebVTT text into a document.
    ///
    /// Blocks are separated by a blank line, so a blank line inside a cue
    /// payload starts a new block.
    pub fn parse_vtt_string(content: &str) -> Result<Self, SubtitleError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let content = content.replace("\r\n", "\n");

        let mut blocks = content.split(BLOCK_SEPARATOR);
        let mut header = blocks.next().unwrap_or_default().split('\n');

        let first_line = header.next().unwrap_or_default();
        if first_line != WEBVTT_HEADER {
            return Err(SubtitleError::MalformedHeader(first_line.to_string()));
        }

        let mut metadata = IndexMap::new();
        for line in header.filter(|line| !line.is_empty()) {
            let (name, value) = line.split_once('=').unwrap_or((line, ""));
            metadata.insert(name.to_string(), value.to_string());
        }

        let mut cues = Vec::new();
        for block in blocks {
            let block = block.trim();
            if block.is_empty() {
                continue;
            }
            cues.push(Cue::parse_block(block)?);
        }

        debug!("Parsed {} metadata entries and {} cues", metadata.len(), cues.len());

        Ok(Document { metadata, cues })
    }

    /// Encode the document as WebVTT text
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Write the document to a WebVTT file, replacing any existing file
    pub fn write_to_vtt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        write!(file, "{}", self)
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", WEBVTT_HEADER)?;
        for (name, value) in &self.metadata {
            writeln!(f, "{}={}", name, value)?;
        }
        writeln!(f)?;

        for (i, cue) in self.cues.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", BLOCK_SEPARATOR)?;
            }
            write!(f, "{}", cue)?;
        }
        writeln!(f)
    }
}
