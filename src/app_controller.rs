use anyhow::{Result, Context, anyhow};
use log::{info, debug};
use std::fmt;
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::subtitle_processor::Document;
use crate::timestamp_map;

// @module: Application controller for segment merging

/// Counts reported after a successful merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    /// Segment files found in the input directory
    pub files: usize,
    /// Segments that contributed cues
    pub segments: usize,
    /// Segments dropped because they had no cues
    pub empty_segments: usize,
    /// Cues written to the output
    pub cues: usize,
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} files, {} segments merged, {} empty skipped, {} cues",
            self.files, self.segments, self.empty_segments, self.cues
        )
    }
}

/// Main application controller for merging subtitle segments
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()
            .context("Configuration validation failed")?;

        Ok(Self { config })
    }

    /// Merge every segment in `input_dir` into `output_file`.
    ///
    /// Nothing is written unless every segment was read, parsed and
    /// normalized successfully.
    pub async fn run(&self, input_dir: &Path, output_file: &Path) -> Result<MergeSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_segment_files(input_dir)?;
        debug!("Found {} segment files in {:?}", files.len(), input_dir);

        let contents = FileManager::read_all_to_string(&files, self.config.read_concurrency).await?;

        let mut segments = Vec::with_capacity(files.len());
        for (path, content) in files.iter().zip(contents) {
            let document = Document::parse_vtt_string(&content)
                .with_context(|| format!("Failed to parse subtitle file: {:?}", path))?;
            segments.push((path.clone(), document));
        }

        let (merged, mut summary) = Self::merge_documents(segments)?;
        summary.files = files.len();

        merged.write_to_vtt(output_file)?;

        info!("Merged {} in {:.3}s", summary, start_time.elapsed().as_secs_f64());
        info!("Success: {}", output_file.display());

        Ok(summary)
    }

    /// Combine parsed segments into one chronologically sorted document.
    ///
    /// Segments without cues are dropped before their timestamp map is
    /// read. The others are normalized, concatenated in the given order and
    /// stable-sorted by start time.
    pub fn merge_documents(segments: Vec<(PathBuf, Document)>) -> Result<(Document, MergeSummary)> {
        let mut summary = MergeSummary {
            files: segments.len(),
            ..MergeSummary::default()
        };
        let mut merged = Document::new();

        for (path, mut document) in segments {
            if document.cues.is_empty() {
                debug!("Skipping empty segment {:?}", path);
                summary.empty_segments += 1;
                continue;
            }

            timestamp_map::normalize_offsets(&mut document)
                .with_context(|| format!("Failed to apply timestamp map in {:?}", path))?;

            summary.segments += 1;
            merged.cues.append(&mut document.cues);
        }

        merged.cues.sort_by(|a, b| a.start.compare(&b.start));
        summary.cues = merged.cues.len();

        Ok((merged, summary))
    }
}
