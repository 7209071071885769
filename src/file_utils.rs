use anyhow::{Result, Context, anyhow};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use regex::Regex;
use once_cell::sync::Lazy;
use futures::stream::{self, StreamExt, TryStreamExt};

// @module: File and directory utilities

// @const: Segment filename, a dot-free basename with a .vtt extension
static SEGMENT_FILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^.]+\.vtt$").unwrap()
});

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @checks: Filename matches the segment naming pattern
    pub fn is_segment_file_name(name: &str) -> bool {
        SEGMENT_FILE_REGEX.is_match(name)
    }

    /// Find segment files directly inside `dir`, sorted by filename
    pub fn find_segment_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.with_context(|| format!("Failed to read directory: {:?}", dir))?;

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                if Self::is_segment_file_name(name) {
                    result.push(entry.path().to_path_buf());
                }
            }
        }

        result.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(result)
    }

    /// Read files concurrently, at most `concurrency` at a time.
    ///
    /// Contents come back in the same order as `paths`. The first failure
    /// aborts the whole read.
    pub async fn read_all_to_string(paths: &[PathBuf], concurrency: usize) -> Result<Vec<String>> {
        if concurrency == 0 {
            return Err(anyhow!("Read concurrency must be at least 1"));
        }

        stream::iter(paths)
            .map(|path| async move {
                tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read file: {:?}", path))
            })
            .buffered(concurrency)
            .try_collect()
            .await
    }
}
