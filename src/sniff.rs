//! Reading file headers and classifying them.
//!
//! Only the first `read_limit` bytes of each input are read; classification
//! itself is done by [`mediasniff_core::determine_container_with_trace`].

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use mediasniff_core::{determine_container_with_trace, MediaContainerName, Stage};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::SniffConfig;

/// Path reported for data read from a reader rather than a file.
pub const STDIN_PATH: &str = "-";

/// Errors from reading inputs to classify.
#[derive(Debug, thiserror::Error)]
pub enum SniffError {
    /// The input path does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Reading the input failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Walking a directory failed.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The sniff settings are out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Classification of one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SniffReport {
    pub path: PathBuf,
    pub bytes_read: usize,
    pub container: MediaContainerName,
    pub container_id: u32,
    pub stage: Stage,
}

impl SniffReport {
    fn new(path: PathBuf, buf: &[u8]) -> Self {
        let detection = determine_container_with_trace(buf);
        Self {
            path,
            bytes_read: buf.len(),
            container: detection.container,
            container_id: detection.container.id(),
            stage: detection.stage,
        }
    }
}

/// Read up to `read_limit` bytes from `reader` and classify them.
pub fn sniff_reader<R: Read>(reader: R, config: &SniffConfig) -> Result<SniffReport, SniffError> {
    config.validate()?;
    let buf = read_head(reader, config.read_limit)?;
    Ok(SniffReport::new(PathBuf::from(STDIN_PATH), &buf))
}

/// Classify the start of a file.
pub fn sniff_file(path: &Path, config: &SniffConfig) -> Result<SniffReport, SniffError> {
    config.validate()?;

    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            SniffError::NotFound(path.to_path_buf())
        } else {
            SniffError::Io(e)
        }
    })?;
    let buf = read_head(file, config.read_limit)?;

    let report = SniffReport::new(path.to_path_buf(), &buf);
    debug!(
        "Sniffed {:?}: {} ({} bytes, {})",
        path,
        report.container.name(),
        report.bytes_read,
        report.stage
    );
    Ok(report)
}

fn read_head<R: Read>(reader: R, limit: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(limit);
    reader.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Classify every regular file under `root`.
///
/// Files are read in parallel. Files that cannot be read are logged and
/// left out; an unreadable root is an error. Reports are sorted by path.
pub fn scan_dir(root: &Path, config: &SniffConfig) -> Result<Vec<SniffReport>, SniffError> {
    config.validate()?;
    if !root.exists() {
        return Err(SniffError::NotFound(root.to_path_buf()));
    }

    info!("Scanning directory: {:?}", root);

    let mut walker = WalkDir::new(root).follow_links(config.follow_symlinks);
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }

    let mut reports: Vec<SniffReport> = files
        .par_iter()
        .filter_map(|path| match sniff_file(path, config) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Failed to sniff {:?}: {}", path, e);
                None
            }
        })
        .collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    info!(
        "Scan complete: {} files classified under {:?}",
        reports.len(),
        root
    );
    Ok(reports)
}
