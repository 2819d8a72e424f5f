//! Mediasniff - identify media formats from their first bytes
//!
//! This library crate wraps [`mediasniff_core`] with file and directory
//! handling and the configuration used by the `mediasniff` binary.

pub mod config;
pub mod sniff;

pub use mediasniff_core::{determine_container, Detection, MediaContainerName, Stage};
pub use sniff::{scan_dir, sniff_file, sniff_reader, SniffError, SniffReport};
