use serde::{Deserialize, Serialize};

use crate::sniff::SniffError;

/// Largest read limit accepted from config or the command line.
pub const MAX_READ_LIMIT: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub sniff: SniffConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SniffConfig {
    /// Bytes read from the start of each file
    #[serde(default = "default_read_limit")]
    pub read_limit: usize,

    /// Follow symbolic links while scanning directories
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Maximum directory depth for scans (unlimited if unset)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_read_limit() -> usize {
    8192
}

impl Default for SniffConfig {
    fn default() -> Self {
        Self {
            read_limit: default_read_limit(),
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

impl SniffConfig {
    /// Check the read limit is within the accepted range.
    pub fn validate(&self) -> Result<(), SniffError> {
        if self.read_limit < mediasniff_core::MIN_BUFFER_SIZE {
            return Err(SniffError::Config(format!(
                "read_limit must be at least {} bytes, got {}",
                mediasniff_core::MIN_BUFFER_SIZE,
                self.read_limit
            )));
        }
        if self.read_limit > MAX_READ_LIMIT {
            return Err(SniffError::Config(format!(
                "read_limit must be at most {} bytes, got {}",
                MAX_READ_LIMIT, self.read_limit
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
