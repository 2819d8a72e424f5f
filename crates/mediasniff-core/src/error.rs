//! Error types for mediasniff-core
//!
//! Classification itself never fails; a buffer that matches nothing is
//! reported as [`MediaContainerName::Unknown`](crate::MediaContainerName).

/// A container key that does not name any known format
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown container name: {0}")]
pub struct UnknownContainerName(pub String);
