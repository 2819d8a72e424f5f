//! # mediasniff-core
//!
//! Pure Rust media container and elementary stream sniffing.
//!
//! Given the first bytes of a file or stream, [`determine_container`] names
//! the format they most likely belong to. Detection only looks at the
//! buffer it is given: no I/O, no allocation, no global state.
//!
//! ## Detection order
//!
//! 1. ISO base media / QuickTime atom walk
//! 2. Magic numbers on the first bytes
//! 3. Scanning checks for formats without a fixed magic: MPEG-2 program
//!    and transport streams, MJPEG, DV, H.261, H.263, H.264, MPEG-4 visual,
//!    VC-1, SubRip and GSM
//! 4. An AC-3 sync word later in the buffer
//!
//! The first stage that matches wins.
//!
//! ## Example
//!
//! ```
//! use mediasniff_core::{determine_container, MediaContainerName};
//!
//! let mut header = b"fLaC".to_vec();
//! header.resize(64, 0);
//!
//! assert_eq!(determine_container(&header), MediaContainerName::Flac);
//! assert_eq!(determine_container(b"short"), MediaContainerName::Unknown);
//! ```

pub mod bit_reader;
pub mod bytes;
pub mod checks;
pub mod dispatch;
pub mod error;
pub mod types;

#[cfg(test)]
mod testutil;

pub use bit_reader::BitReader;
pub use error::UnknownContainerName;
pub use types::{Detection, MediaContainerName, Stage};

use checks::{
    check_ac3, check_dv, check_eac3, check_gsm, check_h261, check_h263, check_h264, check_mjpeg,
    check_mov, check_mpeg2_program_stream, check_mpeg2_transport_stream, check_mpeg4_bitstream,
    check_srt, check_vc1, find_ac3_sync,
};

/// Smallest buffer any check will look at.
pub const MIN_BUFFER_SIZE: usize = 12;

/// Checks for formats without a reliable magic number, in priority order.
const FALLBACK_CHECKS: [(MediaContainerName, fn(&[u8]) -> bool); 11] = [
    (MediaContainerName::Mpeg2Ps, check_mpeg2_program_stream),
    (MediaContainerName::Mpeg2Ts, check_mpeg2_transport_stream),
    (MediaContainerName::Mjpeg, check_mjpeg),
    (MediaContainerName::Dv, check_dv),
    (MediaContainerName::H261, check_h261),
    (MediaContainerName::H263, check_h263),
    (MediaContainerName::H264, check_h264),
    (MediaContainerName::Mpeg4Bs, check_mpeg4_bitstream),
    (MediaContainerName::Vc1, check_vc1),
    (MediaContainerName::Srt, check_srt),
    (MediaContainerName::Gsm, check_gsm),
];

/// Determine the container type of a buffer holding the start of a file.
///
/// Returns [`MediaContainerName::Unknown`] when nothing matches or the
/// buffer is shorter than [`MIN_BUFFER_SIZE`].
pub fn determine_container(buf: &[u8]) -> MediaContainerName {
    determine_container_with_trace(buf).container
}

/// Like [`determine_container`], also reporting which stage matched.
pub fn determine_container_with_trace(buf: &[u8]) -> Detection {
    if buf.len() < MIN_BUFFER_SIZE {
        return Detection::unknown();
    }

    let detection = detect(buf);
    if detection.container.is_known() {
        tracing::trace!(
            container = detection.container.name(),
            stage = %detection.stage,
            len = buf.len(),
            "Container detected"
        );
    }
    detection
}

fn detect(buf: &[u8]) -> Detection {
    // Cheap and very distinctive, so it goes before anything laxer.
    if check_mov(buf) {
        return Detection::new(MediaContainerName::Mov, Stage::Mov);
    }

    let container = dispatch::check_first_bytes(buf);
    if container.is_known() {
        return Detection::new(container, Stage::FirstBytes);
    }

    if let Some(&(container, _)) = FALLBACK_CHECKS.iter().find(|(_, check)| check(buf)) {
        return Detection::new(container, Stage::Fallback);
    }

    // Offset 0 was already covered by the first bytes lookup.
    if let Some(offset) = find_ac3_sync(buf, 1) {
        let rest = &buf[offset..];
        if check_ac3(rest) {
            return Detection::new(MediaContainerName::Ac3, Stage::Ac3Scan { offset });
        }
        if check_eac3(rest) {
            return Detection::new(MediaContainerName::Eac3, Stage::Ac3Scan { offset });
        }
    }

    Detection::unknown()
}
