//! Per-format validators
//!
//! Every check takes the whole buffer and answers whether it looks like the
//! start of one format. Checks never read past the slice and never panic;
//! anything malformed or cut short is simply a non-match.

pub mod audio;
pub mod matroska;
pub mod mov;
pub mod mpeg;
pub mod signature;
pub mod text;
pub mod video;

pub use audio::{
    check_aac, check_ac3, check_dts, check_eac3, check_gsm, check_mp3, find_ac3_sync,
};
pub use matroska::check_webm;
pub use mov::check_mov;
pub use mpeg::{check_mpeg2_program_stream, check_mpeg2_transport_stream};
pub use signature::{check_bink, check_caf};
pub use text::{check_hls, check_srt};
pub use video::{
    check_dv, check_h261, check_h263, check_h264, check_mjpeg, check_mpeg4_bitstream, check_vc1,
};

/// Turn a failed condition into `None` so header parsers can chain `?`.
#[inline]
pub(crate) fn require(cond: bool) -> Option<()> {
    cond.then_some(())
}
