//! Formats with a fixed header record after the magic

use super::require;
use crate::bit_reader::BitReader;
use crate::bytes::{fourcc, read32_le};

/// Bink video header: frame count, dimensions, frame rate and audio tracks.
pub fn check_bink(buf: &[u8]) -> bool {
    bink_header(buf).is_some()
}

fn bink_header(buf: &[u8]) -> Option<()> {
    require(buf.len() >= 44)?;

    let frames = read32_le(buf, 8)?;
    require(frames > 0)?;

    let width = read32_le(buf, 20)?;
    require((1..=32767).contains(&width))?;
    let height = read32_le(buf, 24)?;
    require((1..=32767).contains(&height))?;

    let fps_dividend = read32_le(buf, 28)?;
    let fps_divider = read32_le(buf, 32)?;
    require(fps_dividend > 0 && fps_divider > 0)?;

    let audio_tracks = read32_le(buf, 40)?;
    require(audio_tracks <= 256)
}

/// Core Audio Format: file header followed by the audio description chunk.
pub fn check_caf(buf: &[u8]) -> bool {
    if buf.len() < 52 {
        return false;
    }
    caf_header(&mut BitReader::new(buf)).is_some()
}

fn caf_header(reader: &mut BitReader<'_>) -> Option<()> {
    require(reader.read_bits(32)? == u64::from(fourcc(b"caff")))?;
    // mFileVersion
    require(reader.read_bits(16)? == 1)?;
    // mFileFlags
    reader.skip_bits(16)?;

    // First chunk is the 32 byte audio description.
    require(reader.read_bits(32)? == u64::from(fourcc(b"desc")))?;
    require(reader.read_bits(64)? == 32)?;

    // mSampleRate, a float64 that must not be zero
    require(reader.read_bits(64)? != 0)?;
    // mFormatID
    require(reader.read_bits(32)? != 0)?;
    // mFormatFlags, mBytesPerPacket
    reader.skip_bits(32 + 32)?;
    require(reader.read_bits(32)? != 0)
}
