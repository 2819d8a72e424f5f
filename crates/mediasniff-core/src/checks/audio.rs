//! Audio elementary stream checks: ADTS AAC, AC-3, E-AC-3, DTS, MPEG audio
//! and GSM.
//!
//! The frame based formats walk header to header through the buffer and
//! reject the whole buffer on the first invalid header.

use crate::bit_reader::BitReader;
use crate::bytes::read16;

pub const AC3_SYNC_WORD: u16 = 0x0B77;

const DTS_SYNC_WORD: u64 = 0x7FFE_8001;

/// AC-3 frame size in bytes, indexed by `[frmsizecod][fscod]`
/// (fscod 0 = 48 kHz, 1 = 44.1 kHz, 2 = 32 kHz). ATSC A/52 table 5.18.
const AC3_FRAME_SIZE_TABLE: [[usize; 3]; 38] = [
    [128, 138, 192],
    [128, 140, 192],
    [160, 174, 240],
    [160, 176, 240],
    [192, 208, 288],
    [192, 210, 288],
    [224, 242, 336],
    [224, 244, 336],
    [256, 278, 384],
    [256, 280, 384],
    [320, 348, 480],
    [320, 350, 480],
    [384, 416, 576],
    [384, 418, 576],
    [448, 486, 672],
    [448, 488, 672],
    [512, 556, 768],
    [512, 558, 768],
    [640, 696, 960],
    [640, 698, 960],
    [768, 834, 1152],
    [768, 836, 1152],
    [896, 974, 1344],
    [896, 976, 1344],
    [1024, 1114, 1536],
    [1024, 1116, 1536],
    [1280, 1392, 1920],
    [1280, 1394, 1920],
    [1536, 1670, 2304],
    [1536, 1672, 2304],
    [1792, 1950, 2688],
    [1792, 1952, 2688],
    [2048, 2228, 3072],
    [2048, 2230, 3072],
    [2304, 2506, 3456],
    [2304, 2508, 3456],
    [2560, 2768, 3840],
    [2560, 2770, 3840],
];

/// DTS core sampling frequency codes that are not reserved.
const DTS_SAMPLING_FREQUENCY_VALID: [bool; 16] = [
    false, true, true, true, false, false, true, true, true, false, false, true, true, true, false,
    false,
];

/// DTS extension audio descriptor codes that are not reserved.
const DTS_EXT_AUDIO_ID_VALID: [bool; 8] = [true, false, true, false, false, false, true, false];

/// ADTS framed AAC.
pub fn check_aac(buf: &[u8]) -> bool {
    if buf.len() <= 6 {
        return false;
    }

    let mut offset = 0;
    while offset + 6 < buf.len() {
        match adts_frame_length(&buf[offset..offset + 6]) {
            Some(length) => offset += length,
            None => return false,
        }
    }
    true
}

fn adts_frame_length(header: &[u8]) -> Option<usize> {
    let mut reader = BitReader::new(header);

    // syncword
    if reader.read_bits(12)? != 0xFFF {
        return None;
    }
    // ID
    reader.skip_bits(1)?;
    // layer is always 0
    if reader.read_bits(2)? != 0 {
        return None;
    }
    // protection_absent, profile
    reader.skip_bits(1 + 2)?;
    // sampling_frequency_index 15 is forbidden
    if reader.read_bits(4)? == 15 {
        return None;
    }
    // private bit, channel configuration, original/copy, home,
    // copyright id bit, copyright id start
    reader.skip_bits(1 + 3 + 1 + 1 + 1 + 1)?;

    // Frame length includes the header.
    let length = reader.read_bits(13)? as usize;
    (length > 0).then_some(length)
}

/// AC-3 (A/52 syncinfo + bsi).
pub fn check_ac3(buf: &[u8]) -> bool {
    if buf.len() <= 6 {
        return false;
    }

    let mut offset = 0;
    while offset + 6 < buf.len() {
        match ac3_frame_size(&buf[offset..offset + 6]) {
            Some(size) => offset += size,
            None => return false,
        }
    }
    true
}

fn ac3_frame_size(header: &[u8]) -> Option<usize> {
    let mut reader = BitReader::new(header);

    if reader.read_bits(16)? != u64::from(AC3_SYNC_WORD) {
        return None;
    }
    // crc1
    reader.skip_bits(16)?;

    let sample_rate_code = reader.read_bits(2)? as usize;
    if sample_rate_code == 3 {
        return None;
    }
    let frame_size_code = reader.read_bits(6)? as usize;
    if frame_size_code >= AC3_FRAME_SIZE_TABLE.len() {
        return None;
    }
    // bsid is normally 8 or 6; 16 belongs to E-AC-3
    if reader.read_bits(5)? >= 10 {
        return None;
    }

    Some(AC3_FRAME_SIZE_TABLE[frame_size_code][sample_rate_code])
}

/// Enhanced AC-3.
pub fn check_eac3(buf: &[u8]) -> bool {
    if buf.len() <= 6 {
        return false;
    }

    let mut offset = 0;
    while offset + 6 < buf.len() {
        match eac3_frame_size(&buf[offset..offset + 6]) {
            Some(size) => offset += size,
            None => return false,
        }
    }
    true
}

fn eac3_frame_size(header: &[u8]) -> Option<usize> {
    let mut reader = BitReader::new(header);

    if reader.read_bits(16)? != u64::from(AC3_SYNC_WORD) {
        return None;
    }
    // strmtyp 3 is reserved
    if reader.read_bits(2)? == 3 {
        return None;
    }
    // substreamid
    reader.skip_bits(3)?;

    // frmsiz counts 16-bit words minus one, including syncinfo
    let frame_size = (reader.read_bits(11)? as usize + 1) * 2;
    if frame_size < 7 {
        return None;
    }
    // fscod, fscod2/numblkscod, acmod, lfeon
    reader.skip_bits(2 + 2 + 3 + 1)?;

    let bit_stream_id = reader.read_bits(5)?;
    if !(11..=16).contains(&bit_stream_id) {
        return None;
    }

    Some(frame_size)
}

/// DTS core audio (ETSI TS 102 114).
pub fn check_dts(buf: &[u8]) -> bool {
    if buf.len() <= 11 {
        return false;
    }

    let mut offset = 0;
    while offset + 11 < buf.len() {
        match dts_frame_size(&buf[offset..offset + 11]) {
            // FSIZE excludes one byte.
            Some(size) => offset += size + 1,
            None => return false,
        }
    }
    true
}

fn dts_frame_size(header: &[u8]) -> Option<usize> {
    let mut reader = BitReader::new(header);

    if reader.read_bits(32)? != DTS_SYNC_WORD {
        return None;
    }
    // frame type, deficit sample count
    reader.skip_bits(1 + 5)?;
    // CRC present flag must be 0
    if reader.read_bits(1)? != 0 {
        return None;
    }
    // number of PCM sample blocks
    if reader.read_bits(7)? < 5 {
        return None;
    }
    let frame_size = reader.read_bits(14)? as usize;
    if frame_size < 95 {
        return None;
    }
    // audio channel arrangement
    reader.skip_bits(6)?;
    if !DTS_SAMPLING_FREQUENCY_VALID[reader.read_bits(4)? as usize] {
        return None;
    }
    // transmission bit rate 31 is invalid
    if reader.read_bits(5)? == 31 {
        return None;
    }
    // reserved
    if reader.read_bits(1)? != 0 {
        return None;
    }
    // dynamic range, time stamp, auxiliary data, HDCD
    reader.skip_bits(1 + 1 + 1 + 1)?;
    if !DTS_EXT_AUDIO_ID_VALID[reader.read_bits(3)? as usize] {
        return None;
    }
    // extended coding, audio sync word insertion
    reader.skip_bits(1 + 1)?;
    // low frequency effects flag
    if reader.read_bits(2)? == 3 {
        return None;
    }

    Some(frame_size)
}

/// MPEG audio version ids as coded in the frame header.
const MPEG_VERSION_1: u64 = 3;

/// MPEG audio layer ids as coded in the frame header.
const LAYER_1: u64 = 3;
const LAYER_2: u64 = 2;

/// Sample rate by `[version][sampling index]`; version 1 is reserved.
const MPEG_SAMPLE_RATE_TABLE: [[u32; 4]; 4] = [
    [11025, 12000, 8000, 0],
    [0, 0, 0, 0],
    [22050, 24000, 16000, 0],
    [44100, 48000, 32000, 0],
];

const BIT_RATE_TABLE_V1_L1: [u32; 16] = [
    0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0,
];
const BIT_RATE_TABLE_V1_L2: [u32; 16] = [
    0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0,
];
const BIT_RATE_TABLE_V1_L3: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];
const BIT_RATE_TABLE_V2_L1: [u32; 16] = [
    0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0,
];
const BIT_RATE_TABLE_V2_L23: [u32; 16] = [
    0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0,
];

/// Validate a 4-byte MPEG audio frame header and return the frame size.
fn mpeg_audio_frame_size(header: &[u8]) -> Option<usize> {
    let mut reader = BitReader::new(header.get(..4)?);

    // frame sync, 11 bits all set
    if reader.read_bits(11)? != 0x7FF {
        return None;
    }
    let version = reader.read_bits(2)?;
    if version == 1 {
        return None;
    }
    let layer = reader.read_bits(2)?;
    if layer == 0 {
        return None;
    }
    // protection bit
    reader.skip_bits(1)?;
    let bitrate_index = reader.read_bits(4)? as usize;
    if bitrate_index == 0xF {
        return None;
    }
    let sampling_index = reader.read_bits(2)? as usize;
    if sampling_index == 3 {
        return None;
    }
    let padding = reader.read_bits(1)? as u32;

    let sample_rate = MPEG_SAMPLE_RATE_TABLE[version as usize][sampling_index];
    let bitrate = match (version, layer) {
        (MPEG_VERSION_1, LAYER_1) => BIT_RATE_TABLE_V1_L1[bitrate_index],
        (MPEG_VERSION_1, LAYER_2) => BIT_RATE_TABLE_V1_L2[bitrate_index],
        (MPEG_VERSION_1, _) => BIT_RATE_TABLE_V1_L3[bitrate_index],
        (_, LAYER_1) => BIT_RATE_TABLE_V2_L1[bitrate_index],
        _ => BIT_RATE_TABLE_V2_L23[bitrate_index],
    };
    if bitrate == 0 || sample_rate == 0 {
        return None;
    }

    let frame_size = if layer == LAYER_1 {
        ((12000 * bitrate) / sample_rate + padding) * 4
    } else {
        (144000 * bitrate) / sample_rate + padding
    };
    Some(frame_size as usize)
}

/// Size of an ID3v2 tag, header and optional footer included.
fn id3_tag_size(buf: &[u8]) -> Option<usize> {
    let bytes = buf.get(..10)?;
    let mut size = ((bytes[6] as usize & 0x7F) << 21)
        + ((bytes[7] as usize & 0x7F) << 14)
        + ((bytes[8] as usize & 0x7F) << 7)
        + (bytes[9] as usize & 0x7F)
        + 10;
    // footer present
    if bytes[5] & 0x10 != 0 {
        size += 10;
    }
    Some(size)
}

/// MPEG audio (layers I to III), optionally behind an ID3v2 tag.
///
/// More than ten consecutive valid frames is a confident match. A short
/// buffer only needs more than two.
pub fn check_mp3(buf: &[u8], seen_id3: bool) -> bool {
    if buf.len() < 10 {
        return false;
    }

    let mut offset = if seen_id3 {
        match id3_tag_size(buf) {
            Some(size) => size,
            None => return false,
        }
    } else {
        buf.iter().take_while(|&&b| b == 0).count()
    };

    let mut frames_seen = 0;
    while offset + 3 < buf.len() {
        let Some(frame_size) = mpeg_audio_frame_size(&buf[offset..]) else {
            return false;
        };
        frames_seen += 1;
        if frames_seen > 10 {
            return true;
        }
        offset += frame_size;
    }
    frames_seen > 2
}

/// GSM 06.10 full rate: 33-byte frames whose first nibble is 0xD.
pub fn check_gsm(buf: &[u8]) -> bool {
    // Shorter buffers give too many false positives.
    if buf.len() < 1024 {
        return false;
    }
    buf.iter().step_by(33).all(|&b| b & 0xF0 == 0xD0)
}

/// Offset of the first AC-3 sync word at or after `start` that leaves at
/// least a minimal header in the buffer.
pub fn find_ac3_sync(buf: &[u8], start: usize) -> Option<usize> {
    let mut offset = start;
    while offset + 4 < buf.len() {
        if read16(buf, offset)? == AC3_SYNC_WORD {
            return Some(offset);
        }
        offset += 1;
    }
    None
}
