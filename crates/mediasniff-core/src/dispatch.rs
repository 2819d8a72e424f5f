//! Magic number lookup on the first bytes of the buffer

use crate::bytes::{read16, read32, UTF8_BOM};
use crate::checks::{
    check_aac, check_ac3, check_bink, check_caf, check_dts, check_eac3, check_hls, check_mp3,
    check_webm,
};
use crate::types::MediaContainerName;

const ASF_GUID: [u8; 16] = [
    0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE,
    0x6C,
];

const WTV_GUID: [u8; 16] = [
    0xB7, 0xD8, 0x00, 0x20, 0x37, 0x49, 0xDA, 0x11, 0xA6, 0x4E, 0x00, 0x07, 0xE9, 0x5E, 0xAD,
    0x8D,
];

const AMR_SIGNATURE: &[u8] = b"#!AMR";
const ASS_SIGNATURE: &[u8] = b"[Script Info]";

/// Classify by leading magic bytes, falling back to the MP3 frame walk.
///
/// Buffers shorter than 12 bytes are never classified here.
pub fn check_first_bytes(buf: &[u8]) -> MediaContainerName {
    if buf.len() < 12 {
        return MediaContainerName::Unknown;
    }

    four_byte_magic(buf)
        .or_else(|| three_byte_magic(buf))
        .or_else(|| two_byte_magic(buf))
        .or_else(|| check_mp3(buf, false).then_some(MediaContainerName::Mp3))
        .unwrap_or(MediaContainerName::Unknown)
}

fn four_byte_magic(buf: &[u8]) -> Option<MediaContainerName> {
    let tag_at = |offset| read32(buf, offset).unwrap_or(0);

    match &buf[..4] {
        [0x1A, 0x45, 0xDF, 0xA3] => check_webm(buf).then_some(MediaContainerName::WebM),
        [0x30, 0x26, 0xB2, 0x75] => {
            buf.starts_with(&ASF_GUID).then_some(MediaContainerName::Asf)
        }
        b"#!AM" => buf.starts_with(AMR_SIGNATURE).then_some(MediaContainerName::Amr),
        b"#EXT" => check_hls(buf).then_some(MediaContainerName::Hls),
        b".RMF" => (buf[4] == 0 && buf[5] == 0).then_some(MediaContainerName::Rm),
        b".ra\xFD" => Some(MediaContainerName::Rm),
        [b'B', b'I', b'K', b'b' | b'd' | b'f' | b'g' | b'h' | b'i'] => {
            check_bink(buf).then_some(MediaContainerName::Bink)
        }
        b"caff" => check_caf(buf).then_some(MediaContainerName::Caf),
        b"DEXA" => {
            let dimensions_ok = buf.len() > 15
                && read16(buf, 11).is_some_and(|width| width <= 2048)
                && read16(buf, 13).is_some_and(|height| height <= 2048);
            dimensions_ok.then_some(MediaContainerName::Dxa)
        }
        b"DTSH" => (&buf[4..8] == b"DHDR").then_some(MediaContainerName::DtsHd),
        [0x64, 0xA3, 0x01..=0x04, 0x00] | [0x00, 0x01..=0x03, 0xA3, 0x64] => {
            (tag_at(4) != 0 && tag_at(8) != 0).then_some(MediaContainerName::Ircam)
        }
        b"fLaC" => Some(MediaContainerName::Flac),
        [b'F', b'L', b'V', 0..=4] => {
            (buf[5] == 0 && tag_at(5) > 8).then_some(MediaContainerName::Flv)
        }
        b"FORM" => {
            matches!(&buf[8..12], b"AIFF" | b"AIFC").then_some(MediaContainerName::Aiff)
        }
        b"MAC " => Some(MediaContainerName::Ape),
        b"ON2 " => (&buf[8..12] == b"ON2f").then_some(MediaContainerName::Avi),
        b"OggS" => (buf[5] <= 7).then_some(MediaContainerName::Ogg),
        b"RF64" => {
            (buf.len() > 16 && &buf[12..16] == b"ds64").then_some(MediaContainerName::Wav)
        }
        b"RIFF" => match &buf[8..12] {
            b"AVI " | b"AVIX" | b"AVI\x19" | b"AMV " => Some(MediaContainerName::Avi),
            b"WAVE" => Some(MediaContainerName::Wav),
            _ => None,
        },
        b"[Scr" => buf.starts_with(ASS_SIGNATURE).then_some(MediaContainerName::Ass),
        [0xEF, 0xBB, 0xBF, b'['] => buf[UTF8_BOM.len()..]
            .starts_with(ASS_SIGNATURE)
            .then_some(MediaContainerName::Ass),
        // DTS core sync word in its 16 and 14 bit, big and little endian forms
        [0x7F, 0xFE, 0x80, 0x01]
        | [0xFE, 0x7F, 0x01, 0x80]
        | [0x1F, 0xFF, 0xE8, 0x00]
        | [0xFF, 0x1F, 0x00, 0xE8] => check_dts(buf).then_some(MediaContainerName::Dts),
        [0xB7, 0xD8, 0x00, 0x20] => {
            buf.starts_with(&WTV_GUID).then_some(MediaContainerName::Wtv)
        }
        _ => None,
    }
}

fn three_byte_magic(buf: &[u8]) -> Option<MediaContainerName> {
    match &buf[..3] {
        b"CWS" | b"FWS" => Some(MediaContainerName::Swf),
        b"ID3" => check_mp3(buf, true).then_some(MediaContainerName::Mp3),
        _ => None,
    }
}

fn two_byte_magic(buf: &[u8]) -> Option<MediaContainerName> {
    match read16(buf, 0)? {
        0x0B77 => {
            if check_ac3(buf) {
                Some(MediaContainerName::Ac3)
            } else {
                check_eac3(buf).then_some(MediaContainerName::Eac3)
            }
        }
        0xFFF0 | 0xFFF1 | 0xFFF8 | 0xFFF9 => check_aac(buf).then_some(MediaContainerName::Aac),
        _ => None,
    }
}
