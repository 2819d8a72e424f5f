//! EBML header check for Matroska and WebM

use crate::bit_reader::BitReader;
use crate::bytes::fourcc;

const EBML_HEADER: u64 = 0x1A45_DFA3;

const EBML_VERSION: u64 = 0x4286;
const EBML_READ_VERSION: u64 = 0x42F7;
const EBML_MAX_ID_LENGTH: u64 = 0x42F2;
const EBML_MAX_SIZE_LENGTH: u64 = 0x42F3;
const DOC_TYPE: u64 = 0x4282;
const DOC_TYPE_VERSION: u64 = 0x4287;
const DOC_TYPE_READ_VERSION: u64 = 0x4285;
const VOID: u64 = 0xEC;
const CRC32: u64 = 0xBF;

/// Marker bit for each element id width, added back after the value bits.
const ID_PREFIX: [u64; 4] = [0x80, 0x4000, 0x20_0000, 0x1000_0000];

/// Read an element id with its length marker left in place.
///
/// Ids are one to four bytes wide. `None` for anything invalid or cut off.
fn element_id(reader: &mut BitReader<'_>) -> Option<u64> {
    if reader.bits_available() < 8 {
        return None;
    }
    let mut value_bits = 0;
    for prefix in ID_PREFIX {
        value_bits += 7;
        if reader.read_flag()? {
            return Some(reader.read_bits(value_bits)? | prefix);
        }
    }
    None
}

/// Read a variable size integer (one to eight bytes) without its marker.
///
/// An invalid or truncated value is reported as larger than what is left in
/// the buffer so that callers reject it through their size checks.
fn vint(reader: &mut BitReader<'_>) -> u64 {
    vint_value(reader).unwrap_or_else(|| reader.bits_available() / 8 + 2)
}

fn vint_value(reader: &mut BitReader<'_>) -> Option<u64> {
    if reader.bits_available() < 8 {
        return None;
    }
    let mut value_bits = 0;
    for _ in 0..8 {
        value_bits += 7;
        if reader.read_flag()? {
            return reader.read_bits(value_bits);
        }
    }
    None
}

/// EBML header whose DocType is `webm` or `matroska`.
pub fn check_webm(buf: &[u8]) -> bool {
    if buf.len() <= 12 {
        return false;
    }

    let mut reader = BitReader::new(buf);
    if element_id(&mut reader) != Some(EBML_HEADER) {
        return false;
    }
    let header_size = vint(&mut reader);
    if reader.bits_available() / 8 < header_size {
        return false;
    }

    while reader.bits_available() > 0 {
        let id = element_id(&mut reader);
        let size = vint(&mut reader);
        match id {
            Some(
                EBML_VERSION | EBML_READ_VERSION | EBML_MAX_ID_LENGTH | EBML_MAX_SIZE_LENGTH
                | DOC_TYPE_VERSION | DOC_TYPE_READ_VERSION | VOID | CRC32,
            ) => {
                let skipped = size
                    .checked_mul(8)
                    .and_then(|bits| reader.skip_bits(bits));
                if skipped.is_none() {
                    return false;
                }
            }
            Some(DOC_TYPE) => return doc_type_is_matroska(&mut reader).unwrap_or(false),
            _ => return false,
        }
    }
    false
}

fn doc_type_is_matroska(reader: &mut BitReader<'_>) -> Option<bool> {
    let first = reader.read_bits(32)?;
    if first == u64::from(fourcc(b"webm")) {
        return Some(true);
    }
    if first == u64::from(fourcc(b"matr")) {
        return Some(reader.read_bits(32)? == u64::from(fourcc(b"oska")));
    }
    Some(false)
}
