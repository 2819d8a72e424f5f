//! Top-level atom walk for QuickTime and ISO base media files (ISO/IEC 14496-12).

use crate::bytes::{fourcc, read32};

/// Atom types allowed at the top level of a file.
const TOP_LEVEL_ATOMS: [u32; 19] = [
    fourcc(b"ftyp"),
    fourcc(b"pdin"),
    fourcc(b"bloc"),
    fourcc(b"moov"),
    fourcc(b"moof"),
    fourcc(b"mfra"),
    fourcc(b"mdat"),
    fourcc(b"free"),
    fourcc(b"skip"),
    fourcc(b"meta"),
    fourcc(b"meco"),
    fourcc(b"styp"),
    fourcc(b"sidx"),
    fourcc(b"ssix"),
    fourcc(b"prft"),
    fourcc(b"uuid"),
    fourcc(b"emsg"),
    // QuickTime only
    fourcc(b"wide"),
    fourcc(b"pnot"),
];

const ATOM_HEADER_SIZE: u64 = 8;

/// Every atom before the end of the buffer is a known top-level type and
/// fits in what remains.
pub fn check_mov(buf: &[u8]) -> bool {
    if buf.len() <= 8 {
        return false;
    }

    let mut offset = 0;
    while offset + 8 < buf.len() {
        match atom_size(buf, offset) {
            Some(AtomSize::ToEnd) => return true,
            Some(AtomSize::Bytes(size)) => offset += size,
            None => return false,
        }
    }
    true
}

enum AtomSize {
    /// Size 0, the atom runs to the end of the file
    ToEnd,
    Bytes(usize),
}

fn atom_size(buf: &[u8], offset: usize) -> Option<AtomSize> {
    let size = read32(buf, offset)?;
    let atom_type = read32(buf, offset + 4)?;
    if !TOP_LEVEL_ATOMS.contains(&atom_type) {
        return None;
    }

    let size = match size {
        0 => return Some(AtomSize::ToEnd),
        // 64-bit largesize follows the type
        1 => {
            let high = read32(buf, offset + 8)?;
            let low = read32(buf, offset + 12)?;
            (u64::from(high) << 32) | u64::from(low)
        }
        size => u64::from(size),
    };

    let remaining = (buf.len() - offset) as u64;
    if size < ATOM_HEADER_SIZE || size > remaining {
        return None;
    }
    usize::try_from(size).ok().map(AtomSize::Bytes)
}
