//! Byte-level helpers shared by the format checks

/// Pack four bytes into a big-endian tag, e.g. `tag(b'R', b'I', b'F', b'F')`.
pub const fn tag(a: u8, b: u8, c: u8, d: u8) -> u32 {
    u32::from_be_bytes([a, b, c, d])
}

/// Pack a four character code.
pub const fn fourcc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn read16(buf: &[u8], offset: usize) -> Option<u16> {
    let bytes = buf.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

pub fn read24(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset.checked_add(3)?)?;
    Some(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
}

pub fn read32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub fn read32_le(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Advance `offset` to the first position whose top `num_bits` of the next
/// three bytes equal `start_code`, requiring more than `bytes_needed` bytes
/// to remain at that position.
///
/// Returns `false` when the buffer runs out first. `num_bits` is at most 24
/// and `bytes_needed` at least 3.
pub fn advance_to_start_code(
    buf: &[u8],
    offset: &mut usize,
    bytes_needed: usize,
    num_bits: u32,
    start_code: u32,
) -> bool {
    debug_assert!(bytes_needed >= 3);
    debug_assert!(num_bits <= 24);

    let shift = 24 - num_bits;
    let mask = (1u32 << num_bits) - 1;
    while *offset + bytes_needed < buf.len() {
        match read24(buf, *offset) {
            Some(next) if (next >> shift) & mask == start_code => return true,
            Some(_) => *offset += 1,
            None => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag() {
        assert_eq!(tag(b'R', b'I', b'F', b'F'), 0x5249_4646);
        assert_eq!(fourcc(b"fLaC"), tag(b'f', b'L', b'a', b'C'));
    }

    #[test]
    fn test_reads_are_bounds_checked() {
        let buf = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(read16(&buf, 2), Some(0x0304));
        assert_eq!(read16(&buf, 3), None);
        assert_eq!(read24(&buf, 1), Some(0x020304));
        assert_eq!(read32(&buf, 0), Some(0x01020304));
        assert_eq!(read32_le(&buf, 0), Some(0x04030201));
        assert_eq!(read32(&buf, 1), None);
        assert_eq!(read32(&buf, usize::MAX), None);
    }

    #[test]
    fn test_advance_to_start_code() {
        let buf = [0xAA, 0x00, 0x00, 0x01, 0xB3, 0x00, 0x00, 0x00];
        let mut offset = 0;
        assert!(advance_to_start_code(&buf, &mut offset, 4, 24, 1));
        assert_eq!(offset, 1);

        // Not enough bytes after the start code.
        let mut offset = 0;
        assert!(!advance_to_start_code(&buf, &mut offset, 7, 24, 1));
    }

    #[test]
    fn test_advance_to_partial_start_code() {
        // H.261 picture start code is 20 bits: 0000 0000 0000 0001 0000
        let buf = [0x00, 0x01, 0x00, 0x00, 0x00, 0x00];
        let mut offset = 0;
        assert!(advance_to_start_code(&buf, &mut offset, 4, 20, 0x10));
        assert_eq!(offset, 0);
    }
}
