//! Bounds-checked big-endian bit reader over a byte slice

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead};

/// Big-endian bit reader with an explicit bit budget.
///
/// Every read and skip checks the remaining budget first, so a failed call
/// never consumes partial data and never touches bytes past the slice.
pub struct BitReader<'a> {
    inner: bitstream_io::BitReader<Cursor<&'a [u8]>, BigEndian>,
    remaining: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the whole slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: bitstream_io::BitReader::endian(Cursor::new(data), BigEndian),
            remaining: data.len() as u64 * 8,
        }
    }

    /// Number of bits left to read.
    pub fn bits_available(&self) -> u64 {
        self.remaining
    }

    /// Read `n` bits (1 to 64) as an unsigned value.
    pub fn read_bits(&mut self, n: u32) -> Option<u64> {
        if n == 0 || n > 64 || u64::from(n) > self.remaining {
            return None;
        }
        let value = self.inner.read::<u64>(n).ok()?;
        self.remaining -= u64::from(n);
        Some(value)
    }

    /// Read a single bit as a flag.
    pub fn read_flag(&mut self) -> Option<bool> {
        self.read_bits(1).map(|bit| bit == 1)
    }

    /// Skip `n` bits.
    pub fn skip_bits(&mut self, n: u64) -> Option<()> {
        if n > self.remaining {
            return None;
        }
        let mut left = n;
        while left > 0 {
            let step = left.min(u64::from(u32::MAX)) as u32;
            self.inner.skip(step).ok()?;
            left -= u64::from(step);
        }
        self.remaining -= n;
        Some(())
    }
}
