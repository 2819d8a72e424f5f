//! Helpers for building synthetic headers in unit tests

use bitstream_io::{BigEndian, BitWrite, BitWriter};

/// Big-endian bit string builder.
pub struct Bits {
    writer: BitWriter<Vec<u8>, BigEndian>,
}

impl Bits {
    pub fn new() -> Self {
        Self {
            writer: BitWriter::endian(Vec::new(), BigEndian),
        }
    }

    pub fn put(mut self, bits: u32, value: u64) -> Self {
        self.writer.write(bits, value).unwrap();
        self
    }

    /// Pad with zero bits to a byte boundary and return the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.writer.byte_align().unwrap();
        self.writer.into_writer()
    }
}

/// `count` copies of `header` each zero padded to `frame_len` bytes.
pub fn repeat_frame(header: &[u8], frame_len: usize, count: usize) -> Vec<u8> {
    let mut frame = header.to_vec();
    frame.resize(frame_len, 0);
    frame.repeat(count)
}
