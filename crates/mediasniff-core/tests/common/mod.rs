//! Synthetic sample builders shared by the integration tests

#![allow(dead_code)]

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use mediasniff_core::{MediaContainerName, Stage};

/// A synthetic input and how it must be classified.
pub struct Sample {
    pub name: &'static str,
    pub container: MediaContainerName,
    pub stage: Stage,
    pub bytes: Vec<u8>,
}

impl Sample {
    fn new(name: &'static str, container: MediaContainerName, stage: Stage, bytes: Vec<u8>) -> Self {
        Self {
            name,
            container,
            stage,
            bytes,
        }
    }
}

/// One minimal valid sample of every format with a content check.
pub fn samples() -> Vec<Sample> {
    use MediaContainerName as C;
    vec![
        Sample::new("avi", C::Avi, Stage::FirstBytes, riff(b"AVI ")),
        Sample::new("wav", C::Wav, Stage::FirstBytes, riff(b"WAVE")),
        Sample::new("webm", C::WebM, Stage::FirstBytes, ebml(b"webm")),
        Sample::new("matroska", C::WebM, Stage::FirstBytes, ebml(b"matroska")),
        Sample::new("mp4", C::Mov, Stage::Mov, mp4()),
        Sample::new("hls", C::Hls, Stage::FirstBytes, hls()),
        Sample::new("bink", C::Bink, Stage::FirstBytes, bink()),
        Sample::new("caf", C::Caf, Stage::FirstBytes, caf()),
        Sample::new("dts", C::Dts, Stage::FirstBytes, dts()),
        Sample::new("ac3", C::Ac3, Stage::FirstBytes, ac3(4)),
        Sample::new("eac3", C::Eac3, Stage::FirstBytes, eac3()),
        Sample::new("aac", C::Aac, Stage::FirstBytes, aac()),
        Sample::new("mp3", C::Mp3, Stage::FirstBytes, mp3(12)),
        Sample::new("mpeg2ps", C::Mpeg2Ps, Stage::Fallback, program_stream()),
        Sample::new("mpeg2ts", C::Mpeg2Ts, Stage::Fallback, transport_stream(4)),
        Sample::new("mjpeg", C::Mjpeg, Stage::Fallback, mjpeg()),
        Sample::new("dv", C::Dv, Stage::Fallback, dv()),
        Sample::new("h261", C::H261, Stage::Fallback, h261()),
        Sample::new("h263", C::H263, Stage::Fallback, h263()),
        Sample::new("h264", C::H264, Stage::Fallback, h264()),
        Sample::new("mpeg4", C::Mpeg4Bs, Stage::Fallback, mpeg4()),
        Sample::new("vc1", C::Vc1, Stage::Fallback, vc1()),
        Sample::new("srt", C::Srt, Stage::Fallback, srt()),
        Sample::new("gsm", C::Gsm, Stage::Fallback, gsm()),
    ]
}

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

fn repeat_frame(header: &[u8], frame_len: usize, count: usize) -> Vec<u8> {
    let mut frame = header.to_vec();
    frame.resize(frame_len, 0);
    frame.repeat(count)
}

/// RIFF header with the given form type and some zeroed payload.
pub fn riff(form: &[u8; 4]) -> Vec<u8> {
    let mut buf = b"RIFF".to_vec();
    buf.extend(1024u32.to_le_bytes());
    buf.extend(form);
    buf.extend(b"LIST");
    buf.resize(128, 0);
    buf
}

/// EBML header declaring `doc_type`.
pub fn ebml(doc_type: &[u8]) -> Vec<u8> {
    let mut body = vec![
        0x42, 0x86, 0x81, 0x01, // EBMLVersion
        0x42, 0xF7, 0x81, 0x01, // EBMLReadVersion
        0x42, 0xF2, 0x81, 0x04, // EBMLMaxIDLength
        0x42, 0xF3, 0x81, 0x08, // EBMLMaxSizeLength
        0x42, 0x82,
    ];
    body.push(0x80 | doc_type.len() as u8);
    body.extend_from_slice(doc_type);
    body.extend([0x42, 0x87, 0x81, 0x04]); // DocTypeVersion
    body.extend([0x42, 0x85, 0x81, 0x02]); // DocTypeReadVersion

    let mut buf = vec![0x1A, 0x45, 0xDF, 0xA3, 0x80 | body.len() as u8];
    buf.extend(body);
    // Segment
    buf.extend([0x18, 0x53, 0x80, 0x67, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00]);
    buf
}

/// `ftyp` and `moov` atoms.
pub fn mp4() -> Vec<u8> {
    let mut buf = 24u32.to_be_bytes().to_vec();
    buf.extend(b"ftypisom");
    buf.extend(512u32.to_be_bytes());
    buf.extend(b"isomiso2");
    buf.extend(48u32.to_be_bytes());
    buf.extend(b"moov");
    buf.resize(24 + 48, 0);
    buf
}

pub fn hls() -> Vec<u8> {
    b"#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:6\n#EXT-X-MEDIA-SEQUENCE:0\n\
      #EXTINF:6.0,\nsegment0.ts\n#EXTINF:6.0,\nsegment1.ts\n#EXT-X-ENDLIST\n"
        .to_vec()
}

/// Transport stream packets carrying PID 0x100 with payload only.
pub fn transport_stream(packets: usize) -> Vec<u8> {
    let mut packet = vec![0x47, 0x41, 0x00, 0x10];
    packet.resize(188, 0xFF);
    packet.repeat(packets)
}

/// AC-3 frames at 48 kHz, 256 bytes each.
pub fn ac3(frames: usize) -> Vec<u8> {
    let mut frame = vec![0x0B, 0x77, 0x00, 0x00, 0x08, 0x40];
    frame.resize(256, 0);
    frame.repeat(frames)
}

/// MPEG-1 layer III frames, 128 kbit/s at 44.1 kHz with padding (418 bytes).
pub fn mp3(frames: usize) -> Vec<u8> {
    let mut frame = vec![0xFF, 0xFB, 0x92, 0x64];
    frame.resize(418, 0);
    frame.repeat(frames)
}

pub fn srt() -> Vec<u8> {
    b"1\n00:00:01,000 --> 00:00:04,000\nFirst line\n\n\
      2\n00:00:05,000 --> 00:00:08,000\nSecond line\n"
        .to_vec()
}

/// Bink video header, fields little-endian.
pub fn bink() -> Vec<u8> {
    let mut buf = b"BIKi".to_vec();
    // file size, frames, largest frame, frames, width, height, fps dividend,
    // fps divider, video flags, audio tracks
    for field in [1000u32, 250, 4096, 250, 640, 480, 30, 1, 0, 1] {
        buf.extend(field.to_le_bytes());
    }
    buf
}

/// CAF header with a 16-bit stereo LPCM description chunk.
pub fn caf() -> Vec<u8> {
    let mut buf = b"caff".to_vec();
    buf.extend([0x00, 0x01, 0x00, 0x00]);
    buf.extend(b"desc");
    buf.extend(32u64.to_be_bytes());
    buf.extend(44100f64.to_bits().to_be_bytes());
    buf.extend(b"lpcm");
    for field in [12u32, 4, 1, 2, 16] {
        buf.extend(field.to_be_bytes());
    }
    buf
}

/// DTS core frames, 1024 bytes each.
pub fn dts() -> Vec<u8> {
    let header = Bits::new()
        .put(32, 0x7FFE_8001)
        .put(1, 1)
        .put(5, 31)
        .put(1, 0)
        .put(7, 15)
        .put(14, 1023)
        .put(6, 9)
        .put(4, 13)
        .put(5, 24)
        .put(1, 0)
        .put(4, 0)
        .put(3, 0)
        .put(2, 0)
        .put(2, 0)
        .finish();
    repeat_frame(&header, 1024, 3)
}

/// E-AC-3 independent substream frames, 256 bytes each.
pub fn eac3() -> Vec<u8> {
    let header = Bits::new()
        .put(16, 0x0B77)
        .put(2, 0)
        .put(3, 0)
        .put(11, 127)
        .put(2, 0)
        .put(2, 3)
        .put(3, 2)
        .put(1, 0)
        .put(5, 16)
        .put(3, 0)
        .finish();
    repeat_frame(&header, 256, 4)
}

/// ADTS frames, 256 bytes each.
pub fn aac() -> Vec<u8> {
    repeat_frame(&[0xFF, 0xF1, 0x50, 0x80, 0x20, 0x1F, 0xFC], 256, 4)
}

/// Two MPEG-2 packs around a video PES packet, then the end code.
pub fn program_stream() -> Vec<u8> {
    let pack = [
        0x00, 0x00, 0x01, 0xBA, 0x44, 0x00, 0x04, 0x00, 0x04, 0x01, 0x01, 0x89, 0xC3, 0xF8,
    ];
    let mut buf = pack.to_vec();
    buf.extend([0x00, 0x00, 0x01, 0xE0, 0x00, 0x08]);
    buf.extend([0x80; 8]);
    buf.extend(pack);
    buf.extend([0x00, 0x00, 0x01, 0xB9, 0x00, 0x00]);
    buf
}

/// SOI, APP0, SOS with a little entropy coded data, EOI.
pub fn mjpeg() -> Vec<u8> {
    let mut buf = vec![0xFF, 0xD8];
    buf.extend([0xFF, 0xE0, 0x00, 0x10]);
    buf.extend([0u8; 14]);
    buf.extend([0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
    buf.extend([0x12, 0xFF, 0x00, 0x34]);
    buf.extend([0xFF, 0xD9, 0x00, 0x00, 0x00, 0x00]);
    buf
}

fn dif_block(section: u64, sequence: u64, block: u64) -> Vec<u8> {
    let mut bits = Bits::new()
        .put(3, section)
        .put(1, 1)
        .put(4, 0)
        .put(4, sequence)
        .put(1, 0)
        .put(3, 7)
        .put(8, block);
    if section == 0 {
        bits = bits
            .put(1, 0)
            .put(1, 0)
            .put(11, 0x7FF)
            .put(4, 0)
            .put(4, 0xF)
            .put(4, 0)
            .put(4, 0xF)
            .put(4, 0)
            .put(4, 0xF)
            .put(3, 0)
            .put(24, 0xFF_FFFF);
    }
    let mut block = bits.finish();
    block.resize(80, 0);
    block
}

/// Header block followed by subcode and VAUX blocks of one DIF sequence.
pub fn dv() -> Vec<u8> {
    let mut buf = dif_block(0, 3, 0);
    buf.extend(dif_block(1, 3, 0));
    buf.extend(dif_block(1, 3, 1));
    buf.extend(dif_block(2, 3, 0));
    buf
}

/// Two H.261 picture headers each followed by a GOB start code.
pub fn h261() -> Vec<u8> {
    let picture = Bits::new()
        .put(20, 0x10)
        .put(5, 0)
        .put(6, 0b000100)
        .put(1, 0)
        .put(16, 1)
        .finish();
    let mut buf = picture.clone();
    buf.resize(64, 0xAA);
    buf.extend(&picture);
    buf.resize(128, 0xAA);
    buf
}

/// One H.263 QCIF picture header.
pub fn h263() -> Vec<u8> {
    let mut buf = Bits::new()
        .put(22, 0x20)
        .put(8, 0)
        .put(2, 2)
        .put(3, 0)
        .put(3, 2)
        .finish();
    buf.resize(32, 0xAA);
    buf
}

/// SPS, PPS and an IDR slice.
pub fn h264() -> Vec<u8> {
    let mut buf = vec![0x00, 0x00, 0x00, 0x01, 0x67, 0x42, 0x00, 0x1E];
    buf.extend([0x00, 0x00, 0x00, 0x01, 0x68, 0xCE, 0x38, 0x80]);
    buf.extend([0x00, 0x00, 0x00, 0x01, 0x65, 0x88, 0x84, 0x00]);
    buf
}

/// Visual object sequence, visual object, VOP.
pub fn mpeg4() -> Vec<u8> {
    let mut buf = vec![0x00, 0x00, 0x01, 0xB0, 0x01, 0x00];
    buf.extend([0x00, 0x00, 0x01, 0xB5, 0x09, 0x00]);
    buf.extend([0x00, 0x00, 0x01, 0xB6, 0x10, 0x00, 0x00]);
    buf
}

/// Advanced profile sequence header, entry point and frame.
pub fn vc1() -> Vec<u8> {
    let mut buf = vec![0x00, 0x00, 0x01, 0x0F, 0xCA, 0x00];
    buf.extend([0x00, 0x00, 0x01, 0x0E, 0x00, 0x00]);
    buf.extend([0x00, 0x00, 0x01, 0x0D, 0x00, 0x00]);
    buf.resize(32, 0x55);
    buf
}

/// GSM 06.10 frames, 33 bytes each.
pub fn gsm() -> Vec<u8> {
    repeat_frame(&[0xD5], 33, 40)
}
