//! Video elementary stream checks.
//!
//! The start-code formats (H.261, H.263, H.264, MPEG-4 visual, VC-1) have no
//! unit lengths, so they scan for start codes and validate the few header
//! bits right after each one. Running out of start codes is a match once
//! enough structurally valid units were seen.

use super::require;
use crate::bit_reader::BitReader;
use crate::bytes::{advance_to_start_code, read16, read32};

/// Outcome of validating a header that may be cut off by the buffer end.
enum Header {
    Valid,
    Invalid,
    Truncated,
}

/// H.261 (ITU-T H.261 03/1993).
pub fn check_h261(buf: &[u8]) -> bool {
    if buf.len() <= 16 {
        return false;
    }

    let mut offset = 0;
    let mut seen_start_code = false;
    loop {
        // 20-bit picture start code
        if !advance_to_start_code(buf, &mut offset, 4, 20, 0x10) {
            return seen_start_code;
        }

        match h261_picture_header(&buf[offset..]) {
            Header::Valid => {}
            Header::Invalid => return false,
            // Buffer ended mid header; everything before it was fine.
            Header::Truncated => return seen_start_code,
        }

        seen_start_code = true;
        offset += 4;
    }
}

fn h261_picture_header(data: &[u8]) -> Header {
    let mut reader = BitReader::new(data);

    if reader.read_bits(20) != Some(0x10) {
        return Header::Invalid;
    }
    // temporal reference, PTYPE
    if reader.skip_bits(5 + 6).is_none() {
        return Header::Truncated;
    }

    // PEI / PSPARE extra insertion information
    let mut extra = reader.read_flag();
    while extra == Some(true) {
        if reader.skip_bits(8).is_none() {
            return Header::Truncated;
        }
        extra = reader.read_flag();
    }
    if extra.is_none() {
        return Header::Truncated;
    }

    // Group of blocks start code must follow.
    match reader.read_bits(16) {
        Some(1) => Header::Valid,
        Some(_) => Header::Invalid,
        None => Header::Truncated,
    }
}

/// H.263 (ITU-T H.263 01/2005).
pub fn check_h263(buf: &[u8]) -> bool {
    if buf.len() <= 16 {
        return false;
    }

    let mut offset = 0;
    let mut seen_start_code = false;
    loop {
        // 22-bit picture start code
        if !advance_to_start_code(buf, &mut offset, 9, 22, 0x20) {
            return seen_start_code;
        }

        if h263_picture_header(&buf[offset..offset + 9]).is_none() {
            return false;
        }

        seen_start_code = true;
        offset += 9;
    }
}

fn h263_picture_header(header: &[u8]) -> Option<()> {
    let mut reader = BitReader::new(header);

    require(reader.read_bits(22)? == 0x20)?;
    // temporal reference
    reader.skip_bits(8)?;
    // PTYPE starts with b10
    require(reader.read_bits(2)? == 2)?;
    // split screen, document camera, freeze picture release
    reader.skip_bits(1 + 1 + 1)?;

    // source format 0 is forbidden, 6 reserved
    let format = reader.read_bits(3)?;
    require(format != 0 && format != 6)?;

    if format == 7 {
        // PLUSPTYPE
        let ufep = reader.read_bits(3)?;
        if ufep == 1 {
            let format = reader.read_bits(3)?;
            require(format != 0 && format != 7)?;
            reader.skip_bits(11)?;
            require(reader.read_bits(4)? == 8)?;
        } else {
            require(ufep == 0)?;
        }

        let picture_type_code = reader.read_bits(3)?;
        require(picture_type_code != 6 && picture_type_code != 7)?;

        // reference picture resampling, reduced resolution update,
        // rounding type
        reader.skip_bits(1 + 1 + 1)?;
        require(reader.read_bits(3)? == 1)?;
    }
    Some(())
}

/// H.264 Annex B byte stream.
pub fn check_h264(buf: &[u8]) -> bool {
    if buf.len() <= 4 {
        return false;
    }

    let mut offset = 0;
    let mut parameter_sets = 0;
    loop {
        if !advance_to_start_code(buf, &mut offset, 4, 24, 1) {
            return parameter_sets > 0;
        }

        match h264_nal_header(&buf[offset..offset + 4]) {
            Some(7 | 8) => parameter_sets += 1,
            Some(_) => {}
            None => return false,
        }

        offset += 4;
    }
}

/// Validate the NAL header after a start code and return `nal_unit_type`.
fn h264_nal_header(header: &[u8]) -> Option<u64> {
    let mut reader = BitReader::new(header);

    require(reader.read_bits(24)? == 1)?;
    // forbidden_zero_bit
    require(reader.read_bits(1)? == 0)?;

    let nal_ref_idc = reader.read_bits(2)?;
    let nal_unit_type = reader.read_bits(5)?;
    match nal_unit_type {
        // IDR slice must be a reference
        5 => require(nal_ref_idc != 0)?,
        // SEI, access unit delimiter, end of sequence, end of stream, filler
        6 | 9 | 10 | 11 | 12 => require(nal_ref_idc == 0)?,
        _ => {}
    }
    Some(nal_unit_type)
}

const VISUAL_OBJECT_SEQUENCE_START_CODE: u64 = 0xB0;
const VISUAL_OBJECT_SEQUENCE_END_CODE: u64 = 0xB1;
const VISUAL_OBJECT_START_CODE: u64 = 0xB5;
const VOP_START_CODE: u64 = 0xB6;

/// Reserved `profile_and_level_indication` ranges (ISO/IEC 14496-2 Annex G).
const MPEG4_RESERVED_PROFILES: [(u64, u64); 12] = [
    (0x04, 0x10),
    (0x13, 0x20),
    (0x23, 0x31),
    (0x35, 0x41),
    (0x43, 0x60),
    (0x65, 0x70),
    (0x73, 0x80),
    (0x83, 0x90),
    (0x95, 0xA0),
    (0xA4, 0xB0),
    (0xB5, 0xC0),
    (0xC3, 0xD0),
];

#[derive(Default)]
struct Mpeg4Counts {
    sequence_start: u32,
    sequence_end: u32,
    visual_object: u32,
    vop: u32,
}

/// Raw MPEG-4 part 2 visual bitstream.
pub fn check_mpeg4_bitstream(buf: &[u8]) -> bool {
    if buf.len() <= 4 {
        return false;
    }

    let mut offset = 0;
    let mut counts = Mpeg4Counts::default();
    loop {
        if !advance_to_start_code(buf, &mut offset, 6, 24, 1) {
            // Need at least a sequence start and a visual object.
            return counts.sequence_start > 0 && counts.visual_object > 0;
        }

        if mpeg4_start_code(&buf[offset..offset + 6], &mut counts).is_none() {
            return false;
        }

        offset += 6;
    }
}

fn mpeg4_start_code(header: &[u8], counts: &mut Mpeg4Counts) -> Option<()> {
    let mut reader = BitReader::new(header);

    require(reader.read_bits(24)? == 1)?;

    // 0x30..=0xAF and 0xB7..=0xB9 are reserved
    let start_code = reader.read_bits(8)?;
    require(!(0x30..=0xAF).contains(&start_code))?;
    require(!(0xB7..=0xB9).contains(&start_code))?;

    match start_code {
        VISUAL_OBJECT_SEQUENCE_START_CODE => {
            counts.sequence_start += 1;
            let profile = reader.read_bits(8)?;
            require(profile > 0 && profile < 0xE4)?;
            require(
                MPEG4_RESERVED_PROFILES
                    .iter()
                    .all(|&(low, high)| profile < low || profile > high),
            )?;
        }
        VISUAL_OBJECT_SEQUENCE_END_CODE => {
            counts.sequence_end += 1;
            require(counts.sequence_end <= counts.sequence_start)?;
        }
        VISUAL_OBJECT_START_CODE => {
            counts.visual_object += 1;
            if reader.read_flag()? {
                let verid = reader.read_bits(4)?;
                require(verid > 0 && verid < 3)?;
                // visual_object_priority
                require(reader.read_bits(3)? != 0)?;
            }
            let visual_object_type = reader.read_bits(4)?;
            require(visual_object_type > 0 && visual_object_type < 6)?;
        }
        VOP_START_CODE => {
            counts.vop += 1;
            require(counts.vop <= counts.visual_object)?;
        }
        _ => {}
    }
    Some(())
}

const VC1_FRAME_START_CODE: u64 = 0x0D;
const VC1_ENTRY_POINT_START_CODE: u64 = 0x0E;
const VC1_SEQUENCE_START_CODE: u64 = 0x0F;

/// VC-1 (SMPTE 421M), either RCV metadata (Annex L) or an Annex E stream.
pub fn check_vc1(buf: &[u8]) -> bool {
    if buf.len() < 24 {
        return false;
    }

    if buf[0] == 0xC5 && read32(buf, 4) == Some(0x04) && read32(buf, 20) == Some(0x0C) {
        return vc1_struct_c(&buf[8..20]).is_some();
    }

    let mut offset = 0;
    let mut counts = Vc1Counts::default();
    loop {
        if !advance_to_start_code(buf, &mut offset, 5, 24, 1) {
            return counts.sequence_headers > 0 && counts.frames > 0;
        }

        if vc1_start_code(&buf[offset..offset + 5], &mut counts).is_none() {
            return false;
        }

        offset += 5;
    }
}

#[derive(Default)]
struct Vc1Counts {
    sequence_headers: u32,
    frames: u32,
}

fn vc1_start_code(header: &[u8], counts: &mut Vc1Counts) -> Option<()> {
    let mut reader = BitReader::new(header);

    require(reader.read_bits(24)? == 1)?;
    match reader.read_bits(8)? {
        VC1_SEQUENCE_START_CODE => {
            counts.sequence_headers += 1;
            match reader.read_bits(2)? {
                // simple, main
                0 | 1 => require(reader.read_bits(2)? == 0)?,
                // advanced: level 0..=4, colordiff_format 1
                3 => {
                    require(reader.read_bits(3)? <= 4)?;
                    require(reader.read_bits(2)? == 1)?;
                }
                // complex
                _ => return None,
            }
        }
        // entry point only after a sequence header
        VC1_ENTRY_POINT_START_CODE => require(counts.sequence_headers > 0)?,
        VC1_FRAME_START_CODE => counts.frames += 1,
        _ => {}
    }
    Some(())
}

/// STRUCT_C and STRUCT_A of the Annex L sequence layer.
fn vc1_struct_c(data: &[u8]) -> Option<()> {
    let mut reader = BitReader::new(data);

    let profile = reader.read_bits(4)?;
    if profile == 0 || profile == 4 {
        // simple or main
        // FRMRTQ_POSTPROC, BITRTQ_POSTPROC, LOOPFILTER
        reader.skip_bits(3 + 5 + 1)?;
        require(reader.read_bits(1)? == 0)?;
        // MULTIRES
        reader.skip_bits(1)?;
        require(reader.read_bits(1)? == 1)?;
        // FASTUVMC, EXTENDED_MV, DQUANT, VSTRANSFORM
        reader.skip_bits(1 + 1 + 2 + 1)?;
        require(reader.read_bits(1)? == 0)?;
        // OVERLAP, SYNCMARKER, RANGERED, MAXBFRAMES, QUANTIZER, FINTERPFLAG
        reader.skip_bits(1 + 1 + 1 + 3 + 2 + 1)?;
        require(reader.read_bits(1)? == 1)?;
    } else {
        // advanced profile metadata
        require(profile == 12)?;
        require(reader.read_bits(28)? == 0)?;
    }

    // VERT_SIZE, HORIZ_SIZE
    require(reader.read_bits(32)? <= 8192)?;
    require(reader.read_bits(32)? <= 8192)?;
    Some(())
}

/// Motion JPEG: a run of JPEG markers (ISO/IEC 10918-1 Annex B).
pub fn check_mjpeg(buf: &[u8]) -> bool {
    if buf.len() < 16 {
        return false;
    }

    let mut offset = 0;
    let mut last_restart: Option<u8> = None;
    let mut num_codes = 0;
    while offset + 5 < buf.len() {
        if buf[offset] != 0xFF {
            return false;
        }
        let code = buf[offset + 1];
        if code < 0xC0 && code != 0x01 {
            return false;
        }

        match code {
            // fill bytes
            0xFF => {
                offset += 1;
                continue;
            }
            // EOI
            0xD9 => return true,
            // SOI, TEM
            0xD8 | 0x01 => offset += 2,
            // RSTn must cycle 0..=7
            0xD0..=0xD7 => {
                let restart = code & 0x07;
                if let Some(last) = last_restart {
                    if restart != (last + 1) % 8 {
                        return false;
                    }
                }
                last_restart = Some(restart);
                offset += 2;
            }
            _ => {
                let Some(length) = read16(buf, offset + 2) else {
                    return false;
                };
                let length = usize::from(length) + 2;

                if code == 0xDA {
                    // SOS: header is followed by entropy coded data in which
                    // every 0xFF is stuffed with 0x00.
                    let components = usize::from(buf[offset + 4]);
                    if length != 8 + 2 * components {
                        return false;
                    }
                    offset += length;
                    while offset + 2 < buf.len() {
                        if buf[offset] == 0xFF && buf[offset + 1] != 0 {
                            break;
                        }
                        offset += 1;
                    }
                } else {
                    offset += length;
                }
            }
        }
        num_codes += 1;
    }
    num_codes > 1
}

/// DV DIF blocks (SMPTE 314M).
pub fn check_dv(buf: &[u8]) -> bool {
    if buf.len() <= 11 {
        return false;
    }

    let mut offset = 0;
    let mut state = DvState::default();
    while offset + 11 < buf.len() {
        if dif_block_header(&buf[offset..offset + 11], &mut state).is_none() {
            return false;
        }
        offset += 80;
    }
    true
}

#[derive(Default)]
struct DvState {
    current_sequence: Option<u64>,
    // Only sections 0..=4 occur, the sixth slot is never touched.
    last_block_number: [i32; 6],
}

fn dif_block_header(header: &[u8], state: &mut DvState) -> Option<()> {
    let mut reader = BitReader::new(header);

    // sections 5, 6 and 7 are reserved
    let section = reader.read_bits(3)? as usize;
    require(section < 5)?;
    require(reader.read_bits(1)? == 1)?;
    reader.skip_bits(4)?;
    let sequence = reader.read_bits(4)?;
    // FSC
    reader.skip_bits(1)?;
    require(reader.read_bits(3)? == 7)?;
    let block_number = reader.read_bits(8)? as i32;

    if section == 0 {
        // header block reserved bits
        reader.skip_bits(1)?;
        require(reader.read_bits(1)? == 0)?;
        require(reader.read_bits(11)? == 0x7FF)?;
        for _ in 0..3 {
            reader.skip_bits(4)?;
            require(reader.read_bits(4)? == 0xF)?;
        }
        reader.skip_bits(3)?;
        require(reader.read_bits(24)? == 0xFF_FFFF)?;

        state.current_sequence = Some(sequence);
        state.last_block_number = [-1; 6];
    } else {
        // fails when no header was seen yet
        require(state.current_sequence == Some(sequence))?;
        require(block_number > state.last_block_number[section])?;
        state.last_block_number[section] = block_number;
    }
    Some(())
}
