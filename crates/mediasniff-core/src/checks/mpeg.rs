//! MPEG-2 systems layer checks (ISO/IEC 13818-1).

use super::require;
use crate::bit_reader::BitReader;
use crate::bytes::{read16, read24};

const PROGRAM_END_CODE: u8 = 0xB9;
const PACK_START_CODE: u8 = 0xBA;

const TS_SYNC_BYTE: u8 = 0x47;

/// Pack header layout, which also decides the allowed stream ids.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PackVersion {
    Mpeg1,
    Mpeg2,
}

/// MPEG-1 system stream or MPEG-2 program stream.
pub fn check_mpeg2_program_stream(buf: &[u8]) -> bool {
    if buf.len() <= 14 {
        return false;
    }

    let mut offset = 0;
    while offset + 14 < buf.len() {
        let Some((version, header_len)) = pack_header(&buf[offset..offset + 14]) else {
            return false;
        };
        offset += header_len;

        // System headers and PES packets until the next pack.
        while offset + 6 < buf.len() && read24(buf, offset) == Some(1) {
            let stream_id = buf[offset + 3];

            let reserved = match version {
                PackVersion::Mpeg1 => stream_id == 0xBC || stream_id >= 0xF0,
                PackVersion::Mpeg2 => (0xFC..=0xFE).contains(&stream_id),
            };
            if reserved {
                return false;
            }

            if stream_id == PACK_START_CODE {
                break;
            }
            if stream_id == PROGRAM_END_CODE {
                return true;
            }

            match read16(buf, offset + 4) {
                Some(pes_length) if pes_length > 0 => offset += 6 + usize::from(pes_length),
                _ => return false,
            }
        }
    }
    // Ran off the end and everything seen was valid.
    true
}

/// Validate a pack header and return its version and byte length.
fn pack_header(header: &[u8]) -> Option<(PackVersion, usize)> {
    let mut reader = BitReader::new(header);

    require(reader.read_bits(24)? == 1)?;
    require(reader.read_bits(8)? == u64::from(PACK_START_CODE))?;

    // MPEG-1 has b0010 here, MPEG-2 b01
    let version = match reader.read_bits(2)? {
        0 => {
            require(reader.read_bits(2)? == 2)?;
            PackVersion::Mpeg1
        }
        1 => PackVersion::Mpeg2,
        _ => return None,
    };

    // system_clock_reference_base with marker bits
    reader.skip_bits(3)?;
    require(reader.read_bits(1)? == 1)?;
    reader.skip_bits(15)?;
    require(reader.read_bits(1)? == 1)?;
    reader.skip_bits(15)?;
    require(reader.read_bits(1)? == 1)?;

    match version {
        PackVersion::Mpeg1 => {
            require(reader.read_bits(1)? == 1)?;
            // program_mux_rate
            reader.skip_bits(22)?;
            require(reader.read_bits(1)? == 1)?;
            Some((version, 12))
        }
        PackVersion::Mpeg2 => {
            // system_clock_reference_extension
            reader.skip_bits(9)?;
            require(reader.read_bits(1)? == 1)?;
            // program_mux_rate
            reader.skip_bits(22)?;
            require(reader.read_bits(2)? == 3)?;
            // reserved
            reader.skip_bits(5)?;
            let pack_stuffing_length = reader.read_bits(3)? as usize;
            Some((version, 14 + pack_stuffing_length))
        }
    }
}

/// MPEG-2 transport stream with 188, 192, 204 or 208 byte packets.
pub fn check_mpeg2_transport_stream(buf: &[u8]) -> bool {
    // Need more than one packet.
    if buf.len() < 250 {
        return false;
    }

    // Allow up to 20 bytes of leading junk.
    let mut offset = buf
        .iter()
        .take(20)
        .position(|&b| b == TS_SYNC_BYTE)
        .unwrap_or(20);

    let mut packet_length = None;
    while offset + 6 < buf.len() {
        if ts_packet_header(&buf[offset..offset + 6]).is_none() {
            return false;
        }

        // Packet length is decided by the first packet.
        let length = *packet_length.get_or_insert_with(|| {
            [188, 192, 204]
                .into_iter()
                .find(|&len| buf.get(offset + len) == Some(&TS_SYNC_BYTE))
                .unwrap_or(208)
        });
        offset += length;
    }
    true
}

fn ts_packet_header(header: &[u8]) -> Option<()> {
    let mut reader = BitReader::new(header);

    require(reader.read_bits(8)? == u64::from(TS_SYNC_BYTE))?;
    // transport_error_indicator, payload_unit_start_indicator,
    // transport_priority
    reader.skip_bits(1 + 1 + 1)?;

    // PIDs 0x0003..=0x000F are reserved
    let pid = reader.read_bits(13)?;
    require(pid < 3 || pid > 15)?;

    // transport_scrambling_control
    reader.skip_bits(2)?;

    let adaptation_field_control = reader.read_bits(2)?;
    require(adaptation_field_control != 0)?;

    if adaptation_field_control >= 2 {
        // continuity_counter
        reader.skip_bits(4)?;
        let adaptation_field_length = reader.read_bits(8)?;
        if adaptation_field_control == 2 {
            require(adaptation_field_length == 183)?;
        } else {
            require(adaptation_field_length <= 182)?;
        }
    }
    Some(())
}
