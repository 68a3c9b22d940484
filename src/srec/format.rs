use super::{AddressWidth, RecordType};
use crate::util::{checksum, extend_be, extend_hex_upper};

/// S0 record carrying "HDR" at address 0.
pub const HEADER_RECORD: &str = "S00600004844521B";

/// Record counts above this need the 24-bit S6 form.
const MAX_COUNT16: u32 = 0xffff;

/// Formats one record: type digit, byte count, address, payload, checksum.
///
/// The byte count covers the address, the payload and the checksum byte and
/// must fit in one byte.  Line lengths up to 32 with addresses up to 4 bytes
/// stay well inside that, so callers keep the precondition by construction.
fn format_record(
    record_type: RecordType,
    address: u32,
    address_bytes: usize,
    payload: &[u8],
) -> String {
    let byte_count = address_bytes + payload.len() + 1;
    debug_assert!(byte_count <= 0xff);

    let mut fields = Vec::with_capacity(byte_count);
    fields.push(byte_count as u8);
    extend_be(&mut fields, address, address_bytes);
    fields.extend_from_slice(payload);

    let mut line = String::with_capacity(2 + 2 * (fields.len() + 1));
    line.push('S');
    line.push(char::from(b'0' + record_type.digit()));
    extend_hex_upper(&mut line, &fields);
    extend_hex_upper(&mut line, &[checksum::value(&fields)]);
    line
}

/// Formats an S1/S2/S3 data record.  `address` is truncated to the width.
pub fn format_data_record(address: u32, address_width: AddressWidth, payload: &[u8]) -> String {
    format_record(
        address_width.data_record_type(),
        address,
        address_width.bytes() as usize,
        payload,
    )
}

pub fn format_header_record() -> String {
    format_record(RecordType::Header, 0, 2, b"HDR")
}

/// Formats the record count (S5, or S6 past 0xFFFF records) followed by the
/// start address record (S9, S8 or S7 by address width).
///
/// The S6 count field holds 24 bits; larger counts keep their low 24 bits.
pub fn format_footer(
    record_count: u32,
    address_offset: u32,
    address_width: AddressWidth,
) -> [String; 2] {
    let count = if record_count > MAX_COUNT16 {
        format_record(RecordType::Count24, record_count, 3, &[])
    } else {
        format_record(RecordType::Count16, record_count, 2, &[])
    };
    let start = format_record(
        address_width.start_record_type(),
        address_offset,
        address_width.bytes() as usize,
        &[],
    );
    [count, start]
}
