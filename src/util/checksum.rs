/// Adds `data` to a running 8-bit sum, discarding carries.
pub fn extend(init_sum: u8, data: &[u8]) -> u8 {
    data.iter().fold(init_sum, |sum, &byte| sum.wrapping_add(byte))
}

/// Turns a running sum into the checksum byte stored in a record.
pub fn finish(sum: u8) -> u8 {
    255 - sum
}

/// Checksum of the byte-count, address and payload fields of one record.
pub fn value(data: &[u8]) -> u8 {
    finish(extend(0, data))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_checksum_standard_results() {
        assert_eq!(0xff, value(&[]));
        assert_eq!(0x00, value(&[0xff]));
        // S0 header: count, address, "HDR"
        assert_eq!(0x1b, value(&[0x06, 0x00, 0x00, b'H', b'D', b'R']));
        // 0xff * 4 = 0x3fc, low byte 0xfc
        assert_eq!(0x03, value(&[0xff; 4]));
    }

    #[test]
    fn test_checksum_extend() {
        let data = [0x13, 0x00, 0x00, 0x01, 0x02, 0x03];
        assert_eq!(value(&data), finish(extend(extend(0, &data[..2]), &data[2..])));
    }

    #[test]
    fn test_checksum_completes_sum() {
        let data: Vec<u8> = (0..=255).collect();
        let sum = extend(0, &data);
        assert_eq!(0xff, sum.wrapping_add(value(&data)));
    }
}
