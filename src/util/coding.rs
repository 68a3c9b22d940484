/// Appends the low `width` bytes of `value`, most significant first.
pub fn extend_be(dst: &mut Vec<u8>, value: u32, width: usize) {
    assert!(width <= 4);
    let bytes = value.to_be_bytes();
    dst.extend_from_slice(&bytes[4 - width..]);
}

/// Appends `data` to `dst` as uppercase hex, two digits per byte.
pub fn extend_hex_upper(dst: &mut String, data: &[u8]) {
    dst.push_str(&hex::encode_upper(data));
}
