use ptable_codec::{DecodeError, EncodeError};

/// Decodes a null-padded UTF-16LE string.
///
/// The string ends at the first null code unit, or at the end of `bytes`.
pub fn decode_padded_utf16(bytes: &[u8]) -> Result<String, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::InvalidEncoding);
    }

    let units = bytes
        .chunks_exact(2)
        .map(|x| u16::from_le_bytes([x[0], x[1]]))
        .take_while(|&x| x != 0);

    std::char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| DecodeError::InvalidEncoding)
}

/// Encodes `string` as null-terminated UTF-16LE, zero-padded to `len` bytes.
pub fn encode_padded_utf16(string: &str, len: usize) -> Result<Vec<u8>, EncodeError> {
    let mut bytes: Vec<u8> = string.encode_utf16().flat_map(u16::to_le_bytes).collect();

    let needed = bytes.len() + 2;
    if needed > len {
        return Err(EncodeError::TooLong {
            needed,
            capacity: len,
        });
    }

    bytes.resize(len, 0);
    Ok(bytes)
}
