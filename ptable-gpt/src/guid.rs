//! GUIDs as stored by GPT.
//!
//! The first three fields are little-endian, the last eight bytes are taken
//! as-is. `C12A7328-F81F-11D2-BA4B-00A0C93EC93B` is stored as
//! `28 73 2A C1 1F F8 D2 11 BA 4B 00 A0 C9 3E C9 3B`.

use uuid::Uuid;

#[inline]
pub fn decode_guid(bytes: [u8; 16]) -> Uuid {
    Uuid::from_bytes_le(bytes)
}

#[inline]
pub fn encode_guid(guid: &Uuid) -> [u8; 16] {
    guid.to_bytes_le()
}
