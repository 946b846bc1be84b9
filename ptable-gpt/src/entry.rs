use super::{
    decode_attribute_flags, decode_guid, decode_padded_utf16, encode_guid, encode_padded_utf16,
    partition_type_name, Attributes,
};

use ptable_codec::{codec, Codec, DecodeError, EncodeError};
use uuid::Uuid;

/// Bytes reserved for the UTF-16LE partition name.
pub const NAME_SIZE: usize = 72;

codec! {
    /// A raw partition entry, as laid out on disk.
    ///
    /// Human-readable views of each field are derived on demand.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Entry {
        /// Partition type GUID; all zeroes marks an unused slot.
        pub kind: [u8; 16],
        /// Unique partition GUID.
        pub guid: [u8; 16],
        pub first_lba: u64,
        /// Inclusive.
        pub last_lba: u64,
        pub attributes: u64,
        /// UTF-16LE, null-padded.
        pub name: [u8; 72],
    }
}

impl Entry {
    pub const EMPTY: [u8; 16] = [0; 16];

    pub fn new(
        kind: Uuid,
        guid: Uuid,
        first_lba: u64,
        last_lba: u64,
        attributes: u64,
        name: &str,
    ) -> Result<Self, EncodeError> {
        let mut buff = [0u8; NAME_SIZE];
        buff.copy_from_slice(&encode_padded_utf16(name, NAME_SIZE)?);

        Ok(Self {
            kind: encode_guid(&kind),
            guid: encode_guid(&guid),
            first_lba,
            last_lba,
            attributes,
            name: buff,
        })
    }

    /// Whether this slot is unused, judged from the raw type GUID bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == Self::EMPTY
    }

    #[inline]
    pub fn kind(&self) -> Uuid {
        decode_guid(self.kind)
    }

    #[inline]
    pub fn guid(&self) -> Uuid {
        decode_guid(self.guid)
    }

    #[inline]
    pub fn kind_name(&self) -> &'static str {
        partition_type_name(&self.kind())
    }

    #[inline]
    pub fn attributes(&self) -> Attributes {
        Attributes::from_bits_truncate(self.attributes)
    }

    #[inline]
    pub fn attribute_names(&self) -> Vec<&'static str> {
        decode_attribute_flags(self.attributes)
    }

    #[inline]
    pub fn name(&self) -> Result<String, DecodeError> {
        decode_padded_utf16(&self.name)
    }

    /// Number of blocks covered, or `None` if the range is inverted.
    pub fn blocks(&self) -> Option<u64> {
        self.last_lba
            .checked_sub(self.first_lba)
            .and_then(|x| x.checked_add(1))
    }
}

/// Decodes one entry from the first `size` bytes of `bytes`.
///
/// Bytes between the end of the fields and `size` are padding and are
/// ignored. A `size` below the 128 bytes of fields yields `TooShort`.
pub fn decode_gpt_partition_entry(bytes: &[u8], size: usize) -> Result<Entry, DecodeError> {
    let record = bytes.get(..size).ok_or(DecodeError::TooShort {
        needed: size,
        actual: bytes.len(),
    })?;

    ptable_codec::decode(record)
}

/// Encodes `entry` into a record of exactly `size` bytes, zero-padded.
pub fn encode_gpt_partition_entry(entry: &Entry, size: usize) -> Result<Vec<u8>, EncodeError> {
    if size < Entry::SIZE {
        return Err(EncodeError::RecordTooSmall {
            size,
            minimum: Entry::SIZE,
        });
    }

    let mut record = Vec::with_capacity(size);
    entry.encode(&mut record);
    record.resize(size, 0);
    Ok(record)
}
