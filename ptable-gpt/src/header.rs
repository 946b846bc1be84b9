use super::decode_guid;

use std::convert::TryFrom;

use ptable_codec::{codec, encode, DecodeError};
use uuid::Uuid;

use crc::crc32::checksum_ieee as crc32;

codec! {
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Header {
        pub signature: [u8; 8],
        pub revision: [u8; 4],
        pub header_size: u32,
        pub header_crc32: u32,
        pub reserved: [u8; 4],
        pub my_lba: u64,
        pub alternate_lba: u64,
        pub first_usable_lba: u64,
        pub last_usable_lba: u64,
        pub disk_guid: [u8; 16],
        pub partition_entry_lba: u64,
        pub number_of_partition_entries: u32,
        pub size_of_partition_entry: u32,
        pub partition_entry_array_crc32: u32,
    }
}

impl Header {
    pub const SIGNATURE: [u8; 8] = *b"EFI PART";
    pub const REVISION: [u8; 4] = [0, 0, 1, 0];

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.signature == Self::SIGNATURE
    }

    /// CRC-32 of the encoded header with `header_crc32` zeroed.
    ///
    /// Compare against `header_crc32`; nothing here acts on a mismatch.
    pub fn calculate_header_crc32(&self) -> u32 {
        let mut hdr = self.clone();
        hdr.header_crc32 = 0;
        crc32(&encode(&hdr))
    }

    #[inline]
    pub fn disk_guid(&self) -> Uuid {
        decode_guid(self.disk_guid)
    }

    /// The revision as `(major, minor)`; 1.0 is stored as `00 00 01 00`.
    #[inline]
    pub fn revision(&self) -> (u16, u16) {
        let r = self.revision;
        (u16::from_le_bytes([r[2], r[3]]), u16::from_le_bytes([r[0], r[1]]))
    }

    /// The byte length of the partition entry array, if it fits in memory.
    pub fn entry_array_len(&self) -> Option<usize> {
        let size = usize::try_from(self.size_of_partition_entry).ok()?;
        let count = usize::try_from(self.number_of_partition_entries).ok()?;
        size.checked_mul(count)
    }

    /// The leading bytes of `bytes` covered by `partition_entry_array_crc32`.
    pub fn entry_array<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8], DecodeError> {
        let len = self.entry_array_len().ok_or(DecodeError::TooShort {
            needed: usize::MAX,
            actual: bytes.len(),
        })?;

        bytes.get(..len).ok_or(DecodeError::TooShort {
            needed: len,
            actual: bytes.len(),
        })
    }
}
