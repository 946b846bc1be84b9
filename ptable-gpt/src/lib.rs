//! The GUID Partition Table: header, partition entries and their checksums.
//!
//! Decoding only fails when a buffer is too short. Signatures, checksums and
//! layout problems are separate queries (see [`Header::is_valid`],
//! [`Header::calculate_header_crc32`] and the [`check`] module), so corrupt
//! or crafted tables can still be inspected.

mod array;
mod attr;
pub mod check;
mod entry;
mod guid;
mod header;
mod kind;
mod name;

pub use array::{
    calculate_partition_entry_array_crc32, decode_gpt_partition_entry_array,
    encode_gpt_partition_entry_array,
};
pub use attr::{decode_attribute_flags, Attributes};
pub use check::Warning;
pub use entry::{decode_gpt_partition_entry, encode_gpt_partition_entry, Entry, NAME_SIZE};
pub use guid::{decode_guid, encode_guid};
pub use header::Header;
pub use kind::{partition_type_name, partition_type_name_str, PARTITION_TYPES};
pub use name::{decode_padded_utf16, encode_padded_utf16};
pub use ptable_codec::{DecodeError, EncodeError};

use ptable_codec::Codec;

use log::debug;
use nbytes::bytes;

pub const HEADER_SIZE: usize = 92;
pub const ENTRY_SIZE: usize = 128;

/// The space UEFI reserves for the partition entry array at minimum.
pub const MIN_ENTRY_ARRAY_SIZE: usize = bytes![16; KiB];

/// The entry count that fills [`MIN_ENTRY_ARRAY_SIZE`] with default-sized entries.
pub const DEFAULT_ENTRY_COUNT: usize = MIN_ENTRY_ARRAY_SIZE / ENTRY_SIZE;

pub const UNKNOWN: &str = "?";

const _: () = assert!(<Header as Codec>::SIZE == HEADER_SIZE);
const _: () = assert!(<Entry as Codec>::SIZE == ENTRY_SIZE);

/// Decodes the first 92 bytes of `bytes` as a GPT header.
pub fn decode_gpt_header(bytes: &[u8]) -> Result<Header, DecodeError> {
    let header: Header = ptable_codec::decode(bytes)?;
    debug!(
        "decoded GPT header: {} entries of {} bytes at LBA {}",
        header.number_of_partition_entries,
        header.size_of_partition_entry,
        header.partition_entry_lba
    );
    Ok(header)
}

pub fn encode_gpt_header(header: &Header) -> [u8; HEADER_SIZE] {
    let mut bytes = [0u8; HEADER_SIZE];
    bytes.copy_from_slice(&ptable_codec::encode(header));
    bytes
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(MIN_ENTRY_ARRAY_SIZE, 16384);
        assert_eq!(DEFAULT_ENTRY_COUNT, 128);
    }

    #[test]
    fn partition_table() {
        // A one-entry table, as it would follow the header on disk.
        let esp = Entry::new(
            decode_guid([
                0x28, 0x73, 0x2a, 0xc1, 0x1f, 0xf8, 0xd2, 0x11, //
                0xba, 0x4b, 0x00, 0xa0, 0xc9, 0x3e, 0xc9, 0x3b,
            ]),
            uuid::Uuid::from_u128(0x42),
            34,
            2047,
            Attributes::REQUIRED.bits(),
            "EFI system partition",
        )
        .unwrap();

        let mut entries = vec![esp];
        entries.resize(
            DEFAULT_ENTRY_COUNT,
            decode_gpt_partition_entry(&[0; 128], 128).unwrap(),
        );
        let array =
            encode_gpt_partition_entry_array(&entries, ENTRY_SIZE, DEFAULT_ENTRY_COUNT).unwrap();
        assert_eq!(array.len(), MIN_ENTRY_ARRAY_SIZE);

        let header = Header {
            signature: Header::SIGNATURE,
            revision: Header::REVISION,
            header_size: HEADER_SIZE as u32,
            header_crc32: 0,
            reserved: [0; 4],
            my_lba: 1,
            alternate_lba: 4095,
            first_usable_lba: 34,
            last_usable_lba: 4062,
            disk_guid: encode_guid(&uuid::Uuid::from_u128(7)),
            partition_entry_lba: 2,
            number_of_partition_entries: DEFAULT_ENTRY_COUNT as u32,
            size_of_partition_entry: ENTRY_SIZE as u32,
            partition_entry_array_crc32: calculate_partition_entry_array_crc32(&array),
        };
        let header = Header {
            header_crc32: header.calculate_header_crc32(),
            ..header
        };

        let header = decode_gpt_header(&encode_gpt_header(&header)).unwrap();
        assert!(header.is_valid());
        assert!(check::check_header(&header).is_empty());

        let raw = header.entry_array(&array).unwrap();
        let decoded = decode_gpt_partition_entry_array(
            raw,
            header.size_of_partition_entry as usize,
            header.number_of_partition_entries as usize,
        )
        .unwrap();
        assert!(check::check_entries(&header, raw, &decoded).is_empty());

        let used: Vec<_> = decoded.iter().filter(|e| !e.is_empty()).collect();
        assert_eq!(used.len(), 1);
        assert_eq!(used[0].kind_name(), "EFI System Partition");
        assert_eq!(used[0].attribute_names(), ["Required Partition"]);
        assert_eq!(used[0].name().unwrap(), "EFI system partition");
    }
}
