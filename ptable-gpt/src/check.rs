//! Consistency checks on decoded GPT structures.
//!
//! None of these refuse anything: they report what looks wrong and leave the
//! decision to the caller.

use super::{calculate_partition_entry_array_crc32, Entry, Header, ENTRY_SIZE, HEADER_SIZE};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    #[error("invalid signature {0:02x?}")]
    Signature([u8; 8]),

    #[error("header size {0} is smaller than 92 bytes")]
    HeaderSize(u32),

    #[error("header CRC32 mismatch: stored {stored:#010x}, calculated {calculated:#010x}")]
    HeaderCrc32 { stored: u32, calculated: u32 },

    #[error("first usable LBA {first} is past last usable LBA {last}")]
    UsableRange { first: u64, last: u64 },

    #[error("partition entry size {0} is not 128 times a power of two")]
    EntrySize(u32),

    #[error("partition entry array needs {needed} bytes, got {actual}")]
    EntryArrayTruncated { needed: usize, actual: usize },

    #[error(
        "partition entry array CRC32 mismatch: stored {stored:#010x}, calculated {calculated:#010x}"
    )]
    EntryArrayCrc32 { stored: u32, calculated: u32 },

    #[error("entry #{0} ends before it starts")]
    Inverted(usize),

    #[error("entry #{0} lies outside the usable LBA range")]
    OutOfBounds(usize),

    #[error("entries #{0} and #{1} overlap")]
    Overlap(usize, usize),

    #[error("entries #{0} and #{1} share a unique partition GUID")]
    DuplicateGuid(usize, usize),
}

/// Checks a header on its own.
pub fn check_header(header: &Header) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if !header.is_valid() {
        warnings.push(Warning::Signature(header.signature));
    }

    if (header.header_size as usize) < HEADER_SIZE {
        warnings.push(Warning::HeaderSize(header.header_size));
    }

    let calculated = header.calculate_header_crc32();
    if calculated != header.header_crc32 {
        warnings.push(Warning::HeaderCrc32 {
            stored: header.header_crc32,
            calculated,
        });
    }

    if header.first_usable_lba > header.last_usable_lba {
        warnings.push(Warning::UsableRange {
            first: header.first_usable_lba,
            last: header.last_usable_lba,
        });
    }

    let esize = header.size_of_partition_entry;
    if esize as usize % ENTRY_SIZE != 0 || !(esize as usize / ENTRY_SIZE).is_power_of_two() {
        warnings.push(Warning::EntrySize(esize));
    }

    warnings
}

/// Checks the raw entry array and its decoded entries against `header`.
///
/// `array` is the raw bytes starting at the first entry; `entries` is the
/// decoded array in slot order.
pub fn check_entries(header: &Header, array: &[u8], entries: &[Entry]) -> Vec<Warning> {
    let mut warnings = Vec::new();

    match header.entry_array(array) {
        Ok(raw) => {
            let calculated = calculate_partition_entry_array_crc32(raw);
            if calculated != header.partition_entry_array_crc32 {
                warnings.push(Warning::EntryArrayCrc32 {
                    stored: header.partition_entry_array_crc32,
                    calculated,
                });
            }
        }

        Err(_) => warnings.push(Warning::EntryArrayTruncated {
            needed: header.entry_array_len().unwrap_or(usize::MAX),
            actual: array.len(),
        }),
    }

    let usable = header.first_usable_lba..=header.last_usable_lba;
    let used: Vec<_> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.is_empty())
        .collect();

    for &(i, entry) in &used {
        if entry.first_lba > entry.last_lba {
            warnings.push(Warning::Inverted(i));
            continue;
        }

        // Make sure entries don't claim blocks outside the usable range
        if !usable.contains(&entry.first_lba) || !usable.contains(&entry.last_lba) {
            warnings.push(Warning::OutOfBounds(i));
        }
    }

    // Make sure that entries don't overlap or share a GUID.
    for (n, &(i, a)) in used.iter().enumerate() {
        for &(j, b) in &used[n + 1..] {
            let ordered = a.first_lba <= a.last_lba && b.first_lba <= b.last_lba;
            if ordered && a.first_lba <= b.last_lba && b.first_lba <= a.last_lba {
                warnings.push(Warning::Overlap(i, j));
            }

            if a.guid == b.guid {
                warnings.push(Warning::DuplicateGuid(i, j));
            }
        }
    }

    warnings
}
