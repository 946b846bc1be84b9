use super::{decode_gpt_partition_entry, encode_gpt_partition_entry, Entry};

use ptable_codec::{DecodeError, EncodeError};

use crc::crc32::checksum_ieee as crc32;
use log::debug;

/// Decodes `count` consecutive records of `entry_size` bytes.
///
/// The returned order is the on-disk slot order, empty slots included.
pub fn decode_gpt_partition_entry_array(
    bytes: &[u8],
    entry_size: usize,
    count: usize,
) -> Result<Vec<Entry>, DecodeError> {
    let needed = entry_size.checked_mul(count).ok_or(DecodeError::TooShort {
        needed: usize::MAX,
        actual: bytes.len(),
    })?;

    if bytes.len() < needed {
        return Err(DecodeError::TooShort {
            needed,
            actual: bytes.len(),
        });
    }

    let entries = (0..count)
        .map(|i| decode_gpt_partition_entry(&bytes[i * entry_size..], entry_size))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "decoded {} entries of {} bytes, {} in use",
        count,
        entry_size,
        entries.iter().filter(|e| !e.is_empty()).count()
    );

    Ok(entries)
}

/// Encodes exactly `count` entries; padding the table out is up to the caller.
pub fn encode_gpt_partition_entry_array(
    entries: &[Entry],
    entry_size: usize,
    count: usize,
) -> Result<Vec<u8>, EncodeError> {
    if entries.len() != count {
        return Err(EncodeError::CountMismatch {
            expected: count,
            actual: entries.len(),
        });
    }

    let mut bytes = Vec::with_capacity(entry_size.saturating_mul(count));
    for entry in entries {
        bytes.extend(encode_gpt_partition_entry(entry, entry_size)?);
    }

    Ok(bytes)
}

/// CRC-32 (IEEE) over the raw entry array, exactly as read from disk.
#[inline]
pub fn calculate_partition_entry_array_crc32(bytes: &[u8]) -> u32 {
    crc32(bytes)
}
