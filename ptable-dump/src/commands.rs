use super::report::{self, hex, Report};
use super::Error;

use std::convert::TryFrom;
use std::io::{Read, Seek, SeekFrom};

use ptable_gpt::check::{check_entries, check_header, Warning};
use ptable_gpt::{
    calculate_partition_entry_array_crc32, decode_gpt_header, decode_gpt_partition_entry_array,
    Entry, Header, HEADER_SIZE,
};
use ptable_mbr::{decode_mbr, Mbr, MBR_SIZE};

/// The outcome of a command: a report for stdout and warnings for stderr.
#[derive(Debug, Default)]
pub struct Dump {
    pub warnings: Vec<String>,
    pub report: Report,
}

fn require<'a>(
    data: &'a [u8],
    needed: usize,
    warnings: &mut Vec<String>,
) -> Result<&'a [u8], Error> {
    if data.len() < needed {
        return Err(Error::Input {
            needed: needed as u64,
            actual: data.len() as u64,
        });
    }

    if data.len() > needed {
        warnings.push(format!("Using only the first {} bytes of input", needed));
    }

    Ok(&data[..needed])
}

fn check_mbr(mbr: &Mbr, force: bool, warnings: &mut Vec<String>) -> Result<(), Error> {
    if !mbr.is_valid() {
        let error = Error::MbrSignature(mbr.signature);
        if !force {
            return Err(error);
        }

        warnings.push(error.to_string());
    }

    Ok(())
}

fn check_gpt_header(header: &Header, force: bool, warnings: &mut Vec<String>) -> Result<(), Error> {
    for warning in check_header(header) {
        match warning {
            Warning::Signature(signature) => {
                let error = Error::GptSignature(hex(&signature));
                if !force {
                    return Err(error);
                }

                warnings.push(error.to_string());
            }

            warning => warnings.push(warning.to_string()),
        }
    }

    Ok(())
}

fn entries(report: &mut Report, entries: &[Entry], all: bool) {
    for (i, entry) in entries.iter().enumerate() {
        if all || !entry.is_empty() {
            report::gpt_entry(report, i, entry);
        }
    }
}

pub fn mbr(data: &[u8], force: bool) -> Result<Dump, Error> {
    let mut dump = Dump::default();

    let data = require(data, MBR_SIZE, &mut dump.warnings)?;
    let mbr = decode_mbr(data)?;
    check_mbr(&mbr, force, &mut dump.warnings)?;

    report::mbr(&mut dump.report, &mbr);
    Ok(dump)
}

pub fn gpt_header(data: &[u8], force: bool) -> Result<Dump, Error> {
    let mut dump = Dump::default();

    let data = require(data, HEADER_SIZE, &mut dump.warnings)?;
    let header = decode_gpt_header(data)?;
    check_gpt_header(&header, force, &mut dump.warnings)?;

    report::gpt_header(&mut dump.report, &header);
    Ok(dump)
}

pub fn gpt_entries(
    data: &[u8],
    size: usize,
    count: usize,
    all: bool,
    crc32: Option<u32>,
) -> Result<Dump, Error> {
    let mut dump = Dump::default();

    let needed = size
        .checked_mul(count)
        .ok_or(Error::Overflow("partition entry array"))?;
    let data = require(data, needed, &mut dump.warnings)?;
    let decoded = decode_gpt_partition_entry_array(data, size, count)?;

    let calculated = calculate_partition_entry_array_crc32(data);
    let status = match crc32 {
        None => "",
        Some(stored) if stored == calculated => " matched",
        Some(stored) => {
            dump.warnings.push(
                Warning::EntryArrayCrc32 {
                    stored,
                    calculated,
                }
                .to_string(),
            );
            " unmatched"
        }
    };

    dump.report.field(
        "PartitionEntryArrayCRC32 (calculated)",
        format!("0x{:x}{}", calculated, status),
    );
    entries(&mut dump.report, &decoded, all);
    Ok(dump)
}

fn read_at(device: &mut (impl Read + Seek), offset: u64, len: usize) -> Result<Vec<u8>, Error> {
    let total = device.seek(SeekFrom::End(0))?;
    let needed = offset
        .checked_add(len as u64)
        .ok_or(Error::Overflow("read offset"))?;

    if needed > total {
        return Err(Error::Input {
            needed,
            actual: total,
        });
    }

    let mut buffer = vec![0u8; len];
    device.seek(SeekFrom::Start(offset))?;
    device.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Dumps a whole disk image: the MBR, the primary GPT header and its entries.
pub fn disk(
    device: &mut (impl Read + Seek),
    block_size: u64,
    all: bool,
    force: bool,
) -> Result<Dump, Error> {
    let mut dump = Dump::default();

    let sector = read_at(device, 0, MBR_SIZE)?;
    let mbr = decode_mbr(&sector)?;
    check_mbr(&mbr, force, &mut dump.warnings)?;
    if !mbr.is_protective() {
        dump.warnings
            .push("MBR has no GPT protective partition".to_string());
    }
    report::mbr(&mut dump.report, &mbr);

    let block = read_at(device, block_size, HEADER_SIZE)?;
    let header = decode_gpt_header(&block)?;
    check_gpt_header(&header, force, &mut dump.warnings)?;
    report::gpt_header(&mut dump.report, &header);

    let offset = header
        .partition_entry_lba
        .checked_mul(block_size)
        .ok_or(Error::Overflow("partition entry LBA"))?;
    let len = header
        .entry_array_len()
        .ok_or(Error::Overflow("partition entry array"))?;
    let size = usize::try_from(header.size_of_partition_entry)
        .map_err(|_| Error::Overflow("partition entry size"))?;
    let count = usize::try_from(header.number_of_partition_entries)
        .map_err(|_| Error::Overflow("partition entry count"))?;

    let raw = read_at(device, offset, len)?;
    let decoded = decode_gpt_partition_entry_array(&raw, size, count)?;
    for warning in check_entries(&header, &raw, &decoded) {
        dump.warnings.push(warning.to_string());
    }

    dump.report.field(
        "PartitionEntryArrayCRC32 (calculated)",
        format!("0x{:x}", calculate_partition_entry_array_crc32(&raw)),
    );
    entries(&mut dump.report, &decoded, all);
    Ok(dump)
}
