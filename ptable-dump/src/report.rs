use std::fmt::{Display, Formatter};

use ptable_gpt::{Entry, Header};
use ptable_mbr::{Mbr, Record};

/// Values are right-aligned so that title and value end at this column.
const WIDTH: usize = 40;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report(Vec<String>);

impl Report {
    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.0.push(line.into());
        self
    }

    pub fn field(&mut self, title: &str, value: impl Display) -> &mut Self {
        let value = value.to_string();
        let pad = WIDTH.saturating_sub(value.len() + title.len());
        self.line(format!("{}:{}{}", title, " ".repeat(pad), value))
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for line in &self.0 {
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn chs(report: &mut Report, title: &str, chs: &ptable_mbr::Chs) {
    let (c, h, s) = chs.to_tuple();
    report.field(title, format!("{}, {}, {}", chs.head, chs.sector, chs.track));
    report.field(&format!("{} (C/H/S)", title), format!("{}/{}/{}", c, h, s));
}

pub fn mbr_record(report: &mut Report, i: usize, record: &Record) {
    let title = |name: &str| format!("#{}.{}", i, name);

    report.line(format!("<<< MBR Partition #{} >>>", i));
    report.field(&title("BootIndicator"), format!("0x{:X}", record.boot_indicator));
    report.field(&title("Is Bootable? (synth)"), yes_no(record.is_bootable()));
    chs(report, &title("StartingCHS"), &record.start);
    report.field(&title("OSType"), format!("0x{:X}", record.os_type));
    report.field(&title("OSType (synth)"), record.os_type_name());
    chs(report, &title("EndingCHS"), &record.end);
    report.field(&title("StartingLBA"), record.starting_lba);
    report.field(&title("SizeInLBA"), record.size_in_lba);
}

pub fn mbr(report: &mut Report, mbr: &Mbr) {
    report.line("<<< MBR >>>");
    report.line(format!("BootCode: 0x{}", hex(&mbr.bootstrap)));
    report.line(format!("UniqueMBRDiskSignature: 0x{}", hex(&mbr.disk_signature)));
    report.line(format!("Unknown: 0x{}", hex(&mbr.reserved)));
    report.line(format!("Signature: 0x{:X}", mbr.signature));

    for (i, record) in mbr.partitions.iter().enumerate() {
        mbr_record(report, i, record);
    }
}

pub fn gpt_header(report: &mut Report, header: &Header) {
    let (major, minor) = header.revision();

    report.line("<<< GPT Header >>>");
    report.field("Signature", format!("0x{}", hex(&header.signature)));
    report.field("Revision", format!("0x{}", hex(&header.revision)));
    report.field("Revision (synth)", format!("{}.{}", major, minor));
    report.field("HeaderSize", header.header_size);
    report.field("HeaderCRC32", format!("0x{:x}", header.header_crc32));
    report.field(
        "HeaderCRC32 (calculated)",
        format!("0x{:x}", header.calculate_header_crc32()),
    );
    report.field("Reserved", format!("0x{}", hex(&header.reserved)));
    report.field("MyLBA", header.my_lba);
    report.field("AlternateLBA", header.alternate_lba);
    report.field("FirstUsableLBA", header.first_usable_lba);
    report.field("LastUsableLBA", header.last_usable_lba);
    report.field("DiskGUID", header.disk_guid().to_string().to_uppercase());
    report.field("PartitionEntryLBA", header.partition_entry_lba);
    report.field("NumberOfPartitionEntries", header.number_of_partition_entries);
    report.field("SizeOfPartitionEntry", header.size_of_partition_entry);
    report.field(
        "PartitionEntryArrayCRC32",
        format!("0x{:x}", header.partition_entry_array_crc32),
    );
}

pub fn gpt_entry(report: &mut Report, i: usize, entry: &Entry) {
    let name = match entry.name() {
        Ok(name) => name,
        Err(e) => format!("<{}>", e),
    };

    report.line(format!("<<< GPT Partition Entry #{} >>>", i));
    report.line(format!("PartitionTypeGUID: {}", hex(&entry.kind)));
    report.line(format!(
        "PartitionTypeGUID (decoded): {} ({})",
        entry.kind().to_string().to_uppercase(),
        entry.kind_name()
    ));
    report.line(format!("UniquePartitionGUID: {}", hex(&entry.guid)));
    report.line(format!(
        "UniquePartitionGUID (decoded): {}",
        entry.guid().to_string().to_uppercase()
    ));
    report.line(format!("StartingLBA: {}", entry.first_lba));
    report.line(format!("EndingLBA: {}", entry.last_lba));
    report.line(format!("Attributes: 0x{:x}", entry.attributes));
    report.line(format!(
        "Attributes (decoded): [{}]",
        entry.attribute_names().join(", ")
    ));
    report.line(format!("PartitionName: {}", hex(&entry.name)));
    report.line(format!("PartitionName (decoded): {}", name));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field() {
        let mut report = Report::default();
        report.field("MyLBA", 1).field("Signature", "0x4546");
        assert_eq!(report.lines()[0], format!("MyLBA:{}1", " ".repeat(34)));
        assert_eq!(report.lines()[0].len(), WIDTH + 1);
        assert_eq!(report.lines()[1].len(), WIDTH + 1);

        // Overlong values are never truncated.
        let long = "x".repeat(50);
        report.field("Long", &long);
        assert_eq!(report.lines()[2], format!("Long:{}", long));
    }

    #[test]
    fn display() {
        let mut report = Report::default();
        report.line("a").line("b");
        assert_eq!(report.to_string(), "a\nb\n");
    }

    #[test]
    fn hex_bytes() {
        assert_eq!(hex(b"EFI PART"), "4546492050415254");
        assert_eq!(hex(&[]), "");
        assert_eq!(hex(&[0x0a, 0xff]), "0aff");
    }

    #[test]
    fn record() {
        let record = Record {
            boot_indicator: 0x80,
            os_type: 0xee,
            starting_lba: 1,
            size_in_lba: 100,
            ..Default::default()
        };

        let mut report = Report::default();
        mbr_record(&mut report, 2, &record);
        let text = report.to_string();
        assert!(text.starts_with("<<< MBR Partition #2 >>>\n"));
        assert!(text.contains("#2.BootIndicator:"));
        assert!(text.contains("GPT Protective"));
        assert!(report
            .lines()
            .iter()
            .any(|l| l.starts_with("#2.Is Bootable? (synth):") && l.ends_with("Yes")));
    }
}
