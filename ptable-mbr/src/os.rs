/// Well-known MBR partition OS types.
pub const OS_TYPES: &[(u8, &str)] = &[
    (0x00, "Empty"),
    (0x01, "FAT12"),
    (0x04, "FAT16 (<32M)"),
    (0x05, "Extended"),
    (0x06, "FAT16"),
    (0x07, "NTFS / exFAT"),
    (0x0b, "FAT32 (CHS)"),
    (0x0c, "FAT32 (LBA)"),
    (0x0e, "FAT16 (LBA)"),
    (0x0f, "Extended (LBA)"),
    (0x82, "Linux swap"),
    (0x83, "Linux"),
    (0x85, "Linux extended"),
    (0x8e, "Linux LVM"),
    (0xee, "GPT Protective"),
    (0xef, "UEFI System Partition"),
    (0xfd, "Linux RAID autodetect"),
];

pub const UNKNOWN: &str = "?";

pub fn os_type_name(os_type: u8) -> &'static str {
    OS_TYPES
        .iter()
        .find(|(x, _)| *x == os_type)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN)
}
