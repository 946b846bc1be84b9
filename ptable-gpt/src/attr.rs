use bitflags::bitflags;

bitflags! {
    /// The generic partition entry attribute bits.
    ///
    /// Bits 3-47 are reserved and bits 48-63 are defined by the partition
    /// type; neither has a flag here, so entries keep the raw value too.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Attributes: u64 {
        const REQUIRED = 1 << 0;
        const NO_BLOCK_IO_PROTOCOL = 1 << 1;
        const LEGACY_BIOS_BOOTABLE = 1 << 2;
    }
}

const LABELS: [(Attributes, &str); 3] = [
    (Attributes::REQUIRED, "Required Partition"),
    (Attributes::NO_BLOCK_IO_PROTOCOL, "No Block IO Protocol"),
    (Attributes::LEGACY_BIOS_BOOTABLE, "Legacy BIOS Bootable"),
];

impl Attributes {
    /// Labels of the known bits that are set, lowest bit first.
    pub fn labels(&self) -> Vec<&'static str> {
        LABELS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect()
    }
}

/// Labels the known bits of a raw attribute value; unknown bits are dropped.
pub fn decode_attribute_flags(value: u64) -> Vec<&'static str> {
    Attributes::from_bits_truncate(value).labels()
}
