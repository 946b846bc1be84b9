use super::{os_type_name, Chs};

use ptable_codec::codec;

codec! {
    /// One of the four 16-byte partition records of an MBR.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Record {
        pub boot_indicator: u8,
        pub start: Chs,
        pub os_type: u8,
        pub end: Chs,
        pub starting_lba: u32,
        pub size_in_lba: u32,
    }
}

impl Record {
    pub const BOOTABLE: u8 = 0x80;
    pub const GPT_PROTECTIVE: u8 = 0xee;

    #[inline]
    pub fn is_bootable(&self) -> bool {
        self.boot_indicator == Self::BOOTABLE
    }

    #[inline]
    pub fn is_gpt_protective(&self) -> bool {
        self.os_type == Self::GPT_PROTECTIVE
    }

    /// Slots with an OS type of zero are unused.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.os_type != 0
    }

    #[inline]
    pub fn os_type_name(&self) -> &'static str {
        os_type_name(self.os_type)
    }

    /// The last LBA covered by this record, if it covers any.
    pub fn ending_lba(&self) -> Option<u32> {
        match self.size_in_lba {
            0 => None,
            n => self.starting_lba.checked_add(n - 1),
        }
    }
}
