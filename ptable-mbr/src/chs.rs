use ptable_codec::codec;

codec! {
    /// A packed cylinder-head-sector address.
    ///
    /// Fields are named after, and stored in, the on-disk byte order: head,
    /// then sector, then track. The sector byte carries the two high bits of
    /// the cylinder in bits 6 and 7. Use [`Chs::to_tuple`] for the
    /// conventional `(cylinder, head, sector)` ordering.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Chs {
        pub head: u8,
        pub sector: u8,
        pub track: u8,
    }
}

impl Chs {
    /// The 10-bit cylinder number.
    #[inline]
    pub fn cylinder(&self) -> u16 {
        u16::from(self.track) | (u16::from(self.sector & 0xc0) << 2)
    }

    /// The 6-bit, one-based sector number.
    #[inline]
    pub fn sector_number(&self) -> u8 {
        self.sector & 0x3f
    }

    #[inline]
    pub fn to_tuple(&self) -> (u16, u8, u8) {
        (self.cylinder(), self.head, self.sector_number())
    }
}
