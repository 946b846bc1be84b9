//! The legacy Master Boot Record.
//!
//! ```text
//! 0x000  bootstrap code           440 bytes
//! 0x1b8  unique disk signature      4 bytes
//! 0x1bc  reserved                   2 bytes
//! 0x1be  partition records      4 x 16 bytes
//! 0x1fe  boot signature (0xaa55)    2 bytes
//! ```

mod chs;
mod os;
mod record;

pub use chs::Chs;
pub use os::{os_type_name, OS_TYPES, UNKNOWN};
pub use record::Record;
pub use ptable_codec::DecodeError;

use ptable_codec::{codec, Codec};

use log::{debug, warn};

pub const MBR_SIZE: usize = 512;

codec! {
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Mbr {
        pub bootstrap: [u8; 440],
        pub disk_signature: [u8; 4],
        pub reserved: [u8; 2],
        pub partitions: [Record; 4],
        pub signature: u16,
    }
}

const _: () = assert!(<Mbr as Codec>::SIZE == MBR_SIZE);

impl Mbr {
    pub const SIGNATURE: u16 = 0xaa55;

    /// Whether the boot signature is present.
    ///
    /// Decoding never checks this; callers must before trusting the sector.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.signature == Self::SIGNATURE
    }

    #[inline]
    pub fn disk_signature_value(&self) -> u32 {
        u32::from_le_bytes(self.disk_signature)
    }

    /// Whether any slot holds a GPT protective partition.
    pub fn is_protective(&self) -> bool {
        self.partitions.iter().any(Record::is_gpt_protective)
    }
}

/// Decodes the first 512 bytes of `bytes` as an MBR.
pub fn decode_mbr(bytes: &[u8]) -> Result<Mbr, DecodeError> {
    if bytes.len() > MBR_SIZE {
        warn!(
            "using only the first {} of {} bytes",
            MBR_SIZE,
            bytes.len()
        );
    }

    let mbr: Mbr = ptable_codec::decode(bytes)?;
    debug!(
        "decoded MBR: signature {:#06x}, {} used slot(s)",
        mbr.signature,
        mbr.partitions.iter().filter(|p| p.is_used()).count()
    );
    Ok(mbr)
}

pub fn encode_mbr(mbr: &Mbr) -> [u8; MBR_SIZE] {
    let mut sector = [0u8; MBR_SIZE];
    sector.copy_from_slice(&ptable_codec::encode(mbr));
    sector
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::{Rng, RngCore};

    fn sample() -> [u8; MBR_SIZE] {
        let mut sector = [0u8; MBR_SIZE];
        for (i, b) in sector[..440].iter_mut().enumerate() {
            *b = i as u8;
        }
        sector[440..444].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        sector[444..446].copy_from_slice(&[0x5a, 0xa5]);

        // A bootable Linux partition followed by a protective one.
        sector[446..462].copy_from_slice(&[
            0x80, 0x20, 0x21, 0x00, 0x83, 0xfe, 0xff, 0xff, //
            0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00,
        ]);
        sector[462..478].copy_from_slice(&[
            0x00, 0x00, 0x02, 0x00, 0xee, 0xff, 0xff, 0xff, //
            0x01, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
        ]);
        sector[510] = 0x55;
        sector[511] = 0xaa;
        sector
    }

    #[test]
    fn decode() {
        let mbr = decode_mbr(&sample()).unwrap();
        assert!(mbr.is_valid());
        assert!(mbr.is_protective());
        assert_eq!(mbr.bootstrap[439], 439u16 as u8);
        assert_eq!(mbr.disk_signature_value(), 0xefbeadde);
        assert_eq!(mbr.reserved, [0x5a, 0xa5]);

        let linux = &mbr.partitions[0];
        assert!(linux.is_bootable());
        assert_eq!(linux.os_type, 0x83);
        assert_eq!(linux.start.to_tuple(), (0, 32, 33));
        assert_eq!(linux.starting_lba, 2048);
        assert_eq!(linux.size_in_lba, 0x20_0000);

        assert!(mbr.partitions[1].is_gpt_protective());
        assert!(!mbr.partitions[2].is_used());
        assert!(!mbr.partitions[3].is_used());
    }

    #[test]
    fn roundtrip() {
        let sector = sample();
        let mbr = decode_mbr(&sector).unwrap();
        assert_eq!(encode_mbr(&mbr)[..], sector[..]);
        assert_eq!(decode_mbr(&encode_mbr(&mbr)).unwrap(), mbr);
    }

    #[test]
    fn roundtrip_random() {
        let mut rng = rand::thread_rng();
        let mut sector = [0u8; MBR_SIZE];

        for _ in 0..64 {
            rng.fill_bytes(&mut sector);
            let mbr = decode_mbr(&sector).unwrap();
            assert_eq!(encode_mbr(&mbr)[..], sector[..]);
            assert_eq!(decode_mbr(&encode_mbr(&mbr)).unwrap(), mbr);
        }
    }

    #[test]
    fn too_short() {
        assert_eq!(
            decode_mbr(&[0; 511]).unwrap_err(),
            DecodeError::TooShort {
                needed: 512,
                actual: 511
            }
        );
        assert!(decode_mbr(&[]).is_err());
    }

    #[test]
    fn too_long() {
        let mut buffer = sample().to_vec();
        buffer.extend_from_slice(&[0xff; 88]);
        assert_eq!(buffer.len(), 600);

        let long = decode_mbr(&buffer).unwrap();
        let exact = decode_mbr(&buffer[..MBR_SIZE]).unwrap();
        assert_eq!(long, exact);
        assert_eq!(encode_mbr(&long)[..], buffer[..MBR_SIZE]);
    }

    #[test]
    fn validity() {
        let mut sector = sample();
        assert!(decode_mbr(&sector).unwrap().is_valid());

        sector[510] = 0;
        sector[511] = 0;
        assert!(!decode_mbr(&sector).unwrap().is_valid());

        // Byte-swapped signature.
        sector[510] = 0xaa;
        sector[511] = 0x55;
        assert!(!decode_mbr(&sector).unwrap().is_valid());

        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let pair: [u8; 2] = rng.gen();
            sector[510..].copy_from_slice(&pair);
            let mbr = decode_mbr(&sector).unwrap();
            assert_eq!(mbr.is_valid(), pair == [0x55, 0xaa]);
        }
    }

    #[test]
    fn not_protective() {
        let mut sector = sample();
        sector[462..478].copy_from_slice(&[0; 16]);
        let mbr = decode_mbr(&sector).unwrap();
        assert!(!mbr.is_protective());
    }
}
