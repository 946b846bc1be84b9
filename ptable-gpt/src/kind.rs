use uuid::Uuid;

/// Well-known GPT partition type GUIDs.
pub const PARTITION_TYPES: &[(Uuid, &str)] = &[
    (Uuid::nil(), "Unused Entry"),
    (
        Uuid::from_u128(0x024dee41_33e7_11d3_9d69_0008c781f39f),
        "Legacy MBR",
    ),
    (
        Uuid::from_u128(0xc12a7328_f81f_11d2_ba4b_00a0c93ec93b),
        "EFI System Partition",
    ),
    (
        Uuid::from_u128(0x21686148_6449_6e6f_744e_656564454649),
        "BIOS boot partition",
    ),
    (
        Uuid::from_u128(0x0fc63daf_8483_4772_8e79_3d69d8477de4),
        "Linux filesystem data",
    ),
    (
        Uuid::from_u128(0x4f68bce3_e8cd_4db1_96e7_fbcaf984b709),
        "Root partition (x86-64)",
    ),
    (
        Uuid::from_u128(0xb921b045_1df0_41c3_af44_4c6f280d3fae),
        "Root partition (AArch64)",
    ),
    (
        Uuid::from_u128(0x0657fd6d_a4ab_43c4_84e5_0933c84b4f4f),
        "Swap partition",
    ),
    (
        Uuid::from_u128(0x933ac7e1_2eb4_4f13_b844_0e14e2aef915),
        "Linux /home partition",
    ),
    (
        Uuid::from_u128(0xbc13c2ff_59e6_4262_a352_b275fd6f7172),
        "Extended boot loader partition",
    ),
    (
        Uuid::from_u128(0xe6d6d379_f507_44c2_a23c_238f2a3df928),
        "Linux LVM",
    ),
    (
        Uuid::from_u128(0xa19d880f_05fc_4d3b_a006_743f0f84911e),
        "Linux RAID",
    ),
    (
        Uuid::from_u128(0xe3c9e316_0b5c_4db8_817d_f92df00215ae),
        "Microsoft reserved partition",
    ),
    (
        Uuid::from_u128(0xebd0a0a2_b9e5_4433_87c0_68b6b72699c7),
        "Microsoft basic data",
    ),
    (
        Uuid::from_u128(0xde94bba4_06d1_4d40_a16a_bfd50179d6ac),
        "Windows recovery environment",
    ),
    (
        Uuid::from_u128(0x48465300_0000_11aa_aa11_00306543ecac),
        "Apple HFS+",
    ),
    (
        Uuid::from_u128(0x7c3457ef_0000_11aa_aa11_00306543ecac),
        "Apple APFS",
    ),
];

pub fn partition_type_name(kind: &Uuid) -> &'static str {
    PARTITION_TYPES
        .iter()
        .find(|(x, _)| x == kind)
        .map(|(_, name)| *name)
        .unwrap_or(super::UNKNOWN)
}

/// Looks up a partition type by its textual GUID, in either case.
pub fn partition_type_name_str(kind: &str) -> &'static str {
    match Uuid::parse_str(kind) {
        Ok(kind) => partition_type_name(&kind),
        Err(_) => super::UNKNOWN,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::UNKNOWN;

    #[test]
    fn lookup() {
        assert_eq!(partition_type_name(&Uuid::nil()), "Unused Entry");
        assert_eq!(
            partition_type_name_str("C12A7328-F81F-11D2-BA4B-00A0C93EC93B"),
            "EFI System Partition"
        );
        assert_eq!(
            partition_type_name_str("0fc63daf-8483-4772-8e79-3d69d8477de4"),
            "Linux filesystem data"
        );
        assert_eq!(
            partition_type_name_str("00000000-0000-0000-0000-000000000001"),
            UNKNOWN
        );
        assert_eq!(partition_type_name_str("not a guid"), UNKNOWN);
    }

    #[test]
    fn unique() {
        for (i, (a, _)) in PARTITION_TYPES.iter().enumerate() {
            assert!(PARTITION_TYPES[i + 1..].iter().all(|(b, _)| a != b));
        }
    }
}
