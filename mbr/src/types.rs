//! Layout constants and partition type codes

/// Boot sector size
pub const SECTOR_SIZE: usize = 512;

/// Offset of the partition table in the boot sector
pub const PART_TABLE_OFF: usize = 0x1BE;

/// Number of primary slots
pub const NR_PARTITIONS: usize = 4;

/// Size of one partition table entry
pub const ENTRY_SIZE: usize = 16;

/// Size of the whole partition table window
pub const TABLE_SIZE: usize = NR_PARTITIONS * ENTRY_SIZE;

/// Boot indicator value of the active partition
pub const ACTIVE_FLAG: u8 = 0x80;

/// Unused slot
pub const NO_PART: u8 = 0x00;

/// Native partition type
pub const NATIVE_PART: u8 = 0x81;

/// How a system id is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionKind {
    /// Slot is not in use
    Unused,
    /// Native partition
    Native,
    /// Any other type code, passed through untouched
    Unrecognized(u8),
}

impl PartitionKind {
    /// Classify a raw system id
    pub const fn from_system_id(id: u8) -> Self {
        match id {
            NO_PART => PartitionKind::Unused,
            NATIVE_PART => PartitionKind::Native,
            other => PartitionKind::Unrecognized(other),
        }
    }

    /// Raw system id
    pub const fn system_id(self) -> u8 {
        match self {
            PartitionKind::Unused => NO_PART,
            PartitionKind::Native => NATIVE_PART,
            PartitionKind::Unrecognized(id) => id,
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            PartitionKind::Unused => "Unused",
            PartitionKind::Native => "Native",
            PartitionKind::Unrecognized(_) => "Unknown",
        }
    }
}
