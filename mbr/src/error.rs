//! Error types for MBR operations
//!
//! Corruption found in a decoded table is never an error here; it is
//! reported through `Finding`s. `MbrError` covers invalid arguments to
//! constructors and setters, and the conflicting-active-flag signal of
//! boot selection.

use core::fmt;

/// Result type for MBR operations
pub type Result<T> = core::result::Result<T, MbrError>;

/// Errors that can occur during MBR operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbrError {
    /// Cylinder does not fit in 10 bits
    CylinderOutOfRange,

    /// Sector does not fit in 6 bits
    SectorOutOfRange,

    /// Head or sectors-per-track count outside the BIOS limits
    InvalidGeometry,

    /// Slot index is not in 0..4
    SlotOutOfRange,

    /// Operation requires a used slot
    EmptySlot,

    /// System id 0x00 marks an unused slot and cannot describe a partition
    UnusedSystemId,

    /// Partition must span at least one sector
    ZeroSize,

    /// first_lba + sector_count does not fit in 32 bits
    RangeOverflow,

    /// Sector buffer shorter than 512 bytes
    BufferTooSmall,

    /// More than one slot carries the active flag
    MultipleActiveFlags,
}

impl fmt::Display for MbrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CylinderOutOfRange => write!(f, "Cylinder exceeds 1023"),
            Self::SectorOutOfRange => write!(f, "Sector exceeds 63"),
            Self::InvalidGeometry => write!(f, "Invalid disk geometry"),
            Self::SlotOutOfRange => write!(f, "Partition slot out of range"),
            Self::EmptySlot => write!(f, "Partition slot is unused"),
            Self::UnusedSystemId => write!(f, "System id 0x00 marks an unused slot"),
            Self::ZeroSize => write!(f, "Partition has zero sectors"),
            Self::RangeOverflow => write!(f, "Partition range overflows 32-bit LBA"),
            Self::BufferTooSmall => write!(f, "Sector buffer smaller than 512 bytes"),
            Self::MultipleActiveFlags => write!(f, "Multiple partitions marked active"),
        }
    }
}
