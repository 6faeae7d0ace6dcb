//! Partition table entry
//!
//! One 16-byte slot:
//!
//! ```text
//!   0   boot indicator      8..12  first LBA (LE)
//!   1   start head         12..16  sector count (LE)
//!   2   start sector/cyl-high
//!   3   start cylinder low
//!   4   system id
//!   5   last head
//!   6   last sector/cyl-high
//!   7   last cylinder low
//! ```

use core::ops::Range;

use gpt_disk_types::{Lba, U32Le};

use crate::chs::Chs;
use crate::error::{MbrError, Result};
use crate::finding::{EntryFinding, EntryFindings};
use crate::geometry::Geometry;
use crate::types::{PartitionKind, ACTIVE_FLAG, ENTRY_SIZE, NO_PART};

/// Decoded partition table entry
///
/// Fields hold exactly what is on disk; `encode_entry` reproduces the
/// original bytes for any decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionEntry {
    /// Raw boot indicator (0x80 = active)
    pub boot_indicator: u8,

    /// Address of the first sector
    pub start_chs: Chs,

    /// Partition type (0x00 = unused)
    pub system_id: u8,

    /// Address of the last sector
    pub end_chs: Chs,

    /// First sector, disk-relative
    pub first_lba: u32,

    /// Size in sectors
    pub sector_count: u32,
}

impl PartitionEntry {
    /// Unused, all-zero slot
    pub const EMPTY: PartitionEntry = PartitionEntry {
        boot_indicator: 0,
        start_chs: Chs::ZERO,
        system_id: NO_PART,
        end_chs: Chs::ZERO,
        first_lba: 0,
        sector_count: 0,
    };

    /// Inactive entry with zeroed CHS fields
    ///
    /// Rejects values that could never describe a used slot.
    pub fn new(system_id: u8, first_lba: u32, sector_count: u32) -> Result<Self> {
        if system_id == NO_PART {
            return Err(MbrError::UnusedSystemId);
        }
        if sector_count == 0 {
            return Err(MbrError::ZeroSize);
        }
        if first_lba.checked_add(sector_count).is_none() {
            return Err(MbrError::RangeOverflow);
        }
        Ok(Self {
            system_id,
            first_lba,
            sector_count,
            ..Self::EMPTY
        })
    }

    /// Fill both CHS triplets from the LBA range
    pub fn with_geometry(mut self, geometry: &Geometry) -> Self {
        self.start_chs = Chs::from_lba(self.first_lba, geometry);
        let last = self
            .first_lba
            .saturating_add(self.sector_count.saturating_sub(1));
        self.end_chs = Chs::from_lba(last, geometry);
        self
    }

    /// Slot is not in use
    pub fn is_empty(&self) -> bool {
        self.system_id == NO_PART
    }

    /// Boot indicator is exactly the active flag
    pub fn bootable(&self) -> bool {
        self.boot_indicator == ACTIVE_FLAG
    }

    /// Classified system id
    pub fn kind(&self) -> PartitionKind {
        PartitionKind::from_system_id(self.system_id)
    }

    /// First sector as an LBA
    pub fn start(&self) -> Lba {
        Lba(u64::from(self.first_lba))
    }

    /// One past the last sector, `None` on overflow
    pub fn end_lba(&self) -> Option<u32> {
        self.first_lba.checked_add(self.sector_count)
    }

    /// `[first_lba, first_lba + sector_count)`, `None` on overflow
    pub fn lba_range(&self) -> Option<Range<u32>> {
        Some(self.first_lba..self.end_lba()?)
    }

    /// Whether two entries claim a common sector
    ///
    /// Ranges are compared in 64 bits so overflowing entries still compare.
    /// A zero-length range claims nothing.
    pub fn overlaps(&self, other: &PartitionEntry) -> bool {
        if self.sector_count == 0 || other.sector_count == 0 {
            return false;
        }
        let a_start = u64::from(self.first_lba);
        let a_end = a_start + u64::from(self.sector_count);
        let b_start = u64::from(other.first_lba);
        let b_end = b_start + u64::from(other.sector_count);
        a_start < b_end && b_start < a_end
    }
}

impl Default for PartitionEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Decode one 16-byte entry; never fails
pub fn decode_entry(bytes: &[u8; ENTRY_SIZE]) -> PartitionEntry {
    PartitionEntry {
        boot_indicator: bytes[0],
        start_chs: Chs::from_bytes([bytes[1], bytes[2], bytes[3]]),
        system_id: bytes[4],
        end_chs: Chs::from_bytes([bytes[5], bytes[6], bytes[7]]),
        first_lba: U32Le([bytes[8], bytes[9], bytes[10], bytes[11]]).to_u32(),
        sector_count: U32Le([bytes[12], bytes[13], bytes[14], bytes[15]]).to_u32(),
    }
}

/// Encode one entry to its 16 on-disk bytes
pub fn encode_entry(entry: &PartitionEntry) -> [u8; ENTRY_SIZE] {
    let mut out = [0u8; ENTRY_SIZE];
    out[0] = entry.boot_indicator;
    out[1..4].copy_from_slice(&entry.start_chs.to_bytes());
    out[4] = entry.system_id;
    out[5..8].copy_from_slice(&entry.end_chs.to_bytes());
    out[8..12].copy_from_slice(&U32Le::from_u32(entry.first_lba).0);
    out[12..16].copy_from_slice(&U32Le::from_u32(entry.sector_count).0);
    out
}

/// Check one entry in isolation
///
/// Unused slots are never reported: their contents carry no meaning.
pub fn validate_entry(entry: &PartitionEntry) -> EntryFindings {
    let mut findings = EntryFindings::new();
    if entry.is_empty() {
        return findings;
    }

    if entry.boot_indicator != 0 && entry.boot_indicator != ACTIVE_FLAG {
        findings.push(EntryFinding::NonCanonicalBootFlag(entry.boot_indicator));
    }
    if entry.sector_count == 0 {
        findings.push(EntryFinding::ZeroSizeNonEmpty);
    }
    if entry.end_lba().is_none() {
        findings.push(EntryFinding::Overflow);
    }

    findings
}
