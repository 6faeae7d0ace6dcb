//! Validation findings
//!
//! Every irregularity in a decoded table is reported as a value. Lists are
//! fixed-capacity so validation never allocates.

use core::fmt;

/// Defect found in a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFinding {
    /// Boot indicator is neither 0x00 nor 0x80 (carries the raw value)
    NonCanonicalBootFlag(u8),
    /// Used slot with a sector count of zero
    ZeroSizeNonEmpty,
    /// first_lba + sector_count overflows 32 bits
    Overflow,
}

/// Defect found in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
    /// Entry-level defect in the given slot
    Entry {
        /// Slot index (0..4)
        slot: usize,
        /// What is wrong with it
        finding: EntryFinding,
    },
    /// More than one slot carries the active flag
    MultipleActiveFlags,
    /// Sector ranges of two used slots intersect (lower slot first)
    OverlappingRanges(usize, usize),
}

impl fmt::Display for EntryFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonCanonicalBootFlag(v) => write!(f, "Non-canonical boot flag {:#04x}", v),
            Self::ZeroSizeNonEmpty => write!(f, "Used partition has zero sectors"),
            Self::Overflow => write!(f, "Partition range overflows 32-bit LBA"),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry { slot, finding } => write!(f, "Slot {}: {}", slot, finding),
            Self::MultipleActiveFlags => write!(f, "Multiple partitions marked active"),
            Self::OverlappingRanges(a, b) => write!(f, "Slots {} and {} overlap", a, b),
        }
    }
}

/// Fixed-capacity list of findings
#[derive(Debug, Clone, Copy)]
pub struct Findings<T: Copy, const N: usize> {
    items: [Option<T>; N],
    count: usize,
}

/// Findings for one entry (at most two can apply at once)
pub type EntryFindings = Findings<EntryFinding, 3>;

/// Findings for a whole table (4 x 2 entry findings + 1 + 6 pairs)
pub type TableFindings = Findings<Finding, 16>;

impl<T: Copy, const N: usize> Findings<T, N> {
    /// Empty list
    pub const fn new() -> Self {
        Self {
            items: [None; N],
            count: 0,
        }
    }

    /// Append; silently full at capacity
    pub(crate) fn push(&mut self, item: T) {
        if self.count < N {
            self.items[self.count] = Some(item);
            self.count += 1;
        }
    }

    /// Number of findings
    pub fn len(&self) -> usize {
        self.count
    }

    /// No findings at all
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Finding at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.count {
            self.items[index].as_ref()
        } else {
            None
        }
    }

    /// Iterate in the order findings were recorded
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items[..self.count].iter().filter_map(|f| f.as_ref())
    }
}

impl<T: Copy + PartialEq, const N: usize> Findings<T, N> {
    /// Whether `item` was reported
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|f| f == item)
    }
}

impl<T: Copy + PartialEq, const N: usize> PartialEq for Findings<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Copy + Eq, const N: usize> Eq for Findings<T, N> {}

impl<T: Copy, const N: usize> Default for Findings<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
