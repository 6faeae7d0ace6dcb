//! Partition table codec
//!
//! The table occupies bytes `[0x1BE, 0x1BE + 64)` of the boot sector. The
//! codec reads and writes that window only; boot code, disk signature and
//! the `0x55AA` marker belong to whoever owns the sector.

use crate::entry::{decode_entry, encode_entry, validate_entry, PartitionEntry};
use crate::error::{MbrError, Result};
use crate::finding::{Finding, TableFindings};
use crate::trace::trace;
use crate::types::{
    ACTIVE_FLAG, ENTRY_SIZE, NR_PARTITIONS, PART_TABLE_OFF, SECTOR_SIZE, TABLE_SIZE,
};

/// The four primary slots, in on-disk order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PartitionTable {
    entries: [PartitionEntry; NR_PARTITIONS],
}

impl PartitionTable {
    /// Table from explicit entries, slot order preserved
    pub const fn new(entries: [PartitionEntry; NR_PARTITIONS]) -> Self {
        Self { entries }
    }

    /// Table with every slot unused
    pub const fn empty() -> Self {
        Self {
            entries: [PartitionEntry::EMPTY; NR_PARTITIONS],
        }
    }

    /// All four slots
    pub fn entries(&self) -> &[PartitionEntry; NR_PARTITIONS] {
        &self.entries
    }

    /// Entry in `slot`
    pub fn entry(&self, slot: usize) -> Result<&PartitionEntry> {
        self.entries.get(slot).ok_or(MbrError::SlotOutOfRange)
    }

    /// Replace the entry in `slot`
    pub fn set_entry(&mut self, slot: usize, entry: PartitionEntry) -> Result<()> {
        let target = self.entries.get_mut(slot).ok_or(MbrError::SlotOutOfRange)?;
        *target = entry;
        Ok(())
    }

    /// Mark `slot` unused (all 16 bytes zeroed)
    pub fn clear_entry(&mut self, slot: usize) -> Result<()> {
        self.set_entry(slot, PartitionEntry::EMPTY)
    }

    /// Make `slot` the only active partition
    pub fn set_active(&mut self, slot: usize) -> Result<()> {
        if self.entry(slot)?.is_empty() {
            return Err(MbrError::EmptySlot);
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.boot_indicator = if i == slot { ACTIVE_FLAG } else { 0 };
        }
        Ok(())
    }

    /// Clear the boot indicator of every slot
    pub fn clear_active(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.boot_indicator = 0;
        }
    }

    /// Used slots with their index
    pub fn used(&self) -> impl Iterator<Item = (usize, &PartitionEntry)> {
        self.entries.iter().enumerate().filter(|(_, e)| !e.is_empty())
    }

    /// Indices of used slots carrying the active flag
    pub fn active_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.used().filter(|(_, e)| e.bootable()).map(|(slot, _)| slot)
    }

    /// No slot is in use
    pub fn is_empty(&self) -> bool {
        self.used().next().is_none()
    }
}

fn decode_window(window: &[u8]) -> PartitionTable {
    let mut table = PartitionTable::empty();
    for (entry, raw) in table
        .entries
        .iter_mut()
        .zip(window.chunks_exact(ENTRY_SIZE))
    {
        let mut bytes = [0u8; ENTRY_SIZE];
        bytes.copy_from_slice(raw);
        *entry = decode_entry(&bytes);
    }
    table
}

fn encode_window(table: &PartitionTable, window: &mut [u8]) {
    for (entry, raw) in table
        .entries
        .iter()
        .zip(window.chunks_exact_mut(ENTRY_SIZE))
    {
        raw.copy_from_slice(&encode_entry(entry));
    }
}

/// Decode the table from a boot sector
///
/// Total: any sector decodes. The boot signature is not checked.
pub fn decode_table(sector: &[u8; SECTOR_SIZE]) -> PartitionTable {
    decode_window(&sector[PART_TABLE_OFF..PART_TABLE_OFF + TABLE_SIZE])
}

/// Write the table into a boot sector, leaving every other byte untouched
pub fn encode_table(table: &PartitionTable, into: &mut [u8; SECTOR_SIZE]) {
    encode_window(table, &mut into[PART_TABLE_OFF..PART_TABLE_OFF + TABLE_SIZE]);
}

/// Decode from a sector buffer of at least 512 bytes (e.g. a 4K sector)
pub fn decode_table_from_slice(sector: &[u8]) -> Result<PartitionTable> {
    if sector.len() < SECTOR_SIZE {
        return Err(MbrError::BufferTooSmall);
    }
    Ok(decode_window(&sector[PART_TABLE_OFF..PART_TABLE_OFF + TABLE_SIZE]))
}

/// Encode into a sector buffer of at least 512 bytes
pub fn encode_table_into_slice(table: &PartitionTable, into: &mut [u8]) -> Result<()> {
    if into.len() < SECTOR_SIZE {
        return Err(MbrError::BufferTooSmall);
    }
    encode_window(table, &mut into[PART_TABLE_OFF..PART_TABLE_OFF + TABLE_SIZE]);
    Ok(())
}

/// Check the whole table
///
/// Entry findings come first in slot order, then conflicting active flags,
/// then overlapping pairs.
pub fn validate_table(table: &PartitionTable) -> TableFindings {
    let mut findings = TableFindings::new();

    for (slot, entry) in table.used() {
        for finding in validate_entry(entry).iter() {
            findings.push(Finding::Entry {
                slot,
                finding: *finding,
            });
        }
    }

    if table.active_slots().nth(1).is_some() {
        findings.push(Finding::MultipleActiveFlags);
    }

    for (a, first) in table.used() {
        for (b, second) in table.used().filter(|(b, _)| *b > a) {
            if first.overlaps(second) {
                findings.push(Finding::OverlappingRanges(a, b));
            }
        }
    }

    if !findings.is_empty() {
        trace("mbr: partition table has findings");
    }
    findings
}

/// Slot of the active partition
///
/// `Ok(None)` when nothing is active. Conflicting active flags are reported
/// as `MbrError::MultipleActiveFlags`; no slot is picked in that case.
pub fn select_boot_entry(table: &PartitionTable) -> Result<Option<usize>> {
    let mut active = table.active_slots();
    let first = active.next();
    if active.next().is_some() {
        trace("mbr: multiple active partitions");
        return Err(MbrError::MultipleActiveFlags);
    }
    Ok(first)
}
