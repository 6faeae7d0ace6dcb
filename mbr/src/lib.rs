//! MBR Partition Table Codec
//!
//! A `no_std`, allocation-free codec for the classic MBR partition table:
//! four 16-byte entries embedded at offset `0x1BE` of a 512-byte boot sector.
//!
//! # Overview
//!
//! This crate provides:
//! - Byte-exact entry decoding/encoding (every 16-byte pattern round-trips)
//! - CHS triplet packing with the sector/cylinder shared byte
//! - Table decoding/encoding that only touches the partition-table window
//! - Validation that reports defects as data (`Finding`s), never as faults
//! - Active (bootable) slot selection
//! - LBA <-> CHS translation for building new entries
//!
//! # Architecture
//!
//! 1. **Entry layer** - `PartitionEntry`, `Chs`, `decode_entry` / `encode_entry` / `validate_entry`
//! 2. **Table layer** - `PartitionTable`, `decode_table` / `encode_table` / `validate_table` / `select_boot_entry`
//!
//! Decoding never rejects input. A corrupt table still decodes into something
//! inspectable; the only way to learn about corruption is to validate it.
//!
//! # Usage
//!
//! ```ignore
//! use mbr::{decode_table, select_boot_entry, validate_table};
//!
//! // Sector 0 as read by the device layer
//! let table = decode_table(&sector);
//!
//! for finding in validate_table(&table).iter() {
//!     // surface or refuse, caller's policy
//! }
//!
//! if let Some(slot) = select_boot_entry(&table)? {
//!     let entry = table.entry(slot)?;
//!     // chain-load from entry.first_lba
//! }
//! ```
//!
//! # Building a table
//!
//! ```ignore
//! use mbr::{encode_table, Geometry, PartitionEntry, PartitionTable, NATIVE_PART};
//!
//! let root = PartitionEntry::new(NATIVE_PART, 2048, 1_048_576)?
//!     .with_geometry(&Geometry::LBA_ASSIST);
//!
//! let mut table = PartitionTable::empty();
//! table.set_entry(0, root)?;
//! table.set_active(0)?;
//!
//! // Boot code and signature in `sector` are left as they were
//! encode_table(&table, &mut sector);
//! ```

#![no_std]
#![warn(missing_docs)]

pub mod chs;
pub mod entry;
pub mod error;
pub mod finding;
pub mod geometry;
pub mod table;
pub mod types;

mod trace;

pub use chs::{pack_sector_cylinder, unpack_sector_cylinder, Chs};
pub use entry::{decode_entry, encode_entry, validate_entry, PartitionEntry};
pub use error::{MbrError, Result};
pub use finding::{EntryFinding, EntryFindings, Finding, Findings, TableFindings};
pub use geometry::Geometry;
pub use table::{
    decode_table, decode_table_from_slice, encode_table, encode_table_into_slice,
    select_boot_entry, validate_table, PartitionTable,
};
pub use types::{
    PartitionKind, ACTIVE_FLAG, ENTRY_SIZE, NATIVE_PART, NO_PART, NR_PARTITIONS, PART_TABLE_OFF,
    SECTOR_SIZE, TABLE_SIZE,
};
