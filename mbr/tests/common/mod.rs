//! Common test utilities: boot sector builder and in-memory disk

#![allow(dead_code)]

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use mbr::{ENTRY_SIZE, PART_TABLE_OFF, SECTOR_SIZE};
use std::io;

/// Boot code area length (everything before the partition table)
pub const BOOT_CODE_LEN: usize = PART_TABLE_OFF;

/// Builds 512-byte boot sectors byte by byte
#[derive(Debug, Clone)]
pub struct SectorBuilder {
    sector: [u8; SECTOR_SIZE],
}

impl SectorBuilder {
    /// All-zero sector
    pub fn new() -> Self {
        Self {
            sector: [0u8; SECTOR_SIZE],
        }
    }

    /// Sector with recognizable boot code and the 0x55AA marker
    pub fn with_boot_code() -> Self {
        let mut builder = Self::new();
        for (i, b) in builder.sector[..BOOT_CODE_LEN].iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(31).wrapping_add(7);
        }
        builder.sector[510] = 0x55;
        builder.sector[511] = 0xAA;
        builder
    }

    /// Write a used entry with zeroed CHS fields
    pub fn entry(
        mut self,
        slot: usize,
        boot_indicator: u8,
        system_id: u8,
        first_lba: u32,
        sector_count: u32,
    ) -> Self {
        let mut raw = [0u8; ENTRY_SIZE];
        raw[0] = boot_indicator;
        raw[4] = system_id;
        raw[8..12].copy_from_slice(&first_lba.to_le_bytes());
        raw[12..16].copy_from_slice(&sector_count.to_le_bytes());
        self.raw_entry(slot, raw)
    }

    /// Write 16 raw bytes into a slot
    pub fn raw_entry(mut self, slot: usize, raw: [u8; ENTRY_SIZE]) -> Self {
        let offset = PART_TABLE_OFF + slot * ENTRY_SIZE;
        self.sector[offset..offset + ENTRY_SIZE].copy_from_slice(&raw);
        self
    }

    /// Finished sector
    pub fn build(self) -> [u8; SECTOR_SIZE] {
        self.sector
    }
}

/// Deterministic pseudo-random fill (xorshift64)
pub fn fill_pattern(seed: u64, out: &mut [u8]) {
    let mut state = seed | 1;
    for b in out.iter_mut() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        *b = (state >> 24) as u8;
    }
}

/// In-memory block device standing in for the disk collaborator
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: usize,
}

impl MemoryBlockDevice {
    /// Create a device from raw data (512-byte sectors)
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            block_size: SECTOR_SIZE,
        }
    }

    /// Device of `sectors` sectors whose sector 0 is `boot_sector`
    pub fn with_boot_sector(boot_sector: &[u8; SECTOR_SIZE], sectors: usize) -> Self {
        let mut data = vec![0u8; sectors * SECTOR_SIZE];
        data[..SECTOR_SIZE].copy_from_slice(boot_sector);
        Self::new(data)
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size as u32).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / self.block_size) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        let offset = start_lba.0 as usize * self.block_size;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_blocks(&mut self, start_lba: Lba, src: &[u8]) -> Result<(), Self::Error> {
        let offset = start_lba.0 as usize * self.block_size;
        if offset + src.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "write beyond end of device",
            ));
        }
        self.data[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
