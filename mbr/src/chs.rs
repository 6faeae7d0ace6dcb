//! CHS triplet packing
//!
//! On disk a CHS address takes three bytes:
//!
//! ```text
//!   byte 0: head
//!   byte 1: bits 0-5 sector, bits 6-7 cylinder bits 8-9
//!   byte 2: cylinder bits 0-7
//! ```
//!
//! Sector numbering is 1-based by convention but the raw 6-bit value is kept
//! as-is here. All 24 bits are represented, so every triplet round-trips.

use core::fmt;

use crate::error::{MbrError, Result};

const SECTOR_MASK: u8 = 0x3F;
const CYL_HIGH_MASK: u8 = 0xC0;

/// Split the shared sector byte and the cylinder byte into `(sector, cylinder)`
pub const fn unpack_sector_cylinder(sector_byte: u8, cylinder_byte: u8) -> (u8, u16) {
    let sector = sector_byte & SECTOR_MASK;
    let cylinder = (((sector_byte & CYL_HIGH_MASK) as u16) << 2) | cylinder_byte as u16;
    (sector, cylinder)
}

/// Pack `(sector, cylinder)` into the shared sector byte and the cylinder byte
///
/// Values that do not fit are reported, never truncated.
pub fn pack_sector_cylinder(sector: u8, cylinder: u16) -> Result<(u8, u8)> {
    if cylinder > Chs::MAX_CYLINDER {
        return Err(MbrError::CylinderOutOfRange);
    }
    if sector > Chs::MAX_SECTOR {
        return Err(MbrError::SectorOutOfRange);
    }
    Ok(pack_unchecked(sector, cylinder))
}

const fn pack_unchecked(sector: u8, cylinder: u16) -> (u8, u8) {
    let sector_byte = (sector & SECTOR_MASK) | (((cylinder >> 2) as u8) & CYL_HIGH_MASK);
    let cylinder_byte = (cylinder & 0xFF) as u8;
    (sector_byte, cylinder_byte)
}

/// Cylinder/head/sector address as stored in a partition entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Chs {
    cylinder: u16,
    head: u8,
    sector: u8,
}

impl Chs {
    /// Largest cylinder a triplet can hold (10 bits)
    pub const MAX_CYLINDER: u16 = 0x3FF;

    /// Largest raw sector a triplet can hold (6 bits)
    pub const MAX_SECTOR: u8 = 0x3F;

    /// All-zero triplet, as found in unused slots
    pub const ZERO: Chs = Chs {
        cylinder: 0,
        head: 0,
        sector: 0,
    };

    /// Build a triplet, rejecting values that do not fit their bit fields
    pub fn new(cylinder: u16, head: u8, sector: u8) -> Result<Self> {
        pack_sector_cylinder(sector, cylinder)?;
        Ok(Self {
            cylinder,
            head,
            sector,
        })
    }

    /// Decode the three on-disk bytes
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        let (sector, cylinder) = unpack_sector_cylinder(bytes[1], bytes[2]);
        Self {
            cylinder,
            head: bytes[0],
            sector,
        }
    }

    /// Encode to the three on-disk bytes
    pub const fn to_bytes(self) -> [u8; 3] {
        let (sector_byte, cylinder_byte) = pack_unchecked(self.sector, self.cylinder);
        [self.head, sector_byte, cylinder_byte]
    }

    /// Cylinder (0..=1023)
    pub const fn cylinder(self) -> u16 {
        self.cylinder
    }

    /// Head
    pub const fn head(self) -> u8 {
        self.head
    }

    /// Raw sector (0..=63)
    pub const fn sector(self) -> u8 {
        self.sector
    }
}

impl fmt::Display for Chs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.cylinder, self.head, self.sector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_high_bits_share_sector_byte() {
        // cylinder 0x2A5 = 10_1010_0101, sector 0x11
        let (sb, cb) = pack_sector_cylinder(0x11, 0x2A5).unwrap();
        assert_eq!(sb, 0b1001_0001);
        assert_eq!(cb, 0xA5);
        assert_eq!(unpack_sector_cylinder(sb, cb), (0x11, 0x2A5));
    }

    #[test]
    fn test_pack_unpack_full_range() {
        for cylinder in 0..=Chs::MAX_CYLINDER {
            for sector in 0..=Chs::MAX_SECTOR {
                let (sb, cb) = pack_sector_cylinder(sector, cylinder).unwrap();
                assert_eq!(unpack_sector_cylinder(sb, cb), (sector, cylinder));
            }
        }
    }

    #[test]
    fn test_out_of_range_is_reported() {
        assert_eq!(
            pack_sector_cylinder(1, 1024),
            Err(MbrError::CylinderOutOfRange)
        );
        assert_eq!(pack_sector_cylinder(64, 0), Err(MbrError::SectorOutOfRange));
        assert_eq!(Chs::new(u16::MAX, 0, 1), Err(MbrError::CylinderOutOfRange));
    }

    #[test]
    fn test_triplet_bytes() {
        let chs = Chs::new(1023, 254, 63).unwrap();
        assert_eq!(chs.to_bytes(), [0xFE, 0xFF, 0xFF]);
        assert_eq!(Chs::from_bytes([0xFE, 0xFF, 0xFF]), chs);
    }

    #[test]
    fn test_every_triplet_round_trips() {
        for sb in 0..=255u8 {
            for cb in [0x00u8, 0x01, 0x7F, 0x80, 0xFF] {
                for head in [0x00u8, 0x20, 0xFF] {
                    let bytes = [head, sb, cb];
                    assert_eq!(Chs::from_bytes(bytes).to_bytes(), bytes);
                }
            }
        }
    }
}
