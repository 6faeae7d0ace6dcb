//! Disk geometry and LBA <-> CHS translation

use crate::chs::Chs;
use crate::error::{MbrError, Result};
use crate::trace::trace;

/// Heads and sectors per track of a (possibly translated) disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    heads: u16,
    sectors_per_track: u8,
}

impl Geometry {
    /// LBA-assist translation used by every modern BIOS
    pub const LBA_ASSIST: Geometry = Geometry {
        heads: 255,
        sectors_per_track: 63,
    };

    /// Build a geometry; heads in 1..=255, sectors per track in 1..=63
    pub fn new(heads: u16, sectors_per_track: u8) -> Result<Self> {
        if heads == 0 || heads > 255 || sectors_per_track == 0 || sectors_per_track > Chs::MAX_SECTOR
        {
            return Err(MbrError::InvalidGeometry);
        }
        Ok(Self {
            heads,
            sectors_per_track,
        })
    }

    /// Number of heads
    pub const fn heads(&self) -> u16 {
        self.heads
    }

    /// Sectors per track
    pub const fn sectors_per_track(&self) -> u8 {
        self.sectors_per_track
    }

    /// Sectors per cylinder
    pub const fn sectors_per_cylinder(&self) -> u32 {
        self.heads as u32 * self.sectors_per_track as u32
    }

    /// Triplet recorded for addresses past cylinder 1023
    pub fn beyond_chs(&self) -> Chs {
        Chs::new(
            Chs::MAX_CYLINDER,
            (self.heads - 1) as u8,
            self.sectors_per_track,
        )
        .unwrap_or(Chs::from_bytes([0xFF; 3]))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::LBA_ASSIST
    }
}

impl Chs {
    /// Translate an LBA, saturating to `Geometry::beyond_chs` past cylinder 1023
    pub fn from_lba(lba: u32, geometry: &Geometry) -> Chs {
        let spc = geometry.sectors_per_cylinder();
        let cylinder = lba / spc;
        if cylinder > Chs::MAX_CYLINDER as u32 {
            trace("mbr: lba beyond chs range, saturating");
            return geometry.beyond_chs();
        }

        let rem = lba % spc;
        let head = rem / geometry.sectors_per_track as u32;
        let sector = rem % geometry.sectors_per_track as u32 + 1;

        Chs::new(cylinder as u16, head as u8, sector as u8)
            .unwrap_or_else(|_| geometry.beyond_chs())
    }

    /// Translate back to an LBA; `None` if the triplet does not fit the geometry
    pub fn to_lba(self, geometry: &Geometry) -> Option<u32> {
        let sector = self.sector() as u32;
        let head = self.head() as u32;
        if sector == 0 || sector > geometry.sectors_per_track as u32 {
            return None;
        }
        if head >= geometry.heads as u32 {
            return None;
        }

        let spt = geometry.sectors_per_track as u32;
        (self.cylinder() as u32)
            .checked_mul(geometry.sectors_per_cylinder())?
            .checked_add(head * spt)?
            .checked_add(sector - 1)
    }
}
