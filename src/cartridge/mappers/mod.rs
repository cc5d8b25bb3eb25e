// Mappers module - cartridge bank-switching logic
//
// Mappers translate CPU and PPU addresses into PRG/CHR offsets. The family
// is closed (only NROM today), so the mapper is a sum type with
// variant-matched dispatch rather than an open trait. Writes default to
// failing with `UnsupportedWrite` at this layer; a variant that supports
// writes takes over the corresponding match arm.

mod nrom;

pub use nrom::Nrom;

use log::info;

use crate::error::{CoreError, CoreResult};
use crate::rom::Rom;

/// The active cartridge mapper, keyed by the iNES mapper id
pub enum Mapper {
    /// Mapper 0 (NROM): fixed PRG/CHR mapping, no bank switching
    Nrom(Nrom),
}

impl Mapper {
    /// Resolve a loaded ROM to its mapper
    ///
    /// This is the mapper registry: the iNES mapper id selects the variant
    /// constructor.
    ///
    /// # Errors
    /// Returns `CoreError::UnsupportedMapper` carrying the offending id if
    /// the ROM requests a mapper that is not implemented.
    pub fn from_rom(rom: Rom) -> CoreResult<Mapper> {
        match rom.header().mapper_id {
            0 => {
                info!("Resolved mapper 0 (NROM)");
                Ok(Mapper::Nrom(Nrom::new(rom)))
            }
            id => Err(CoreError::UnsupportedMapper(id)),
        }
    }

    /// Human-readable mapper name, for diagnostics and debuggers
    pub fn name(&self) -> &'static str {
        match self {
            Mapper::Nrom(_) => "NROM",
        }
    }

    /// The ROM owned by this mapper
    pub fn rom(&self) -> &Rom {
        match self {
            Mapper::Nrom(mapper) => mapper.rom(),
        }
    }

    /// Read PRG data at a CPU address
    pub fn cpu_read(&self, address: u16) -> CoreResult<u8> {
        match self {
            Mapper::Nrom(mapper) => mapper.cpu_read(address),
        }
    }

    /// Write to PRG RAM or mapper registers
    ///
    /// No current variant accepts CPU-side writes, so every address fails
    /// with `UnsupportedWrite`.
    pub fn cpu_write(&mut self, address: u16, _data: u8) -> CoreResult<()> {
        match self {
            Mapper::Nrom(_) => Err(CoreError::UnsupportedWrite(address)),
        }
    }

    /// Read CHR data at a PPU address
    pub fn ppu_read(&self, address: u16) -> CoreResult<u8> {
        match self {
            Mapper::Nrom(mapper) => mapper.ppu_read(address),
        }
    }

    /// Write to CHR RAM or mapper registers
    ///
    /// No current variant accepts PPU-side writes.
    pub fn ppu_write(&mut self, address: u16, _data: u8) -> CoreResult<()> {
        match self {
            Mapper::Nrom(_) => Err(CoreError::UnsupportedWrite(address)),
        }
    }
}
