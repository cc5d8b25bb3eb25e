// Cartridge module - the cartridge connector abstraction
//
// The Cartridge is a thin facade over the active Mapper. It receives reads
// and writes from the CPU and PPU sides of the connector and delegates to
// the mapper; it never touches PRG or CHR data directly. The split into
// separate cpu_* and ppu_* methods mirrors the physical cartridge
// connector, whose pins tie straight onto the CPU and PPU address buses.
//
// https://www.nesdev.org/wiki/Cartridge_connector

pub mod mappers;

use std::fs;
use std::path::Path;

use log::info;

use crate::error::CoreResult;
use crate::rom::{Header, Mirroring, Rom};
use mappers::Mapper;

/// A loaded NES cartridge: a ROM bound to its resolved mapper
pub struct Cartridge {
    mapper: Mapper,
    nt_mirroring: Mirroring,
}

impl Cartridge {
    /// Build a cartridge from raw iNES image bytes
    ///
    /// # Errors
    /// Returns `CoreError::InvalidImage` for a malformed image and
    /// `CoreError::UnsupportedMapper` when the requested mapper is not in
    /// the registry.
    pub fn from_bytes(data: &[u8]) -> CoreResult<Cartridge> {
        let rom = Rom::new(data)?;
        let nt_mirroring = rom.header().nt_mirroring;
        let mapper = Mapper::from_rom(rom)?;

        info!("Cartridge ready: {} mapper, {:?} mirroring", mapper.name(), nt_mirroring);

        Ok(Cartridge { mapper, nt_mirroring })
    }

    /// Load a cartridge from a `.nes` file
    ///
    /// # Errors
    /// As `from_bytes`, plus `CoreError::Io` if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Cartridge> {
        let data = fs::read(path)?;
        Cartridge::from_bytes(&data)
    }

    /// Read PRG data through the active mapper
    pub fn cpu_read(&self, address: u16) -> CoreResult<u8> {
        self.mapper.cpu_read(address)
    }

    /// Write to PRG RAM or mapper registers through the active mapper
    pub fn cpu_write(&mut self, address: u16, data: u8) -> CoreResult<()> {
        self.mapper.cpu_write(address, data)
    }

    /// Read CHR data through the active mapper
    pub fn ppu_read(&self, address: u16) -> CoreResult<u8> {
        self.mapper.ppu_read(address)
    }

    /// Write to CHR RAM or mapper registers through the active mapper
    pub fn ppu_write(&mut self, address: u16, data: u8) -> CoreResult<()> {
        self.mapper.ppu_write(address, data)
    }

    /// Nametable mirroring arrangement used by the active mapper
    ///
    /// Exposed for the sprite and host layers; the background core's
    /// nametable fold does not consult it.
    pub fn nt_mirroring(&self) -> Mirroring {
        self.nt_mirroring
    }

    /// Name of the active mapper, for diagnostics
    pub fn mapper_name(&self) -> &'static str {
        self.mapper.name()
    }

    /// The parsed iNES header, for tests and debuggers
    pub fn header(&self) -> &Header {
        self.mapper.rom().header()
    }
}
