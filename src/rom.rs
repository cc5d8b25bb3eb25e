// ROM module - iNES image parsing
//
// Parses an iNES 1.0 image into its header fields and the PRG/CHR data
// slices. The layout of an image is:
//
// ```text
// 0x00-0x0F: 16-byte header beginning "NES\x1A"
// 0x10-....: optional 512-byte trainer (flags 6, bit 2)
// ....     : PRG ROM, 16KB x prg_banks
// ....     : CHR ROM, 8KB x chr_banks
// ```
//
// https://www.nesdev.org/wiki/INES

use log::info;

use crate::error::{CoreError, CoreResult};

/// Size of one PRG ROM bank in bytes (16KB)
pub const PRG_BANK_SIZE: usize = 16384;

/// Size of one CHR ROM bank in bytes (8KB)
pub const CHR_BANK_SIZE: usize = 8192;

/// The four magic bytes every iNES image starts with: "NES\x1A"
const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// Length of the optional trainer block
const TRAINER_SIZE: usize = 512;

/// Nametable mirroring arrangement declared by the cartridge
///
/// Some mappers ignore this value and adjust the mirroring configuration
/// dynamically during gameplay; mapper 0 leaves it fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

/// Parsed iNES header
///
/// Exposes the fields the mapper and bus layers need: bank counts, derived
/// PRG/CHR byte sizes, the nametable mirroring bit, the trainer length and
/// the mapper id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of 16KB program ROM banks
    pub prg_banks: u8,
    /// Number of 8KB character ROM banks
    pub chr_banks: u8,
    /// Size of the program ROM in bytes
    pub prg_rom_size: usize,
    /// Size of the character ROM in bytes
    pub chr_rom_size: usize,
    /// Nametable mirroring configuration
    pub nt_mirroring: Mirroring,
    /// Byte length of the optional trainer block (0 or 512)
    pub trainer: usize,
    /// iNES mapper id
    pub mapper_id: u8,
}

impl Header {
    /// Parse the 16-byte iNES header at the start of `data`
    ///
    /// # Errors
    /// Returns `CoreError::InvalidImage` if fewer than 16 bytes are provided
    /// or the magic does not match.
    pub fn parse(data: &[u8]) -> CoreResult<Header> {
        if data.len() < 16 || data[0..4] != INES_MAGIC {
            return Err(CoreError::InvalidImage);
        }

        let prg_banks = data[4];
        let chr_banks = data[5];

        Ok(Header {
            prg_banks,
            chr_banks,
            prg_rom_size: PRG_BANK_SIZE * prg_banks as usize,
            chr_rom_size: CHR_BANK_SIZE * chr_banks as usize,
            nt_mirroring: if data[6] & 0x01 != 0 {
                Mirroring::Vertical
            } else {
                Mirroring::Horizontal
            },
            trainer: if data[6] & 0x04 != 0 { TRAINER_SIZE } else { 0 },
            // Mapper id is split across the high nibbles of flags 6 and 7
            mapper_id: (data[7] & 0xF0) | (data[6] >> 4),
        })
    }
}

/// An iNES ROM image, immutable after load
///
/// Exposes bounds-checked read methods that mappers use to access program
/// and character read-only memory directly.
pub struct Rom {
    header: Header,
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
}

impl Rom {
    /// Parse an iNES image from raw bytes
    ///
    /// The PRG slice starts after the header and optional trainer; the CHR
    /// slice follows immediately after PRG. Both slices must have exactly
    /// their declared sizes.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidImage` if the header is malformed or the
    /// data is shorter than the declared PRG + CHR sizes.
    pub fn new(data: &[u8]) -> CoreResult<Rom> {
        let header = Header::parse(data)?;

        let prg_offset = 16 + header.trainer;
        let chr_offset = prg_offset + header.prg_rom_size;

        if data.len() < chr_offset + header.chr_rom_size {
            return Err(CoreError::InvalidImage);
        }

        info!(
            "Loaded iNES image: mapper {}, {} PRG bank(s), {} CHR bank(s), {:?} mirroring",
            header.mapper_id, header.prg_banks, header.chr_banks, header.nt_mirroring
        );

        Ok(Rom {
            header,
            prg_rom: data[prg_offset..chr_offset].to_vec(),
            chr_rom: data[chr_offset..chr_offset + header.chr_rom_size].to_vec(),
        })
    }

    /// The parsed iNES header for this ROM
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Read program data from the PRG ROM
    ///
    /// Mappers use this to access the program ROM with an already-mapped
    /// offset.
    ///
    /// # Errors
    /// Returns `CoreError::OutOfRange` if the index exceeds the PRG slice.
    pub fn read_prg_rom(&self, index: usize) -> CoreResult<u8> {
        self.prg_rom
            .get(index)
            .copied()
            .ok_or(CoreError::OutOfRange(index))
    }

    /// Read character data from the CHR ROM
    ///
    /// # Errors
    /// Returns `CoreError::OutOfRange` if the index exceeds the CHR slice.
    pub fn read_chr_rom(&self, index: usize) -> CoreResult<u8> {
        self.chr_rom
            .get(index)
            .copied()
            .ok_or(CoreError::OutOfRange(index))
    }
}
