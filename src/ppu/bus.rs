// PPU bus - address decode for the PPU's 16KB address space
//
// The PPU has its own bus, completely separate from the CPU's, addressing
// $0000-$3FFF:
//
// ```text
// $0000-$1FFF: pattern tables (cartridge CHR, via the mapper)
// $2000-$2FFF: nametables (2KB internal VRAM)
// $3000-$3EFF: mirrors of $2000-$2EFF
// $3F00-$3FFF: palette RAM (32 bytes, mirrored every 32 bytes)
// ```
//
// https://www.nesdev.org/wiki/PPU_memory_map

use std::cell::RefCell;
use std::rc::Rc;

use super::constants::{
    PALETTE_ADDRESS_MASK, PALETTE_SIZE, VRAM_ADDRESS_MASK, VRAM_SIZE,
};
use crate::cartridge::Cartridge;
use crate::error::{CoreError, CoreResult};

/// PPU-side memory bus
///
/// Owns the 2KB nametable VRAM and the 32-byte palette RAM, and routes
/// pattern-table traffic to the cartridge. The cartridge reference is
/// shared (non-owning) with the CPU bus; when none is attached, pattern
/// reads return 0 and pattern writes are dropped.
pub struct PpuBus {
    /// 2KB nametable video RAM
    ///
    /// The 4-nametable address space folds into the physical 2KB with
    /// `& 0x07FF`; the cartridge's mirroring arrangement is left to the
    /// layers that consume it.
    vram: [u8; VRAM_SIZE],

    /// Palette RAM
    ///
    /// $3F10/$3F14/$3F18/$3F1C mirror $3F00/$3F04/$3F08/$3F0C: sprite
    /// palette entry 0 is the shared backdrop color.
    palette: [u8; PALETTE_SIZE],

    cartridge: Option<Rc<RefCell<Cartridge>>>,
}

impl PpuBus {
    /// Create a bus with zeroed VRAM and palette RAM and no cartridge
    pub fn new() -> Self {
        PpuBus {
            vram: [0x00; VRAM_SIZE],
            palette: [0x00; PALETTE_SIZE],
            cartridge: None,
        }
    }

    /// Create a bus already connected to a cartridge
    pub fn with_cartridge(cartridge: Rc<RefCell<Cartridge>>) -> Self {
        let mut bus = PpuBus::new();
        bus.cartridge = Some(cartridge);
        bus
    }

    /// Attach the cartridge providing pattern-table memory
    pub fn attach_cartridge(&mut self, cartridge: Rc<RefCell<Cartridge>>) {
        self.cartridge = Some(cartridge);
    }

    /// Fold a palette address into the 32-byte palette RAM
    ///
    /// Addresses whose low bits match $10/$14/$18/$1C fold down by 16
    /// before the 32-byte wrap.
    fn palette_index(address: u16) -> usize {
        let address = if address & 0x13 == 0x10 {
            address - 16
        } else {
            address
        };
        (address & PALETTE_ADDRESS_MASK) as usize
    }

    /// Read a value from the resource mapped at `address`
    ///
    /// # Errors
    /// Returns `CoreError::BadAddress` for addresses above $3FFF and
    /// `CoreError::OutOfRange` if the cartridge CHR read falls outside the
    /// ROM's data.
    pub fn read(&self, address: u16) -> CoreResult<u8> {
        match address {
            0x0000..=0x1FFF => match &self.cartridge {
                Some(cartridge) => cartridge.borrow().ppu_read(address),
                None => Ok(0),
            },
            0x2000..=0x3EFF => Ok(self.vram[(address & VRAM_ADDRESS_MASK) as usize]),
            0x3F00..=0x3FFF => Ok(self.palette[Self::palette_index(address)]),
            _ => Err(CoreError::BadAddress(address)),
        }
    }

    /// Write a value to the resource mapped at `address`
    ///
    /// # Errors
    /// Returns `CoreError::BadAddress` for addresses above $3FFF and
    /// `CoreError::UnsupportedWrite` when the write lands in CHR ROM.
    pub fn write(&mut self, address: u16, data: u8) -> CoreResult<()> {
        match address {
            0x0000..=0x1FFF => match &self.cartridge {
                Some(cartridge) => cartridge.borrow_mut().ppu_write(address, data),
                None => Ok(()),
            },
            0x2000..=0x3EFF => {
                self.vram[(address & VRAM_ADDRESS_MASK) as usize] = data;
                Ok(())
            }
            0x3F00..=0x3FFF => {
                self.palette[Self::palette_index(address)] = data;
                Ok(())
            }
            _ => Err(CoreError::BadAddress(address)),
        }
    }

    /// Snapshot of the nametable VRAM, for save states and debuggers
    pub fn vram(&self) -> &[u8; VRAM_SIZE] {
        &self.vram
    }

    /// Snapshot of the palette RAM
    pub fn palette(&self) -> &[u8; PALETTE_SIZE] {
        &self.palette
    }

    /// Overwrite the nametable VRAM (save-state restore)
    pub(crate) fn load_vram(&mut self, data: &[u8; VRAM_SIZE]) {
        self.vram = *data;
    }

    /// Overwrite the palette RAM (save-state restore)
    pub(crate) fn load_palette(&mut self, data: &[u8; PALETTE_SIZE]) {
        self.palette = *data;
    }
}

impl Default for PpuBus {
    fn default() -> Self {
        Self::new()
    }
}
