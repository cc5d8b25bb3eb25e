// CPU bus - address decode for the CPU's 64KB address space
//
// The CPU bus delegates reads and writes to the correct resource based on
// the CPU memory map:
//
// ```text
// $0000-$07FF: 2KB internal RAM
// $0800-$1FFF: mirrors of $0000-$07FF (three times)
// $2000-$2007: PPU registers
// $2008-$3FFF: mirrors of $2000-$2007 (every 8 bytes)
// $4000-$4017: APU and I/O registers (out of scope; zero stubs)
// $4018-$401F: APU and I/O test functionality (zero stubs)
// $4020-$FFFF: cartridge space: PRG ROM, PRG RAM, mapper registers
// ```
//
// https://www.nesdev.org/wiki/CPU_memory_map

use std::cell::RefCell;
use std::rc::Rc;

use crate::cartridge::Cartridge;
use crate::error::CoreResult;
use crate::ppu::Ppu;

/// Size of the internal RAM (2KB)
pub const RAM_SIZE: usize = 0x0800;

/// Mask folding the $0000-$1FFF region onto the 2KB RAM
const RAM_ADDRESS_MASK: u16 = 0x07FF;

/// CPU-side memory bus
///
/// Owns the 2KB internal RAM and holds shared, non-owning references to
/// the PPU (register traffic) and the cartridge (PRG traffic). Either can
/// be left unattached, in which case its region reads as zero and drops
/// writes; this keeps the bus usable standalone in CPU tests.
pub struct CpuBus {
    /// 2KB internal RAM
    ///
    /// Startup contents are unreliable on real machines; zeroed here.
    ram: [u8; RAM_SIZE],

    ppu: Option<Rc<RefCell<Ppu>>>,
    cartridge: Option<Rc<RefCell<Cartridge>>>,
}

impl CpuBus {
    /// Create a bus with zeroed RAM and nothing attached
    pub fn new() -> Self {
        CpuBus {
            ram: [0x00; RAM_SIZE],
            ppu: None,
            cartridge: None,
        }
    }

    /// Attach the PPU that answers $2000-$3FFF
    pub fn attach_ppu(&mut self, ppu: Rc<RefCell<Ppu>>) {
        self.ppu = Some(ppu);
    }

    /// Attach the cartridge that answers $4020-$FFFF
    pub fn attach_cartridge(&mut self, cartridge: Rc<RefCell<Cartridge>>) {
        self.cartridge = Some(cartridge);
    }

    /// Read a value from the resource mapped at `address`
    ///
    /// # Errors
    /// Surfaces cartridge faults (`OutOfRange`) from the PRG region and
    /// PPU-side faults from the register region.
    pub fn read(&self, address: u16) -> CoreResult<u8> {
        match address {
            0x0000..=0x1FFF => Ok(self.ram[(address & RAM_ADDRESS_MASK) as usize]),
            0x2000..=0x3FFF => match &self.ppu {
                Some(ppu) => ppu.borrow_mut().reg_read(address),
                None => Ok(0),
            },
            // APU, I/O and test-mode registers are external collaborators
            0x4000..=0x401F => Ok(0),
            0x4020..=0xFFFF => match &self.cartridge {
                Some(cartridge) => cartridge.borrow().cpu_read(address),
                None => Ok(0),
            },
        }
    }

    /// Write a value to the resource mapped at `address`
    ///
    /// # Errors
    /// Surfaces `UnsupportedWrite` from the cartridge region (NROM PRG is
    /// read-only) and PPU-side faults from the register region.
    pub fn write(&mut self, address: u16, data: u8) -> CoreResult<()> {
        match address {
            0x0000..=0x1FFF => {
                self.ram[(address & RAM_ADDRESS_MASK) as usize] = data;
                Ok(())
            }
            0x2000..=0x3FFF => match &self.ppu {
                Some(ppu) => ppu.borrow_mut().reg_write(address, data),
                None => Ok(()),
            },
            0x4000..=0x401F => Ok(()),
            0x4020..=0xFFFF => match &self.cartridge {
                Some(cartridge) => cartridge.borrow_mut().cpu_write(address, data),
                None => Ok(()),
            },
        }
    }

    /// Side-effect-free read for tracing and debuggers
    ///
    /// RAM and PRG reads behave like `read`; the PPU register region
    /// returns 0 rather than triggering latch or buffer side effects, and
    /// faults collapse to 0.
    pub fn peek(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => self.ram[(address & RAM_ADDRESS_MASK) as usize],
            0x2000..=0x401F => 0,
            0x4020..=0xFFFF => match &self.cartridge {
                Some(cartridge) => cartridge.borrow().cpu_read(address).unwrap_or(0),
                None => 0,
            },
        }
    }

    /// Snapshot of the internal RAM, for save states and debuggers
    pub fn ram(&self) -> &[u8; RAM_SIZE] {
        &self.ram
    }

    /// Overwrite the internal RAM (save-state restore)
    pub(crate) fn load_ram(&mut self, data: &[u8; RAM_SIZE]) {
        self.ram = *data;
    }
}

impl Default for CpuBus {
    fn default() -> Self {
        Self::new()
    }
}
