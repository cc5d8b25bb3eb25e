// Emulator module - host wiring and the master tick loop
//
// Builds the component graph (a DAG, no strong cycles):
//
// ```text
// Cpu -> CpuBus -> Ppu -> PpuBus -> Cartridge
//              \______________________/
// ```
//
// and drives it at the NTSC master-clock ratio of three PPU dots per CPU
// tick. Everything here is single-threaded and cooperative; no method
// blocks.

pub mod config;
pub mod save_state;
pub mod screenshot;

use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;

use log::trace;

use crate::bus::CpuBus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::error::CoreResult;
use crate::ppu::{Ppu, PpuBus, Rgb, FRAME_PIXELS};

pub use config::{EmulatorConfig, SaveStateConfig, ScreenshotConfig, TraceConfig};
pub use save_state::{SaveState, SaveStateError};
pub use screenshot::ScreenshotError;

/// NTSC master-clock ratio: PPU dots per CPU tick
pub const PPU_TICKS_PER_CPU_TICK: u32 = 3;

/// A wired NES core: CPU, PPU, buses and cartridge
pub struct Emulator {
    cpu: Cpu,
    ppu: Rc<RefCell<Ppu>>,
    cartridge: Rc<RefCell<Cartridge>>,
    trace_enabled: bool,
}

impl Emulator {
    /// Build an emulator around an iNES image
    ///
    /// # Errors
    /// Propagates image and mapper resolution failures.
    pub fn from_bytes(data: &[u8]) -> CoreResult<Emulator> {
        Ok(Emulator::from_cartridge(Cartridge::from_bytes(data)?))
    }

    /// Build an emulator from a `.nes` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Emulator> {
        Ok(Emulator::from_cartridge(Cartridge::from_file(path)?))
    }

    fn from_cartridge(cartridge: Cartridge) -> Emulator {
        let cartridge = Rc::new(RefCell::new(cartridge));

        let ppu_bus = PpuBus::with_cartridge(Rc::clone(&cartridge));
        let ppu = Rc::new(RefCell::new(Ppu::new(ppu_bus)));

        let mut cpu_bus = CpuBus::new();
        cpu_bus.attach_ppu(Rc::clone(&ppu));
        cpu_bus.attach_cartridge(Rc::clone(&cartridge));

        Emulator {
            cpu: Cpu::new(cpu_bus),
            ppu,
            cartridge,
            trace_enabled: false,
        }
    }

    /// Apply the runtime-relevant options of a configuration
    pub fn apply_config(&mut self, config: &EmulatorConfig) {
        self.trace_enabled = config.trace.enabled;
    }

    /// Enable or disable per-instruction trace logging
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace_enabled = enabled;
    }

    /// Reset the PPU and then the CPU
    pub fn reset(&mut self) -> CoreResult<()> {
        self.ppu.borrow_mut().reset();
        self.cpu.reset()
    }

    /// Advance the system by one CPU tick (three PPU dots)
    ///
    /// # Errors
    /// Stops at the first component fault; the system is left at a
    /// consistent instruction boundary.
    pub fn clock(&mut self) -> CoreResult<()> {
        for _ in 0..PPU_TICKS_PER_CPU_TICK {
            self.ppu.borrow_mut().clock()?;
        }

        if self.trace_enabled && self.cpu.remaining_cycles() == 0 {
            trace!("{}", self.cpu.trace_line());
        }
        self.cpu.clock()
    }

    /// Run until the PPU completes its current frame
    pub fn run_frame(&mut self) -> CoreResult<()> {
        let target = self.ppu.borrow().frame_count() + 1;
        while self.ppu.borrow().frame_count() < target {
            self.clock()?;
        }
        Ok(())
    }

    /// The most recently completed 256x240 RGB frame
    pub fn frame(&self) -> Ref<'_, [Rgb; FRAME_PIXELS]> {
        Ref::map(self.ppu.borrow(), |ppu| ppu.frame())
    }

    /// Frames completed since power-on
    pub fn frame_count(&self) -> u64 {
        self.ppu.borrow().frame_count()
    }

    /// The CPU, for tests and debuggers
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable CPU access
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The PPU, for tests and debuggers
    pub fn ppu(&self) -> Ref<'_, Ppu> {
        self.ppu.borrow()
    }

    /// Mutable PPU access
    pub fn ppu_mut(&self) -> RefMut<'_, Ppu> {
        self.ppu.borrow_mut()
    }

    /// The loaded cartridge
    pub fn cartridge(&self) -> Ref<'_, Cartridge> {
        self.cartridge.borrow()
    }
}
