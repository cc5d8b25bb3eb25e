// famicore - a cycle-batched NES emulation core
//
// The four hard subsystems (6502 CPU, 2C02 background PPU, the two
// address-decoded buses, and the iNES cartridge/mapper layer) plus the
// emulator shell that wires and drives them.

// Public modules
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod emulator;
pub mod error;
pub mod ppu;
pub mod rom;

// Re-export the main types for convenience
pub use bus::CpuBus;
pub use cartridge::mappers::Mapper;
pub use cartridge::Cartridge;
pub use cpu::{Cpu, CpuSnapshot};
pub use emulator::{
    Emulator, EmulatorConfig, SaveState, SaveStateError, ScreenshotConfig, ScreenshotError,
};
pub use error::{CoreError, CoreResult};
pub use ppu::{Ppu, PpuBus, PpuSnapshot, Rgb, NTSC_PALETTE};
pub use rom::{Header, Mirroring, Rom};
