// Save states
//
// A save state captures the component snapshots plus the three writable
// memories (CPU RAM, nametable VRAM, palette RAM), serialized as JSON.
// ROM contents are not stored: a state only restores onto an emulator
// running the same cartridge.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Emulator;
use crate::cpu::CpuSnapshot;
use crate::ppu::PpuSnapshot;

/// Format version written into every state
const SAVE_STATE_VERSION: u32 = 1;

/// A serializable machine state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    version: u32,
    cpu: CpuSnapshot,
    ram: Vec<u8>,
    ppu: PpuSnapshot,
    vram: Vec<u8>,
    palette_ram: Vec<u8>,
}

/// Save-state failures
#[derive(Debug)]
pub enum SaveStateError {
    Io(io::Error),
    Serde(serde_json::Error),
    /// The state does not fit this emulator (version or memory sizes)
    Incompatible(String),
}

impl fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStateError::Io(err) => write!(f, "save state I/O error: {}", err),
            SaveStateError::Serde(err) => write!(f, "save state serialization error: {}", err),
            SaveStateError::Incompatible(msg) => write!(f, "incompatible save state: {}", msg),
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(err: io::Error) -> Self {
        SaveStateError::Io(err)
    }
}

impl From<serde_json::Error> for SaveStateError {
    fn from(err: serde_json::Error) -> Self {
        SaveStateError::Serde(err)
    }
}

impl Emulator {
    /// Capture the current machine state
    pub fn save_state(&self) -> SaveState {
        let ppu = self.ppu();
        SaveState {
            version: SAVE_STATE_VERSION,
            cpu: self.cpu().snapshot(),
            ram: self.cpu().bus().ram().to_vec(),
            ppu: ppu.snapshot(),
            vram: ppu.bus().vram().to_vec(),
            palette_ram: ppu.bus().palette().to_vec(),
        }
    }

    /// Restore a state captured by `save_state`
    ///
    /// # Errors
    /// Returns `SaveStateError::Incompatible` when the version or memory
    /// sizes do not match this emulator.
    pub fn restore_state(&mut self, state: &SaveState) -> Result<(), SaveStateError> {
        if state.version != SAVE_STATE_VERSION {
            return Err(SaveStateError::Incompatible(format!(
                "version {} (expected {})",
                state.version, SAVE_STATE_VERSION
            )));
        }

        let ram = state
            .ram
            .as_slice()
            .try_into()
            .map_err(|_| SaveStateError::Incompatible("RAM size mismatch".into()))?;
        let vram = state
            .vram
            .as_slice()
            .try_into()
            .map_err(|_| SaveStateError::Incompatible("VRAM size mismatch".into()))?;
        let palette_ram = state
            .palette_ram
            .as_slice()
            .try_into()
            .map_err(|_| SaveStateError::Incompatible("palette RAM size mismatch".into()))?;

        self.cpu_mut().restore(&state.cpu);
        self.cpu_mut().bus_mut().load_ram(ram);

        let mut ppu = self.ppu_mut();
        ppu.restore(&state.ppu);
        ppu.bus_mut().load_vram(vram);
        ppu.bus_mut().load_palette(palette_ram);
        Ok(())
    }

    /// Serialize the current state to a JSON file
    pub fn save_state_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveStateError> {
        let json = serde_json::to_string(&self.save_state())?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Restore a state previously written by `save_state_to`
    pub fn load_state_from<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SaveStateError> {
        let json = fs::read_to_string(path)?;
        let state: SaveState = serde_json::from_str(&json)?;
        self.restore_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::nrom_image;
    use super::*;

    fn emulator() -> Emulator {
        let image = nrom_image(&[0x4C, 0x00, 0x80]); // JMP $8000
        let mut emulator = Emulator::from_bytes(&image).unwrap();
        emulator.reset().unwrap();
        emulator
    }

    #[test]
    fn test_state_round_trip() {
        let mut emulator = emulator();
        for _ in 0..500 {
            emulator.clock().unwrap();
        }
        emulator.cpu_mut().bus_mut().write(0x0010, 0x42).unwrap();
        emulator.ppu_mut().bus_mut().write(0x2000, 0x77).unwrap();
        emulator.ppu_mut().bus_mut().write(0x3F00, 0x21).unwrap();

        let state = emulator.save_state();
        let before = emulator.cpu().snapshot();

        // Diverge, then restore
        for _ in 0..300 {
            emulator.clock().unwrap();
        }
        emulator.cpu_mut().bus_mut().write(0x0010, 0xFF).unwrap();

        emulator.restore_state(&state).unwrap();

        assert_eq!(emulator.cpu().snapshot(), before);
        assert_eq!(emulator.cpu().bus().peek(0x0010), 0x42);
        assert_eq!(emulator.ppu().bus().read(0x2000).unwrap(), 0x77);
        assert_eq!(emulator.ppu().bus().read(0x3F00).unwrap(), 0x21);
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join("famicore_save_state_test.json");

        let mut emulator = emulator();
        for _ in 0..100 {
            emulator.clock().unwrap();
        }
        emulator.save_state_to(&path).unwrap();
        let expected = emulator.cpu().snapshot();

        for _ in 0..100 {
            emulator.clock().unwrap();
        }
        emulator.load_state_from(&path).unwrap();

        assert_eq!(emulator.cpu().snapshot(), expected);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_incompatible_version_rejected() {
        let mut emulator = emulator();
        let mut state = emulator.save_state();
        state.version = 99;

        let result = emulator.restore_state(&state);
        assert!(matches!(result, Err(SaveStateError::Incompatible(_))));
    }

    #[test]
    fn test_truncated_memory_rejected() {
        let mut emulator = emulator();
        let mut state = emulator.save_state();
        state.ram.truncate(16);

        let result = emulator.restore_state(&state);
        assert!(matches!(result, Err(SaveStateError::Incompatible(_))));
    }
}
