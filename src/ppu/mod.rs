// PPU module - Picture Processing Unit (2C02) background core
//
// A scanline/cycle state machine driven one dot at a time by the host
// (three dots per CPU tick on NTSC). Each pre-render/visible scanline runs
// the background fetch pipeline: nametable, attribute and pattern fetches
// feed a pair of latches that reload four 16-bit shift registers every
// eight dots, while the loopy v/t scroll registers advance in coarse and
// fine steps.
//
// ## Scanline timeline (NTSC, 262 scanlines x 341 dots)
//
// - Scanline -1: pre-render; runs the same fetch schedule as the visible
//   lines so the shift registers are primed for scanline 0.
// - Scanlines 0-239: visible; fetch schedule plus pixel output.
// - Scanline 240: post-render idle.
// - Scanlines 241-260: vertical blank.
//
// ## Fetch schedule
//
// For dots 1-256 and 321-340, one stage per dot, keyed by (dot - 1) % 8:
//
// | Stage | Action                                        |
// |-------|-----------------------------------------------|
// | 0     | reload shift registers; fetch nametable byte  |
// | 2     | fetch attribute byte, select quadrant         |
// | 4     | fetch pattern table low plane                 |
// | 6     | fetch pattern table high plane (+8)           |
// | 7     | increment coarse X (increment Y at dot 256)   |
//
// At dot 257 the horizontal scroll bits reload from t and the shift
// registers reload once more.
//
// Sprites, OAM, NMI delivery and the vblank status bit belong to external
// collaborators; this core only exposes the hooks they need.

mod bus;
mod constants;
mod palette;
mod registers;
mod rendering;

pub use bus::PpuBus;
pub use constants::{
    CYCLES_PER_FRAME, CYCLES_PER_SCANLINE, FRAME_PIXELS, SCANLINES_PER_FRAME, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
pub use palette::{Rgb, NTSC_PALETTE};
pub use registers::{Control, LoopyAddress, Mask, Status};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use constants::{LAST_SCANLINE, LAST_VISIBLE_SCANLINE, PRERENDER_SCANLINE};

/// The PPU background core
pub struct Ppu {
    // ========================================
    // Memory-mapped registers
    // ========================================
    /// $2000: PPUCTRL
    control: Control,
    /// $2001: PPUMASK
    mask: Mask,
    /// $2002: PPUSTATUS (bits driven externally)
    status: Status,

    // ========================================
    // Internal scroll/address registers
    // ========================================
    /// v: current VRAM address (loopy v, 15 bits)
    v: LoopyAddress,
    /// t: temporary VRAM address (loopy t); the "top-left" screen address
    t: LoopyAddress,
    /// Fine X scroll (3 bits)
    fine_x: u8,
    /// Two-write latch shared by PPUSCROLL and PPUADDR
    ///
    /// false = next write is the first of the pair. Reading PPUSTATUS
    /// resets it.
    write_latch: bool,
    /// $2007 read-ahead buffer
    data_read_buffer: u8,

    // ========================================
    // Background fetch pipeline
    // ========================================
    /// Nametable byte latched at stage 0
    nametable_latch: u8,
    /// Two attribute bits latched at stage 2
    palette_latch: u8,
    /// Pattern-table address computed at stage 4, reused at stage 6
    pt_address: u16,
    /// Pattern low plane latched at stage 4
    pt_latch_lo: u8,
    /// Pattern high plane latched at stage 6
    pt_latch_hi: u8,

    /// Pattern shift registers; the next pixel is bit (15 - fine_x)
    pt_shift_lo: u16,
    pt_shift_hi: u16,
    /// Attribute shift registers; the two palette bits fanned out to bytes
    at_shift_lo: u16,
    at_shift_hi: u16,

    // ========================================
    // Timing
    // ========================================
    /// Current scanline: -1 pre-render, 0-239 visible, 240 post-render,
    /// 241-260 vblank
    scanline: i16,
    /// Current dot within the scanline (0-340)
    cycle: i16,
    /// Frames completed since power-on
    frame: u64,

    // ========================================
    // Output
    // ========================================
    /// Frame under construction
    back_buffer: Box<[Rgb; FRAME_PIXELS]>,
    /// Most recently completed frame
    frame_buffer: Box<[Rgb; FRAME_PIXELS]>,
    /// Host-supplied 64-entry color lookup
    palette_table: [Rgb; 64],

    bus: PpuBus,
}

/// Side-effect-free copy of the PPU register state
///
/// For tests, tracing and save states; reading one never perturbs the
/// running emulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpuSnapshot {
    pub control: u8,
    pub mask: u8,
    pub status: u8,
    pub v: u16,
    pub t: u16,
    pub fine_x: u8,
    pub write_latch: bool,
    pub data_read_buffer: u8,
    pub nametable_latch: u8,
    pub palette_latch: u8,
    pub pt_address: u16,
    pub pt_latch_lo: u8,
    pub pt_latch_hi: u8,
    pub pt_shift_lo: u16,
    pub pt_shift_hi: u16,
    pub at_shift_lo: u16,
    pub at_shift_hi: u16,
    pub scanline: i16,
    pub cycle: i16,
    pub frame: u64,
}

impl Ppu {
    /// Create a PPU over the given bus, decoding colors with the standard
    /// NTSC palette
    pub fn new(bus: PpuBus) -> Self {
        Ppu::with_palette(bus, NTSC_PALETTE)
    }

    /// Create a PPU with a host-supplied 64-entry color table
    pub fn with_palette(bus: PpuBus, palette_table: [Rgb; 64]) -> Self {
        Ppu {
            control: Control::default(),
            mask: Mask::default(),
            status: Status::default(),
            v: LoopyAddress::default(),
            t: LoopyAddress::default(),
            fine_x: 0,
            write_latch: false,
            data_read_buffer: 0,
            nametable_latch: 0,
            palette_latch: 0,
            pt_address: 0,
            pt_latch_lo: 0,
            pt_latch_hi: 0,
            pt_shift_lo: 0,
            pt_shift_hi: 0,
            at_shift_lo: 0,
            at_shift_hi: 0,
            scanline: PRERENDER_SCANLINE,
            cycle: 0,
            frame: 0,
            back_buffer: Box::new([Rgb::default(); FRAME_PIXELS]),
            frame_buffer: Box::new([Rgb::default(); FRAME_PIXELS]),
            palette_table,
            bus,
        }
    }

    /// Reset the PPU registers and rendering pipeline
    ///
    /// Registers, latches and shift registers clear; the scanline/cycle
    /// counters and the contents of VRAM and palette RAM are left alone.
    ///
    /// https://www.nesdev.org/wiki/PPU_power_up_state
    pub fn reset(&mut self) {
        self.control = Control::default();
        self.mask = Mask::default();
        self.status = Status::default();
        self.v = LoopyAddress::default();
        self.t = LoopyAddress::default();
        self.fine_x = 0;
        self.write_latch = false;
        self.data_read_buffer = 0;
        self.nametable_latch = 0;
        self.palette_latch = 0;
        self.pt_address = 0;
        self.pt_latch_lo = 0;
        self.pt_latch_hi = 0;
        self.pt_shift_lo = 0;
        self.pt_shift_hi = 0;
        self.at_shift_lo = 0;
        self.at_shift_hi = 0;

        debug!("PPU reset");
    }

    /// Advance the PPU by one dot
    ///
    /// # Errors
    /// Surfaces bus faults (a CHR read outside the ROM's data). The tick
    /// loop should stop on the first error.
    pub fn clock(&mut self) -> CoreResult<()> {
        if self.scanline <= LAST_VISIBLE_SCANLINE {
            let in_fetch_window =
                (1..=256).contains(&self.cycle) || (321..=340).contains(&self.cycle);

            if in_fetch_window {
                self.run_fetch_stage()?;
            }

            if self.scanline >= 0 && (1..=256).contains(&self.cycle) {
                self.emit_pixel()?;
            }

            if in_fetch_window {
                self.shift_background_registers();
            }

            if self.cycle == 257 {
                self.reload_horizontal_scroll();
                self.reload_shift_registers();
            }
        }

        self.advance_cycle();
        Ok(())
    }

    /// Cycle-major counter advance: dots wrap at 341, scanlines wrap past
    /// 260 back to the pre-render line
    fn advance_cycle(&mut self) {
        self.cycle += 1;
        if self.cycle == CYCLES_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline > LAST_SCANLINE {
                self.scanline = PRERENDER_SCANLINE;
                self.finish_frame();
            }
        }
    }

    /// Publish the working buffer as the completed frame
    fn finish_frame(&mut self) {
        std::mem::swap(&mut self.back_buffer, &mut self.frame_buffer);
        self.frame += 1;
    }

    /// The most recently completed 256x240 frame
    pub fn frame(&self) -> &[Rgb; FRAME_PIXELS] {
        &self.frame_buffer
    }

    /// Frames completed since power-on
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Current scanline (-1 through 260)
    pub fn scanline(&self) -> i16 {
        self.scanline
    }

    /// Current dot within the scanline (0 through 340)
    pub fn cycle(&self) -> i16 {
        self.cycle
    }

    /// The control register, read-only
    pub fn control(&self) -> Control {
        self.control
    }

    /// The mask register, read-only
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// The status register, read-only
    pub fn status(&self) -> Status {
        self.status
    }

    /// Mutable status access for the external sprite/vblank logic that
    /// drives the V/S/O bits
    pub fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    /// Current VRAM address (loopy v), read-only
    pub fn vram_address(&self) -> LoopyAddress {
        self.v
    }

    /// Temporary VRAM address (loopy t), read-only
    pub fn temp_vram_address(&self) -> LoopyAddress {
        self.t
    }

    /// Fine X scroll, read-only
    pub fn fine_x(&self) -> u8 {
        self.fine_x
    }

    /// The two-write latch state, read-only
    pub fn write_latch(&self) -> bool {
        self.write_latch
    }

    /// The PPU-side bus
    pub fn bus(&self) -> &PpuBus {
        &self.bus
    }

    /// Mutable access to the PPU-side bus
    pub fn bus_mut(&mut self) -> &mut PpuBus {
        &mut self.bus
    }

    /// Capture the register state without side effects
    pub fn snapshot(&self) -> PpuSnapshot {
        PpuSnapshot {
            control: self.control.reg(),
            mask: self.mask.reg(),
            status: self.status.reg(),
            v: self.v.reg(),
            t: self.t.reg(),
            fine_x: self.fine_x,
            write_latch: self.write_latch,
            data_read_buffer: self.data_read_buffer,
            nametable_latch: self.nametable_latch,
            palette_latch: self.palette_latch,
            pt_address: self.pt_address,
            pt_latch_lo: self.pt_latch_lo,
            pt_latch_hi: self.pt_latch_hi,
            pt_shift_lo: self.pt_shift_lo,
            pt_shift_hi: self.pt_shift_hi,
            at_shift_lo: self.at_shift_lo,
            at_shift_hi: self.at_shift_hi,
            scanline: self.scanline,
            cycle: self.cycle,
            frame: self.frame,
        }
    }

    /// Restore the register state captured by `snapshot`
    pub fn restore(&mut self, snapshot: &PpuSnapshot) {
        self.control.set_reg(snapshot.control);
        self.mask.set_reg(snapshot.mask);
        self.status.set_reg(snapshot.status);
        self.v.set_reg(snapshot.v);
        self.t.set_reg(snapshot.t);
        self.fine_x = snapshot.fine_x;
        self.write_latch = snapshot.write_latch;
        self.data_read_buffer = snapshot.data_read_buffer;
        self.nametable_latch = snapshot.nametable_latch;
        self.palette_latch = snapshot.palette_latch;
        self.pt_address = snapshot.pt_address;
        self.pt_latch_lo = snapshot.pt_latch_lo;
        self.pt_latch_hi = snapshot.pt_latch_hi;
        self.pt_shift_lo = snapshot.pt_shift_lo;
        self.pt_shift_hi = snapshot.pt_shift_hi;
        self.at_shift_lo = snapshot.at_shift_lo;
        self.at_shift_hi = snapshot.at_shift_hi;
        self.scanline = snapshot.scanline;
        self.cycle = snapshot.cycle;
        self.frame = snapshot.frame;
    }
}

#[cfg(test)]
mod tests;
