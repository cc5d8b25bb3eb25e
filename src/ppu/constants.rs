// PPU constants (NTSC)

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Pixels in one frame
pub const FRAME_PIXELS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Size of the nametable VRAM in bytes (2KB)
pub(super) const VRAM_SIZE: usize = 0x0800;

/// Nametable address fold for the 2KB VRAM
pub(super) const VRAM_ADDRESS_MASK: u16 = 0x07FF;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 0x20;

/// Palette RAM address fold
pub(super) const PALETTE_ADDRESS_MASK: u16 = 0x1F;

/// The PPU bus addresses 14 bits ($0000-$3FFF)
pub(super) const PPU_ADDRESS_SPACE_MASK: u16 = 0x3FFF;

// ========================================
// Timing (NTSC)
// ========================================

/// PPU cycles (dots) per scanline
pub const CYCLES_PER_SCANLINE: i16 = 341;

/// Scanlines per frame: pre-render (-1), visible (0-239), post-render
/// (240), vertical blank (241-260)
pub const SCANLINES_PER_FRAME: i16 = 262;

/// Total PPU dots in one NTSC frame
pub const CYCLES_PER_FRAME: u32 = (CYCLES_PER_SCANLINE as u32) * (SCANLINES_PER_FRAME as u32);

/// Pre-render scanline
pub(super) const PRERENDER_SCANLINE: i16 = -1;

/// Last visible scanline
pub(super) const LAST_VISIBLE_SCANLINE: i16 = 239;

/// Last vertical-blank scanline; the counter wraps to -1 past it
pub(super) const LAST_SCANLINE: i16 = 260;
