//! Background pipeline tests: shift-register reloads, attribute quadrant
//! selection, pattern address composition and whole-frame pixel output.

use super::*;

#[test]
fn test_shift_reload_low_bytes() {
    let mut ppu = ppu();
    ppu.pt_latch_lo = 0xAB;
    ppu.pt_latch_hi = 0xCD;
    ppu.pt_shift_lo = 0xFF00;
    ppu.pt_shift_hi = 0x1200;

    ppu.reload_shift_registers();

    assert_eq!(ppu.pt_shift_lo, 0xFFAB, "high byte preserved");
    assert_eq!(ppu.pt_shift_hi, 0x12CD);
}

#[test]
fn test_attribute_reload_fans_bits_out() {
    // Each attribute bit expands to a full byte so the attribute
    // shifters track the pattern shifters bit-for-bit; the two registers
    // reload independently
    let cases = [
        (0b00u8, 0x0000u16, 0x0000u16),
        (0b01, 0x00FF, 0x0000),
        (0b10, 0x0000, 0x00FF),
        (0b11, 0x00FF, 0x00FF),
    ];

    for (latch, lo, hi) in cases {
        let mut ppu = ppu();
        ppu.palette_latch = latch;
        ppu.reload_shift_registers();
        assert_eq!(ppu.at_shift_lo & 0x00FF, lo, "low fan for {:02b}", latch);
        assert_eq!(ppu.at_shift_hi & 0x00FF, hi, "high fan for {:02b}", latch);
    }
}

#[test]
fn test_shift_moves_all_registers() {
    let mut ppu = ppu();
    ppu.pt_shift_lo = 0x0001;
    ppu.pt_shift_hi = 0x8000;
    ppu.at_shift_lo = 0x4000;
    ppu.at_shift_hi = 0x0100;

    ppu.shift_background_registers();

    assert_eq!(ppu.pt_shift_lo, 0x0002);
    assert_eq!(ppu.pt_shift_hi, 0x0000, "bit 15 shifted out");
    assert_eq!(ppu.at_shift_lo, 0x8000);
    assert_eq!(ppu.at_shift_hi, 0x0200);
}

#[test]
fn test_attribute_quadrant_selection() {
    // One attribute byte covers a 4x4 tile block; two bits per 2x2
    // quadrant: 0b11_10_01_00 from top-left to bottom-right
    let cases = [
        (0u16, 0u16, 0b00),
        (2, 0, 0b01),
        (0, 2, 0b10),
        (2, 2, 0b11),
    ];

    for (coarse_x, coarse_y, expected) in cases {
        let mut ppu = ppu();
        ppu.bus_mut().write(0x23C0, 0b1110_0100).unwrap();
        ppu.v.set_coarse_x(coarse_x);
        ppu.v.set_coarse_y(coarse_y);

        // Dot 3 is stage 2, the attribute fetch
        ppu.cycle = 3;
        ppu.run_fetch_stage().unwrap();

        assert_eq!(
            ppu.palette_latch, expected,
            "quadrant at coarse ({}, {})",
            coarse_x, coarse_y
        );
    }
}

#[test]
fn test_attribute_address_composition() {
    // Attribute bytes live in the trailing 64 bytes of the nametable:
    // coarse (4,8) selects attribute cell (1,2) = $23D1
    let mut ppu = ppu();
    ppu.bus_mut().write(0x23D1, 0b0000_0001).unwrap();
    ppu.v.set_coarse_x(4);
    ppu.v.set_coarse_y(8);

    ppu.cycle = 3;
    ppu.run_fetch_stage().unwrap();

    assert_eq!(ppu.palette_latch, 0b01);
}

#[test]
fn test_pattern_address_composition() {
    // background_pt_address selects the 4KB half; the tile index picks
    // the 16-byte tile; fine Y the row
    let mut ppu = ppu_with_chr(0xBB);
    ppu.reg_write(PPUCTRL, 0x10).unwrap();
    ppu.nametable_latch = 0x42;
    ppu.v.set_fine_y(5);

    ppu.cycle = 5; // stage 4, pattern low fetch
    ppu.run_fetch_stage().unwrap();

    assert_eq!(ppu.pt_address, 0x1000 | (0x42 << 4) | 5);
    assert_eq!(ppu.pt_latch_lo, 0xBB);

    ppu.cycle = 7; // stage 6, pattern high fetch
    ppu.run_fetch_stage().unwrap();
    assert_eq!(ppu.pt_latch_hi, 0xBB);
}

#[test]
fn test_disabled_rendering_shows_backdrop() {
    let mut ppu = ppu();
    ppu.bus_mut().write(0x3F00, 0x21).unwrap();

    clock(&mut ppu, CYCLES_PER_FRAME);

    let backdrop = NTSC_PALETTE[0x21];
    let frame = ppu.frame();
    assert_eq!(frame[0], backdrop);
    assert_eq!(frame[FRAME_PIXELS / 2], backdrop);
    assert_eq!(frame[FRAME_PIXELS - 1], backdrop);
}

#[test]
fn test_enabled_rendering_uniform_frame() {
    // Every CHR bit set makes every pattern pixel color 3 of palette 0;
    // with a cleared attribute table the whole frame resolves to palette
    // entry $3F03
    let mut ppu = ppu_with_chr(0xFF);
    ppu.reg_write(PPUMASK, 0x08).unwrap();
    ppu.bus_mut().write(0x3F03, 0x16).unwrap();

    clock(&mut ppu, CYCLES_PER_FRAME);

    let expected = NTSC_PALETTE[0x16];
    let frame = ppu.frame();
    for (i, pixel) in frame.iter().enumerate() {
        assert_eq!(*pixel, expected, "pixel {}", i);
    }
}

#[test]
fn test_frame_buffer_swaps_on_completion() {
    let mut ppu = ppu();
    ppu.bus_mut().write(0x3F00, 0x21).unwrap();

    // Mid-frame the published buffer still holds the previous frame
    clock(&mut ppu, CYCLES_PER_FRAME / 2);
    assert_eq!(ppu.frame()[0], Rgb::default());

    clock(&mut ppu, CYCLES_PER_FRAME - CYCLES_PER_FRAME / 2);
    assert_eq!(ppu.frame()[0], NTSC_PALETTE[0x21]);
}
