//! Hardware quirks: scroll-wrap edge cases, the $2006 bit-14 clear, and
//! the palette read-buffer behavior.

use super::*;

#[test]
fn test_coarse_x_wrap_flips_nametable() {
    let mut ppu = ppu();
    ppu.v.set_coarse_x(31);

    ppu.increment_coarse_x();

    assert_eq!(ppu.v.coarse_x(), 0);
    assert_eq!(ppu.v.nt_select_x(), 1);
}

#[test]
fn test_increment_y_through_fine_y() {
    let mut ppu = ppu();
    for expected in 1..=7 {
        ppu.increment_y();
        assert_eq!(ppu.v.fine_y(), expected);
        assert_eq!(ppu.v.coarse_y(), 0);
    }

    ppu.increment_y();
    assert_eq!(ppu.v.fine_y(), 0, "fine Y carries into coarse Y");
    assert_eq!(ppu.v.coarse_y(), 1);
}

#[test]
fn test_row_29_wrap_flips_vertical_nametable() {
    let mut ppu = ppu();
    ppu.v.set_coarse_y(29);
    ppu.v.set_fine_y(7);

    ppu.increment_y();

    assert_eq!(ppu.v.coarse_y(), 0);
    assert_eq!(ppu.v.nt_select_y(), 1, "row 29 is the last visible row");
}

#[test]
fn test_row_31_wraps_without_flip() {
    // Coarse Y can be pointed into the attribute rows (30/31) by a raw
    // $2006 write; leaving row 31 wraps to 0 but is not a nametable
    // switch
    let mut ppu = ppu();
    ppu.v.set_coarse_y(31);
    ppu.v.set_fine_y(7);

    ppu.increment_y();

    assert_eq!(ppu.v.coarse_y(), 0);
    assert_eq!(ppu.v.nt_select_y(), 0, "no flip out of row 31");
}

#[test]
fn test_row_30_steps_to_31() {
    let mut ppu = ppu();
    ppu.v.set_coarse_y(30);
    ppu.v.set_fine_y(7);

    ppu.increment_y();

    assert_eq!(ppu.v.coarse_y(), 31);
    assert_eq!(ppu.v.nt_select_y(), 0);
}

#[test]
fn test_address_high_write_clears_bit_14() {
    // The hardware zeroes bit 14 of t on the first $2006 write, so only
    // the low 6 bits of the data byte survive
    let mut ppu = ppu();
    ppu.reg_write(PPUADDR, 0xFF).unwrap();
    ppu.reg_write(PPUADDR, 0x00).unwrap();

    assert_eq!(ppu.vram_address().reg(), 0x3F00);
}

#[test]
fn test_palette_read_is_immediate() {
    let mut ppu = ppu();
    ppu.bus_mut().write(0x3F00, 0x21).unwrap();
    ppu.reg_write(PPUADDR, 0x3F).unwrap();
    ppu.reg_write(PPUADDR, 0x00).unwrap();

    // No one-read delay in the palette range
    assert_eq!(ppu.reg_read(PPUDATA).unwrap(), 0x21);
}

#[test]
fn test_palette_read_buffers_nametable_underneath() {
    // While a palette read returns immediately, the internal buffer
    // still picks up the mirrored nametable byte at v & $2FFF
    let mut ppu = ppu();
    ppu.bus_mut().write(0x2F00, 0x5A).unwrap();
    ppu.bus_mut().write(0x3F00, 0x21).unwrap();

    ppu.reg_write(PPUADDR, 0x3F).unwrap();
    ppu.reg_write(PPUADDR, 0x00).unwrap();
    assert_eq!(ppu.reg_read(PPUDATA).unwrap(), 0x21);
    assert_eq!(ppu.data_read_buffer, 0x5A);

    // Pointing back below the palette range surfaces that buffered byte
    ppu.reg_write(PPUADDR, 0x20).unwrap();
    ppu.reg_write(PPUADDR, 0x00).unwrap();
    assert_eq!(ppu.reg_read(PPUDATA).unwrap(), 0x5A);
}

#[test]
fn test_palette_read_sequence_stays_immediate() {
    let mut ppu = ppu();
    for (i, value) in [0x01u8, 0x02, 0x03].iter().enumerate() {
        ppu.bus_mut().write(0x3F00 + i as u16, *value).unwrap();
    }
    ppu.reg_write(PPUADDR, 0x3F).unwrap();
    ppu.reg_write(PPUADDR, 0x00).unwrap();

    assert_eq!(ppu.reg_read(PPUDATA).unwrap(), 0x01);
    assert_eq!(ppu.reg_read(PPUDATA).unwrap(), 0x02);
    assert_eq!(ppu.reg_read(PPUDATA).unwrap(), 0x03);
}
