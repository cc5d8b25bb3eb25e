//! Cartridge integration tests: iNES parsing, NROM mapping and the
//! error taxonomy as seen through the public API.

mod common;

use common::{ascending_prg_image, build_image, init_logging};
use famicore::{Cartridge, CoreError, Mirroring};

#[test]
fn test_nrom_32k_cpu_reads() {
    init_logging();

    // PRG filled with ascending (i & 0xFF) bytes
    let cartridge = Cartridge::from_bytes(&ascending_prg_image(2)).unwrap();

    assert_eq!(cartridge.cpu_read(0x8000).unwrap(), 0x00);
    assert_eq!(cartridge.cpu_read(0x8001).unwrap(), 0x01);
    assert_eq!(
        cartridge.cpu_read(0xFFFF).unwrap(),
        0xFF,
        "$FFFF folds to PRG offset $7FFF"
    );
}

#[test]
fn test_nrom_16k_mirrors_upper_bank() {
    init_logging();

    let cartridge = Cartridge::from_bytes(&ascending_prg_image(1)).unwrap();

    assert_eq!(cartridge.cpu_read(0x8000).unwrap(), 0x00);
    assert_eq!(
        cartridge.cpu_read(0x8000).unwrap(),
        cartridge.cpu_read(0xC000).unwrap(),
        "single bank mirrors across $8000-$FFFF"
    );
    assert_eq!(
        cartridge.cpu_read(0xBFFF).unwrap(),
        cartridge.cpu_read(0xFFFF).unwrap()
    );
}

#[test]
fn test_chr_reads() {
    init_logging();

    let image = build_image(1, 1, 0x00, |_| 0x00, |i| (i >> 8) as u8);
    let cartridge = Cartridge::from_bytes(&image).unwrap();

    assert_eq!(cartridge.ppu_read(0x0000).unwrap(), 0x00);
    assert_eq!(cartridge.ppu_read(0x1F00).unwrap(), 0x1F);
}

#[test]
fn test_header_fields_surface() {
    init_logging();

    let image = build_image(2, 1, 0x01, |_| 0x00, |_| 0x00);
    let cartridge = Cartridge::from_bytes(&image).unwrap();

    assert_eq!(cartridge.mapper_name(), "NROM");
    assert_eq!(cartridge.nt_mirroring(), Mirroring::Vertical);
    assert_eq!(cartridge.header().prg_banks, 2);
    assert_eq!(cartridge.header().chr_banks, 1);
    assert_eq!(cartridge.header().prg_rom_size, 32768);
    assert_eq!(cartridge.header().chr_rom_size, 8192);
}

#[test]
fn test_invalid_magic_rejected() {
    init_logging();

    let mut image = ascending_prg_image(1);
    image[3] = 0x00;

    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CoreError::InvalidImage)
    ));
}

#[test]
fn test_truncated_image_rejected() {
    init_logging();

    let mut image = ascending_prg_image(1);
    image.truncate(image.len() - 100);

    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CoreError::InvalidImage)
    ));
}

#[test]
fn test_unsupported_mapper_carries_id() {
    init_logging();

    let mut image = ascending_prg_image(1);
    image[7] = 0x10; // mapper 16

    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CoreError::UnsupportedMapper(16))
    ));
}

#[test]
fn test_nrom_rejects_writes() {
    init_logging();

    let mut cartridge = Cartridge::from_bytes(&ascending_prg_image(1)).unwrap();

    assert!(matches!(
        cartridge.cpu_write(0x8000, 0x00),
        Err(CoreError::UnsupportedWrite(0x8000))
    ));
    assert!(matches!(
        cartridge.ppu_write(0x0000, 0x00),
        Err(CoreError::UnsupportedWrite(0x0000))
    ));
}

#[test]
fn test_chr_read_out_of_range() {
    init_logging();

    let cartridge = Cartridge::from_bytes(&ascending_prg_image(1)).unwrap();

    assert!(matches!(
        cartridge.ppu_read(0x2000),
        Err(CoreError::OutOfRange(0x2000))
    ));
}
