//! Shared helpers for the integration tests: in-memory iNES image
//! builders and logging setup.

use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Initialize env_logger once so RUST_LOG works during test runs
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Build an iNES image with the given bank counts and flags-6 byte.
/// PRG and CHR bytes come from the fill closures, indexed by offset.
pub fn build_image<P, C>(prg_banks: u8, chr_banks: u8, flags6: u8, prg: P, chr: C) -> Vec<u8>
where
    P: Fn(usize) -> u8,
    C: Fn(usize) -> u8,
{
    let mut data = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, chr_banks, flags6, 0x00];
    data.resize(16, 0x00);
    data.extend((0..16384 * prg_banks as usize).map(&prg));
    data.extend((0..8192 * chr_banks as usize).map(&chr));
    data
}

/// A 16KB or 32KB NROM image with ascending PRG bytes and zeroed CHR
pub fn ascending_prg_image(prg_banks: u8) -> Vec<u8> {
    build_image(prg_banks, 1, 0x00, |i| (i & 0xFF) as u8, |_| 0x00)
}

/// An NROM image with `program` at $8000 and chosen vectors.
///
/// `vectors` lists `(cpu_address, byte)` pairs poked into the PRG image
/// through the NROM address fold (single bank mirrors through $FFFF).
pub fn program_image(prg_banks: u8, program: &[u8], vectors: &[(u16, u8)]) -> Vec<u8> {
    let prg_len = 16384 * prg_banks as usize;
    let mask = prg_len - 1;

    let mut prg = vec![0x00u8; prg_len];
    prg[..program.len()].copy_from_slice(program);
    for &(address, byte) in vectors {
        prg[address as usize & mask] = byte;
    }

    let mut data = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, 0x01, 0x00, 0x00];
    data.resize(16, 0x00);
    data.extend(prg);
    data.extend(std::iter::repeat(0x00).take(8192));
    data
}
