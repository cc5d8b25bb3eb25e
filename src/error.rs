// Error module - the crate-wide failure taxonomy
//
// Every fallible operation on the core components returns a `CoreResult`.
// Errors are never recovered internally; the emulator host decides whether
// to halt or present a diagnostic.

use std::fmt;
use std::io;

/// Result alias used by all fallible core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Failure kinds surfaced by the core
///
/// - `InvalidImage`: the ROM bytes do not begin with the iNES magic, or the
///   declared PRG/CHR sizes exceed the supplied data.
/// - `UnsupportedMapper`: the header requests a mapper that is not in the
///   registry. Carries the offending mapper id.
/// - `UnsupportedWrite`: a write was attempted against a mapper region that
///   does not accept writes (NROM PRG/CHR). Carries the address.
/// - `BadAddress`: a bus operation supplied an address outside the bus's
///   addressable range.
/// - `OutOfRange`: a PRG/CHR read index exceeded the slice.
/// - `Io`: an I/O failure in one of the file-loading conveniences.
#[derive(Debug)]
pub enum CoreError {
    /// The ROM bytes do not start with the iNES magic `4E 45 53 1A`
    InvalidImage,
    /// The header requests a mapper not in the registry
    UnsupportedMapper(u8),
    /// A write was attempted against a read-only mapper region
    UnsupportedWrite(u16),
    /// A bus operation supplied an out-of-range address
    BadAddress(u16),
    /// A PRG/CHR read index exceeded the slice length
    OutOfRange(usize),
    /// Failure reading a ROM or writing emulator artifacts
    Io(io::Error),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidImage => {
                write!(
                    f,
                    "Invalid iNES image. This is not a valid .nes file or the \
                     file format is unsupported"
                )
            }
            CoreError::UnsupportedMapper(id) => {
                write!(f, "Mapper {} is not supported", id)
            }
            CoreError::UnsupportedWrite(address) => {
                write!(
                    f,
                    "Write to ${:04X} is not supported by the active mapper",
                    address
                )
            }
            CoreError::BadAddress(address) => {
                write!(f, "Address ${:04X} is outside the bus's addressable range", address)
            }
            CoreError::OutOfRange(index) => {
                write!(f, "ROM read index {:#06X} exceeds the data slice", index)
            }
            CoreError::Io(err) => {
                write!(f, "I/O error: {}", err)
            }
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CoreError {
    fn from(err: io::Error) -> Self {
        CoreError::Io(err)
    }
}
