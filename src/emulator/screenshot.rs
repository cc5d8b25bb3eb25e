// Screenshots
//
// Encodes the most recently completed frame as an 8-bit RGB PNG in the
// configured directory.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::config::ScreenshotConfig;
use super::Emulator;
use crate::ppu::{Rgb, FRAME_PIXELS, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Screenshot failures
#[derive(Debug)]
pub enum ScreenshotError {
    Io(io::Error),
    Encode(png::EncodingError),
}

impl fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenshotError::Io(err) => write!(f, "screenshot I/O error: {}", err),
            ScreenshotError::Encode(err) => write!(f, "PNG encoding error: {}", err),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(err: io::Error) -> Self {
        ScreenshotError::Io(err)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(err: png::EncodingError) -> Self {
        ScreenshotError::Encode(err)
    }
}

/// Write `frame` to a PNG file under the configured directory
///
/// Returns the path of the written file.
pub fn save_screenshot(
    frame: &[Rgb; FRAME_PIXELS],
    config: &ScreenshotConfig,
) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(&config.screenshot_directory)?;

    let filename = if config.include_timestamp {
        format!("frame_{}.png", Local::now().format("%Y%m%d_%H%M%S%3f"))
    } else {
        String::from("frame.png")
    };
    let path = config.screenshot_directory.join(filename);

    write_png(&path, frame)?;
    Ok(path)
}

fn write_png(path: &Path, frame: &[Rgb; FRAME_PIXELS]) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let mut encoder = png::Encoder::new(
        io::BufWriter::new(file),
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
    );
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;

    let mut data = Vec::with_capacity(FRAME_PIXELS * 3);
    for pixel in frame.iter() {
        data.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
    }
    writer.write_image_data(&data)?;
    Ok(())
}

impl Emulator {
    /// Screenshot the most recently completed frame
    pub fn screenshot(&self, config: &ScreenshotConfig) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(&self.frame(), config)
    }
}
