//! Color interpolation tables
//!
//! Ten brightness levels, each mapping a 15 bit color to a palette index.
//! There is no header, the file is exactly `10 * 32 * 32 * 32` bytes.
pub mod error;
mod parser;
mod types;

use image::Rgba;

pub use parser::parse_icm;
pub use types::*;

use error::IcmError;

impl Level {
    /// Color channels are cut down to their top 5 bits.
    pub fn index(&self, color: Rgba<u8>) -> u8 {
        let [r, g, b, _] = color.0.map(|channel| (channel >> 3) as usize);

        self.0[(r * CHANNEL_STEPS + g) * CHANNEL_STEPS + b]
    }
}

impl Icm {
    pub fn level(&self, brightness: u8) -> Result<&Level, IcmError> {
        self.levels
            .get(brightness as usize)
            .ok_or(IcmError::BrightnessOutOfRange { brightness })
    }

    /// Palette index closest to `color` at `brightness`.
    pub fn index(&self, brightness: u8, color: Rgba<u8>) -> Result<u8, IcmError> {
        Ok(self.level(brightness)?.index(color))
    }
}
