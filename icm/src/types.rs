pub const BRIGHTNESS_LEVELS: usize = 10;
/// Steps per color channel, 5 bits.
pub const CHANNEL_STEPS: usize = 32;
pub const LEVEL_SIZE: usize = CHANNEL_STEPS * CHANNEL_STEPS * CHANNEL_STEPS;
pub const ICM_SIZE: usize = BRIGHTNESS_LEVELS * LEVEL_SIZE;

/// Palette indices for one brightness, laid out as `[r][g][b]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level(pub(crate) Vec<u8>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icm {
    // [Level; BRIGHTNESS_LEVELS]
    pub levels: Vec<Level>,
}
