use image::Rgba;

pub const JASC_HEADER: &str = "JASC-PAL";
pub const JASC_VERSION: &str = "0100";

/// Colors of a JASC palette. Alpha is always opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(pub Vec<Rgba<u8>>);

impl Palette {
    pub fn new(colors: Vec<Rgba<u8>>) -> Self {
        Self(colors)
    }

    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
