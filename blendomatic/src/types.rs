pub const HEADER_SIZE: usize = 4 + 4;
/// One bit per tile in a pixel's bitmask.
pub const MAX_TILES: u32 = u32::BITS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub mode_count: u32,
    pub tile_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendingMode {
    /// Pixels per tile.
    pub tile_size: u32,
    // [u8; tile_count], non zero if the tile has alpha values
    pub tile_flags: Vec<u8>,
    // [u32; tile_size], bit `m` of entry `n` belongs to pixel `n` of tile `m`
    pub tile_bits: Vec<u32>,
    // [[u8; tile_size]; tile_count]
    pub tile_alpha: Vec<Vec<u8>>,
}

impl BlendingMode {
    pub fn has_alpha(&self, tile: usize) -> bool {
        self.tile_flags.get(tile).is_some_and(|&flag| flag != 0)
    }

    /// A cleared bit marks an alpha pixel.
    ///
    /// `None` if the tile or pixel does not exist.
    pub fn is_alpha_pixel(&self, tile: usize, pixel: usize) -> Option<bool> {
        if tile >= self.tile_flags.len() {
            return None;
        }

        self.tile_bits
            .get(pixel)
            .map(|bits| bits & (1 << tile) == 0)
    }

    pub fn alpha_values(&self, tile: usize) -> Option<&[u8]> {
        self.tile_alpha.get(tile).map(|alpha| alpha.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blendomatic {
    pub header: Header,
    pub modes: Vec<BlendingMode>,
}
