#[derive(Debug, thiserror::Error)]
pub enum BlendomaticError {
    #[error("Unexpected end of file while reading {what}")]
    Truncated { what: &'static str },
    #[error("Blending mode {mode}: unexpected end of file while reading {what}")]
    TruncatedMode { mode: usize, what: &'static str },
    #[error("Invalid tile count: {count}. Expect 1 to 32")]
    BadTileCount { count: u32 },
    #[error("Blending mode {mode}: tile {tile} has no alpha values")]
    MissingAlpha { mode: usize, tile: usize },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
