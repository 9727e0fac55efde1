#[derive(Debug, thiserror::Error)]
pub enum SlpError {
    #[error("Unexpected end of file while reading {what}")]
    Truncated { what: &'static str },
    #[error("Unknown SLP version: {version:?}")]
    BadVersion { version: [u8; 4] },
    #[error("Invalid frame count: {count}")]
    BadFrameCount { count: i32 },
    #[error("Frame {frame}: invalid dimensions {width}x{height}")]
    BadDimensions { frame: usize, width: i32, height: i32 },
    #[error("Frame {frame}: bad offsets ({reason})")]
    BadOffsets { frame: usize, reason: &'static str },
    #[error("Invalid player index: {player}. Expect 0 to 7")]
    InvalidPlayer { player: u8 },
    #[error("No frame at index {index}")]
    NoSuchFrame { index: usize },
    #[error("Frame {frame}, row {row}: {source}")]
    Decode {
        frame: usize,
        row: usize,
        #[source]
        source: RowError,
    },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}

/// Errors coming out of a single row's command stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("Command stream ends at byte {position}")]
    Truncated { position: usize },
    #[error("Invalid command: {opcode:#04x}")]
    InvalidOpcode { opcode: u8 },
    #[error("Not implemented: {feature}")]
    NotImplemented { feature: String },
    #[error("Palette index {index} is out of range")]
    PaletteIndexOutOfRange { index: usize },
    #[error("Row starts at byte {found} but the offset table says {expected}")]
    BadOffsets { expected: usize, found: usize },
}

impl RowError {
    pub(crate) fn not_implemented(feature: impl Into<String>) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }
}
