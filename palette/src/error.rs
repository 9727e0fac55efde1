#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Unexpected end of file while reading {what}")]
    Truncated { what: &'static str },
    #[error("Invalid header: {found:?}")]
    InvalidHeader { found: String },
    #[error("Invalid version: {found:?}")]
    InvalidVersion { found: String },
    #[error("Invalid color count: {found:?}")]
    InvalidCount { found: String },
    #[error("Failed to parse color at line {line}")]
    InvalidLine { line: usize },
    #[error("Palette is not valid UTF-8")]
    NotText,
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
