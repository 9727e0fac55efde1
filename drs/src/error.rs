#[derive(Debug, thiserror::Error)]
pub enum DrsError {
    #[error("Unexpected end of file while reading {what}")]
    Truncated { what: &'static str },
    #[error("Invalid copyright string: {copyright:?}")]
    InvalidCopyright { copyright: String },
    #[error("Invalid table count: {count}")]
    BadCount { count: i32 },
    #[error("Failed to parse file entries of table {table}")]
    InvalidTableEntry { table: usize },
    #[error("File {id} points outside of the archive")]
    FileOutOfBounds { id: u32 },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
