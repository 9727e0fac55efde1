use std::fmt;

pub const COPYRIGHT: &[u8] = b"Copyright (c) 1997 Ensemble Studios.";

pub const HEADER_SIZE: usize = 40 + 4 + 12 + 4 + 4;
pub const TABLE_INFO_SIZE: usize = 4 + 4 + 4;
pub const FILE_INFO_SIZE: usize = 4 + 4 + 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub copyright: [u8; 40],
    pub version: [u8; 4],
    pub file_type: [u8; 12],
    pub table_count: i32,
    /// Where the file data starts.
    pub file_offset: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub u32);

impl FileId {
    pub const INVALID: FileId = FileId(u32::MAX);

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID && self.0 != 0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    /// Stored reversed and padded with spaces, `" pls"` is `slp`.
    pub extension: [u8; 4],
    pub offset: i32,
    pub num_files: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub id: FileId,
    pub offset: i32,
    pub size: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub info: TableInfo,
    pub files: Vec<FileInfo>,
}

impl Table {
    pub fn extension(&self) -> String {
        format_extension(&self.info.extension)
    }
}

/// Turns a stored table extension into a readable one.
pub fn format_extension(extension: &[u8]) -> String {
    if extension == b"anib" {
        return "bin".to_string();
    }

    let reversed = extension.iter().rev().copied().collect::<Vec<u8>>();

    String::from_utf8_lossy(&reversed).trim().to_string()
}

pub struct Drs {
    pub header: Header,
    pub tables: Vec<Table>,
    pub(crate) data: Vec<u8>,
}
