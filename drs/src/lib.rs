//! DRS archive reading
//!
//! ```text
//! +--------+------+--------------+
//! | Offset | Size | Name         |
//! |--------|------|--------------|
//! |      0 |   64 | Header       |
//! |     64 |   12 | TableInfo[0] |
//! | ...                          |
//! |        |   12 | TableInfo[N] |
//! |        |   12 | FileInfo[0]  |
//! | ...                          |
//! |        |   12 | FileInfo[M]  |
//! |        |      | FileData[0]  |
//! | ...                          |
//! |        |      | FileData[M]  |
//! +--------+------+--------------+
//! ```
pub mod error;
mod parser;
mod types;

pub use types::*;

use error::DrsError;

impl Drs {
    /// All files of all tables, in table order.
    pub fn files(&self) -> impl Iterator<Item = (&Table, &FileInfo)> {
        self.tables
            .iter()
            .flat_map(|table| table.files.iter().map(move |file| (table, file)))
    }

    pub fn file_count(&self) -> usize {
        self.tables.iter().map(|table| table.files.len()).sum()
    }

    pub fn file_by_id(&self, id: FileId) -> Option<&FileInfo> {
        self.files()
            .map(|(_, file)| file)
            .find(|file| file.id == id)
    }

    pub fn table_by_extension(&self, extension: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.extension() == extension)
    }

    pub fn file_data(&self, file: &FileInfo) -> Result<&[u8], DrsError> {
        let out_of_bounds = DrsError::FileOutOfBounds { id: file.id.0 };

        if file.offset < 0 || file.size < 0 {
            return Err(out_of_bounds);
        }

        let start = file.offset as usize;
        let end = start + file.size as usize;

        self.data.get(start..end).ok_or(out_of_bounds)
    }
}
