use std::{ffi::OsStr, fmt::Write, path::Path};

use crate::{error::PaletteError, Palette, JASC_HEADER, JASC_VERSION};

impl Palette {
    /// JASC text with CRLF line endings.
    pub fn marshal(&self) -> String {
        let mut out = String::new();

        // writing into a String does not fail
        let _ = write!(out, "{JASC_HEADER}\r\n{JASC_VERSION}\r\n{}\r\n", self.len());

        self.0.iter().for_each(|color| {
            let _ = write!(out, "{} {} {}\r\n", color[0], color[1], color[2]);
        });

        out
    }

    pub fn write_to_file(&self, path: impl AsRef<OsStr> + AsRef<Path>) -> Result<(), PaletteError> {
        let path: &Path = path.as_ref();
        std::fs::write(path, self.marshal())?;

        Ok(())
    }
}
