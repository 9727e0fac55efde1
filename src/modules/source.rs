use std::{convert::Infallible, fmt, path::PathBuf, str::FromStr};

use drs::{Drs, FileId};
use eyre::eyre;
use slp::Slp;

/// Where an SLP comes from: a loose file or an entry of a DRS archive written as `<archive.drs>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlpSource {
    File(PathBuf),
    Archive { path: PathBuf, id: FileId },
}

impl FromStr for SlpSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let archive = s.rsplit_once(':').and_then(|(path, id)| {
            let is_drs = path.to_lowercase().ends_with(".drs");
            let id = id.parse::<u32>().ok()?;

            is_drs.then(|| SlpSource::Archive {
                path: PathBuf::from(path),
                id: FileId(id),
            })
        });

        Ok(archive.unwrap_or_else(|| SlpSource::File(PathBuf::from(s))))
    }
}

impl fmt::Display for SlpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlpSource::File(path) => write!(f, "{}", path.display()),
            SlpSource::Archive { path, id } => write!(f, "{}:{}", path.display(), id),
        }
    }
}

impl SlpSource {
    /// Name used for files derived from this source.
    pub fn stem(&self) -> String {
        match self {
            SlpSource::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| "frame".to_string()),
            SlpSource::Archive { id, .. } => id.to_string(),
        }
    }

    pub fn load(&self) -> eyre::Result<Slp> {
        match self {
            SlpSource::File(path) => Ok(Slp::open_from_file(path)?),
            SlpSource::Archive { path, id } => {
                let drs = Drs::open_from_file(path)?;

                let file = drs
                    .file_by_id(*id)
                    .ok_or_else(|| eyre!("No file with id {id} in {}", path.display()))?;

                log::debug!("Loading SLP {id} ({} bytes) from {}", file.size, path.display());

                Ok(Slp::open_from_bytes(drs.file_data(file)?)?)
            }
        }
    }
}
