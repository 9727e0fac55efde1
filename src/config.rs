//! Parses config file
use std::{
    env,
    path::{Path, PathBuf},
};

use eyre::eyre;
use serde::Deserialize;

use slp::MAX_PLAYER;

/// Defaults for the command line. Every field can be overridden by a flag.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// JASC palette used when rendering
    pub palette: Option<PathBuf>,
    pub player: Option<u8>,
    /// Folder for rendered frames
    pub output: Option<PathBuf>,
}

pub static CONFIG_FILE_NAME: &str = "config.toml";

/// Parse `config.toml` in the same folder as the binary
///
/// The file is optional so a missing file gives the default config.
pub fn parse_config() -> eyre::Result<Config> {
    let path = match env::current_exe() {
        Ok(path) => path
            .parent()
            .map(|parent| parent.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    parse_config_from_file(path.as_path())
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let buffer = std::fs::read_to_string(path)
        .map_err(|op| eyre!("Cannot read config {}: {op}", path.display()))?;

    let root = path.parent().unwrap_or(Path::new(""));

    parse_config_from_str(&buffer, root)
}

/// Relative paths in the config are relative to `root`, the folder of the config file.
pub fn parse_config_from_str(buffer: &str, root: &Path) -> eyre::Result<Config> {
    let config: Config = toml::from_str(buffer)?;

    if let Some(player) = config.player {
        if player > MAX_PLAYER {
            return Err(eyre!(
                "Player in config must be from 0 to {MAX_PLAYER}, got {player}"
            ));
        }
    }

    let resolve = |path: PathBuf| {
        if path.is_relative() {
            root.join(path)
        } else {
            path
        }
    };

    Ok(Config {
        palette: config.palette.map(resolve),
        player: config.player,
        output: config.output.map(resolve),
    })
}
