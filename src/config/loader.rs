use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::core::GateConfig;

pub const CONFIG_FILE_NAME: &str = ".coverage-gate.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<GateConfig, String> {
    let config = toml::from_str::<GateConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    config
        .validate()
        .map_err(|e| format!("Invalid {}: {}", CONFIG_FILE_NAME, e))?;

    Ok(config)
}

/// Try loading config from a specific path, falling back to `None` on any problem
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<GateConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

pub(crate) fn directory_ancestors(
    start: PathBuf,
    max_depth: usize,
) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.coverage-gate.toml`.
pub fn load_config(start: &Path) -> GateConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            GateConfig::default()
        })
}

/// Load a config file named on the command line. Unlike the implicit
/// lookup, every failure here is an error.
pub fn load_explicit_config(path: &Path) -> Result<GateConfig> {
    let contents = read_config_file(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse_and_validate_config(&contents).map_err(anyhow::Error::msg)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}
