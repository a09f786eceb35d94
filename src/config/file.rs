// src/config/file.rs
//
// Optional TOML config. Missing default file → defaults; missing explicit file → error.

use std::{fs, path::Path};

use crate::error::ConfigError;
use super::{consts::CONFIG_FILE, options::AppOptions};

pub fn load(explicit: Option<&Path>) -> Result<AppOptions, ConfigError> {
    match explicit {
        Some(path) => read(path),
        None => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                read(path)
            } else {
                logd!("Config: no {} found, using defaults", CONFIG_FILE);
                Ok(AppOptions::default())
            }
        }
    }
}

pub fn parse(text: &str) -> Result<AppOptions, ConfigError> {
    Ok(toml::from_str(text)?)
}

fn read(path: &Path) -> Result<AppOptions, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let opts = parse(&text)?;
    logf!("Config: loaded {}", path.display());
    Ok(opts)
}
