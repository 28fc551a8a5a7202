use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{OscSendError, Result};

/// Optional defaults read from a JSON file. Command-line flags win.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub verbose: Option<bool>,
    pub color: Option<bool>,
}

impl Config {
    /// No path means an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = fs::read_to_string(path).map_err(|source| OscSendError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| OscSendError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
