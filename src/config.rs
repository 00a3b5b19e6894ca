//! Expansion options and the optional `typedef-expander.toml` config file.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "typedef-expander.toml";

/// Options threaded into every expansion entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Files whose typedefs are added to the index as extra sources.
    pub source_typedefs: Vec<PathBuf>,
}

impl ExpandOptions {
    pub fn with_sources<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        ExpandOptions {
            source_typedefs: paths.into_iter().map(Into::into).collect(),
        }
    }
}

/// Settings read from a TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source_typedefs: Vec<PathBuf>,
    /// Parser command for non-JSON inputs, e.g. `jsdoc`
    pub parser: Option<String>,
    pub parser_args: Option<Vec<String>>,
    pub typedefs_only: bool,
    pub compact: bool,
}

impl Config {
    /// Read and parse a config file. Relative `source_typedefs` are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text, path)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for src in &mut config.source_typedefs {
            if src.is_relative() {
                *src = base.join(&*src);
            }
        }
        Ok(config)
    }

    /// Parse config text; `path` is only used for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }

    /// Load `explicit` if given, else the default file in `dir` if present.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate).map(Some)
        } else {
            Ok(None)
        }
    }
}
