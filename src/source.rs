//! Record sources, where doc records come from.
//!
//! The expander never parses comments itself. It either reads doclet JSON
//! that a parser already produced (`jsdoc -X > doclets.json`) or runs that
//! parser as a child process and reads its stdout.

use crate::error::{Error, Result};
use crate::model::DocRecord;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Something that turns a file path into doc records.
pub trait RecordSource {
    fn load(&self, path: &Path) -> Result<Vec<DocRecord>>;
}

/// Parse a JSON array of doclets.
///
/// This is the one place raw parser output is validated. Non-object entries
/// are skipped with a warning; object entries must deserialize cleanly.
pub fn parse_records(text: &str, location: &str) -> Result<Vec<DocRecord>> {
    let parse_err = |source| Error::Parse {
        location: location.to_string(),
        source,
    };

    let entries: Vec<Value> = serde_json::from_str(text).map_err(parse_err)?;
    let mut records = Vec::with_capacity(entries.len());

    for (i, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!(location, index = i, "skipping non-object doclet");
            continue;
        }
        records.push(serde_json::from_value(entry).map_err(parse_err)?);
    }

    debug!(location, count = records.len(), "parsed doc records");
    Ok(records)
}

/// Reads doclet JSON files.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSource;

impl RecordSource for JsonSource {
    fn load(&self, path: &Path) -> Result<Vec<DocRecord>> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_records(&text, &path.display().to_string())
    }
}

/// Runs an external parser (`jsdoc -X <file>`) and reads its stdout.
#[derive(Debug, Clone)]
pub struct CommandSource {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandSource {
            program: program.into(),
            args,
        }
    }
}

impl RecordSource for CommandSource {
    fn load(&self, path: &Path) -> Result<Vec<DocRecord>> {
        let failed = |details: String| Error::Parser {
            program: self.program.clone(),
            path: path.to_path_buf(),
            details,
        };

        debug!(program = %self.program, path = %path.display(), "running parser");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!("{}: {}", output.status, stderr.trim())));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_records(&stdout, &format!("`{}` output for {}", self.program, path.display()))
    }
}

/// File extensions read directly as doclet JSON.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// File extensions handed to the parser command.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts"];

/// Dispatch by file extension: JSON is read directly, anything else goes
/// through the parser command when one is configured.
#[derive(Debug, Default, Clone)]
pub struct DispatchSource {
    pub parser: Option<CommandSource>,
}

impl DispatchSource {
    pub fn new(parser: Option<CommandSource>) -> Self {
        DispatchSource { parser }
    }

    /// Whether a path would be accepted by [`RecordSource::load`].
    pub fn accepts(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if JSON_EXTENSIONS.contains(&ext) => true,
            Some(ext) if SCRIPT_EXTENSIONS.contains(&ext) => self.parser.is_some(),
            _ => false,
        }
    }

    /// Files directly inside `dir` that this source can load, sorted.
    pub fn inputs_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|source| Error::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && self.accepts(p))
            .collect();
        files.sort();
        debug!(dir = %dir.display(), count = files.len(), "scanned input directory");
        Ok(files)
    }
}

impl RecordSource for DispatchSource {
    fn load(&self, path: &Path) -> Result<Vec<DocRecord>> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| JSON_EXTENSIONS.contains(&ext));

        match (&self.parser, is_json) {
            (_, true) => JsonSource.load(path),
            (Some(parser), false) => parser.load(path),
            (None, false) => Err(Error::Unsupported {
                path: PathBuf::from(path),
            }),
        }
    }
}
