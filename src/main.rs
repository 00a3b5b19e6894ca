//! typedef-expander: expand JSDoc typedefs in parser output.
//!
//! Two modes, like the rest of the doc tooling:
//!
//! - **stdin mode**: `jsdoc -X lib/*.js | typedef-expander > doclets.json`
//! - **file mode**: `typedef-expander -s shared/types.json -o out.json doclets/*.json`

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use typedef_expander::{
    expand_typedefs, logging, parse_records, CommandSource, Config, DispatchSource, DocRecord, ExpandOptions,
    Kind, RecordSource,
};

#[derive(Parser)]
#[command(
    name = "typedef-expander",
    about = "Expand JSDoc typedef references into flattened, dotted property lists"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads doclet JSON from stdin.
    files: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// File whose typedefs are added as expansion sources. Repeatable.
    #[arg(short = 's', long = "source-typedefs")]
    source_typedefs: Vec<PathBuf>,

    /// Config file (default: ./typedef-expander.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Parser command for non-JSON inputs, e.g. `jsdoc`
    #[arg(long)]
    parser: Option<String>,

    /// Argument passed to the parser before the file path. Repeatable (default: -X)
    #[arg(long = "parser-arg", allow_hyphen_values = true)]
    parser_args: Vec<String>,

    /// Only emit typedef records
    #[arg(long)]
    typedefs_only: bool,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// CLI flags layered over the config file.
struct Settings {
    options: ExpandOptions,
    source: DispatchSource,
    typedefs_only: bool,
    compact: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;
    let settings = settings(&cli, config.unwrap_or_default());

    let records = if cli.files.is_empty() {
        stdin_records()?
    } else {
        file_records(&cli.files, &settings.source)?
    };

    let mut expanded = expand_typedefs(records, &settings.options, &settings.source)?;
    if settings.typedefs_only {
        expanded.retain(|r| r.kind == Kind::Typedef);
    }

    let json = if settings.compact {
        serde_json::to_string(&expanded)
    } else {
        serde_json::to_string_pretty(&expanded)
    }
    .context("failed to serialize doc records")?;

    write_output(cli.output.as_deref(), &json)
}

fn settings(cli: &Cli, config: Config) -> Settings {
    let mut source_typedefs = config.source_typedefs;
    source_typedefs.extend(cli.source_typedefs.iter().cloned());

    let parser_args = if !cli.parser_args.is_empty() {
        cli.parser_args.clone()
    } else {
        config.parser_args.unwrap_or_else(|| vec!["-X".to_string()])
    };
    let parser = cli
        .parser
        .clone()
        .or(config.parser)
        .map(|program| CommandSource::new(program, parser_args));

    Settings {
        options: ExpandOptions { source_typedefs },
        source: DispatchSource::new(parser),
        typedefs_only: cli.typedefs_only || config.typedefs_only,
        compact: cli.compact || config.compact,
    }
}

/// stdin mode: one JSON doclet array.
fn stdin_records() -> Result<Vec<DocRecord>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(parse_records(&input, "stdin")?)
}

/// file mode: load every input and concatenate the records in file order.
fn file_records(patterns: &[String], source: &DispatchSource) -> Result<Vec<DocRecord>> {
    let input_files = collect_inputs(patterns, source)?;
    if input_files.is_empty() {
        anyhow::bail!("no input files found");
    }

    let mut records = Vec::new();
    for path in &input_files {
        let loaded = source
            .load(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        info!(path = %path.display(), records = loaded.len(), "loaded input");
        records.extend(loaded);
    }
    Ok(records)
}

/// Resolve file arguments to the inputs `source` will load.
///
/// A file is taken as is, a directory contributes the files directly inside
/// it that the source accepts, anything else is a glob pattern.
fn collect_inputs(patterns: &[String], source: &DispatchSource) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        let found = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            source.inputs_in(path)?
        } else {
            glob_files(pattern)?
        };
        if found.is_empty() {
            warn!(pattern = %pattern, "no input files matched");
        }
        files.extend(found);
    }
    Ok(files.into_iter().collect())
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?;
    Ok(paths.filter_map(|r| r.ok()).filter(|p| p.is_file()).collect())
}

fn write_output(output: Option<&Path>, json: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
            }
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json).context("failed to write stdout")
        }
    }
}
