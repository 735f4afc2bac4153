//! `coll` CLI: merge, sort, flatten, pick, omit and query JSON/YAML documents.
//!
//! Documents are read as JSON, or as YAML when the file name ends in `.yaml`
//! or `.yml`. An omitted input (or `-`) reads stdin. Results are written as
//! pretty-printed JSON with mapping keys in alphabetical order.
//!
//! ## Usage
//!
//! ```sh
//! # Merge config.json over defaults.yaml (earlier documents win)
//! coll merge config.json defaults.yaml
//!
//! # Sort an array of objects by a key
//! echo '[{"a":"foo","b":1},{"a":"bar","b":8}]' | coll sort --key b
//!
//! # Flatten one level of nesting
//! echo '[[1,2],[[3]]]' | coll flatten --depth 1
//!
//! # Keep or drop top-level keys
//! coll pick foo baz -i data.json
//! coll omit foo baz -i data.json
//!
//! # Path query
//! coll query '.values..a' -i config.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use coll_core::{Mapping, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "coll",
    version,
    about = "Collection operations over JSON/YAML documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine diagnostics to stderr (honours RUST_LOG, defaults to info)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all logging, even with --verbose
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deep-merge documents; keys in earlier documents take precedence
    Merge {
        /// Highest-precedence document (must be an object or array)
        overrides: String,
        /// Documents supplying defaults, highest precedence first
        sources: Vec<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Sort an array, optionally by an object key
    Sort {
        /// Key to sort objects by
        #[arg(short, long)]
        key: Option<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Flatten nested arrays
    Flatten {
        /// Levels of nesting to remove; negative flattens completely
        #[arg(short, long, default_value_t = coll_core::UNBOUNDED, allow_negative_numbers = true)]
        depth: i64,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Keep only the given top-level keys of an object
    Pick {
        /// Keys to keep
        #[arg(required = true)]
        keys: Vec<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Drop the given top-level keys of an object
    Omit {
        /// Keys to drop
        #[arg(required = true)]
        keys: Vec<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Evaluate a JSONPath-style expression
    Query {
        /// Path expression, e.g. '.values..a' or '$.items[0].name'
        expression: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Logging policy:
///   --quiet   → off
///   --verbose → RUST_LOG if set, otherwise "info"
///   default   → off, so stdout/stderr carry only results and errors
fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Merge {
            overrides,
            sources,
            output,
        } => {
            let dest = read_document(Some(&overrides))?;
            let sources = sources
                .iter()
                .map(|path| read_document(Some(path)))
                .collect::<Result<Vec<_>>>()?;
            tracing::info!(sources = sources.len(), "merging documents");
            let merged = coll_core::merge(dest, &sources)
                .with_context(|| format!("Failed to merge into {}", overrides))?;
            write_value(output.as_deref(), &merged)?;
        }
        Commands::Sort { key, input, output } => {
            let doc = read_document(input.as_deref())?;
            let sorted = coll_core::sort(key.as_deref(), expect_sequence(&doc, "sort")?)
                .context("Failed to sort")?;
            write_value(output.as_deref(), &Value::from(sorted))?;
        }
        Commands::Flatten {
            depth,
            input,
            output,
        } => {
            let doc = read_document(input.as_deref())?;
            let flat = coll_core::flatten(depth, expect_sequence(&doc, "flatten")?);
            write_value(output.as_deref(), &Value::from(flat))?;
        }
        Commands::Pick {
            keys,
            input,
            output,
        } => {
            let doc = read_document(input.as_deref())?;
            let picked = coll_core::pick(&keys, expect_mapping(&doc, "pick")?);
            write_value(output.as_deref(), &Value::from(picked))?;
        }
        Commands::Omit {
            keys,
            input,
            output,
        } => {
            let doc = read_document(input.as_deref())?;
            let rest = coll_core::omit(&keys, expect_mapping(&doc, "omit")?);
            write_value(output.as_deref(), &Value::from(rest))?;
        }
        Commands::Query {
            expression,
            input,
            output,
        } => {
            let doc = read_document(input.as_deref())?;
            let result = coll_core::query(&expression, &doc)
                .with_context(|| format!("Query '{}' failed", expression))?;
            write_value(output.as_deref(), &result)?;
        }
    }

    Ok(())
}

fn expect_sequence<'a>(doc: &'a Value, command: &str) -> Result<&'a [Value]> {
    match doc.as_sequence() {
        Some(items) => Ok(items),
        None => bail!("{} expects an array, got {}", command, doc.kind_name()),
    }
}

fn expect_mapping<'a>(doc: &'a Value, command: &str) -> Result<&'a Mapping> {
    match doc.as_mapping() {
        Some(map) => Ok(map),
        None => bail!("{} expects an object, got {}", command, doc.kind_name()),
    }
}

fn is_yaml(path: &str) -> bool {
    path.ends_with(".yaml") || path.ends_with(".yml")
}

/// Read and decode one document; YAML by file extension, JSON otherwise.
fn read_document(path: Option<&str>) -> Result<Value> {
    let path = path.filter(|p| *p != "-");
    let text = read_input(path)?;
    let source = path.unwrap_or("<stdin>");
    tracing::debug!(source, bytes = text.len(), "read document");

    match path {
        Some(p) if is_yaml(p) => serde_saphyr::from_str::<Value>(&text)
            .with_context(|| format!("Failed to parse YAML: {}", source)),
        _ => Value::from_json(&text).with_context(|| format!("Failed to parse JSON: {}", source)),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_value(path: Option<&str>, value: &Value) -> Result<()> {
    let mut pretty = serde_json::to_string_pretty(value)?;
    pretty.push('\n');
    match path {
        Some(path) => {
            std::fs::write(path, pretty).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", pretty);
        }
    }
    Ok(())
}
