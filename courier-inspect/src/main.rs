//! Courier payload inspector
//!
//! Decodes a JSON payload into one of the registered entity types and prints
//! its canonical export, which shows how fields were routed, which defaults
//! were installed and which unknown keys were passed through.
//!
//! Usage:
//!   courier-inspect --type MessageEntity --input entity.json
//!   echo '{"id": 1}' | courier-inspect --type User
//!   courier-inspect --list-types

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use courier_model::{StructuredObject, registry};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "courier-inspect")]
#[command(about = "Decode a messaging API payload into a registered type")]
struct Args {
    /// Registered type name to decode into
    #[arg(short = 't', long = "type", required_unless_present = "list_types")]
    type_name: Option<String>,

    /// JSON file to read, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// List registered type names and exit
    #[arg(long)]
    list_types: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    courier_entities::register_all();

    if args.list_types {
        for name in registry::type_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(type_name) = args.type_name.as_deref() else {
        bail!("--type is required unless --list-types is given");
    };
    let schema = registry::lookup(type_name).with_context(|| {
        format!(
            "unknown type {type_name:?}; registered: {}",
            registry::type_names().join(", ")
        )
    })?;

    let raw = read_input(&args.input)?;
    let payload: serde_json::Value =
        serde_json::from_str(&raw).context("Input is not valid JSON")?;
    debug!(type_name = %type_name, bytes = raw.len(), "Payload decoded");

    let mut object = StructuredObject::from_json(schema, payload)
        .with_context(|| format!("Failed to build {type_name}"))?;

    let unknown: Vec<&str> = object
        .values()
        .keys()
        .filter(|key| !object.schema().is_field(key))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        info!(type_name = %type_name, keys = ?unknown, "Passing through unmodeled keys");
    }

    let text = if args.pretty {
        object.as_pretty_text()?
    } else {
        object.as_text()?
    };
    println!("{text}");
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
