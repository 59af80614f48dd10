//! rbstubs: generate Ruby API stubs from a documentation registry.
//!
//! Reads an already-extracted registry (JSON) describing classes, modules,
//! constants, methods and mixins, and writes:
//!
//! - one declaration-only `.rb` file per namespace (`Sketchup/Model.rb`,
//!   `_top_level.rb` for the root), meant for editor completion;
//! - `autoload/<name>.rb`, which `require_relative`s every stub written.
//!
//! Usage: `rbstubs -o lib/stubs registry.json` or `rbstubs -o lib/stubs < registry.json`

mod generator;
mod grouping;
mod model;
mod registry;
mod render;
mod signature;
mod writer;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use generator::Generator;
use registry::{MemoryRegistry, Verifier};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rbstubs",
    about = "Generate Ruby API stub files and an autoload manifest from a documentation registry"
)]
struct Cli {
    /// Registry JSON file. If omitted, reads from stdin.
    registry: Option<PathBuf>,

    /// Output directory for stubs
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// File name (without extension) of the manifest under <output>/autoload
    #[arg(long, default_value = generator::DEFAULT_AUTOLOAD_NAME)]
    autoload_name: String,

    /// Include items tagged @private or @api private
    #[arg(long)]
    show_private: bool,

    /// Skip namespaces, constants, methods and mixins whose name matches this
    /// regex. Can be specified multiple times.
    #[arg(long)]
    exclude: Vec<String>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.autoload_name.is_empty() || cli.autoload_name.contains(['/', '\\']) {
        bail!("invalid --autoload-name: {:?}", cli.autoload_name);
    }

    let registry = load_registry(&cli)?;
    let verifier = Verifier::new(cli.show_private, &cli.exclude)?;
    info!(namespaces = registry.len(), "loaded registry");

    let summary = Generator::new(&registry, &verifier, &cli.output)
        .with_autoload_name(&cli.autoload_name)
        .run()?;

    info!(
        stubs = summary.stubs.len(),
        manifest = %summary.manifest.display(),
        "generated stubs"
    );
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_registry(cli: &Cli) -> Result<MemoryRegistry> {
    match &cli.registry {
        Some(path) => MemoryRegistry::load(path),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            MemoryRegistry::from_json(&input)
        }
    }
}
