//! YAIF CLI
//!
//! Validates `.yaif` files and generates code from them.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use yaif::{Generator, Schema, Target, ToolConfig};

#[derive(Parser)]
#[command(name = "yaif")]
#[command(about = "YAIF - Yet Another Interface File processor")]
struct Cli {
    /// Tool config file (defaults to yaif.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a schema without generating anything
    Check {
        /// Path to a .yaif file
        file: PathBuf,
        /// Print the parsed model as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Generate code for a target
    Generate {
        /// Path to a .yaif file
        file: PathBuf,
        /// Output target (defaults to the configured target)
        #[arg(short, long, value_enum)]
        target: Option<Target>,
        /// Output file (default: configured output_dir, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ToolConfig::load_from(cli.config.as_deref()).context("loading tool config")?;

    match cli.command {
        Commands::Check { file, json } => {
            let schema = load(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                if config.check.summary {
                    print_summary(&schema);
                }
                println!("✅ Validation passed!");
            }
        }

        Commands::Generate { file, target, output } => {
            let schema = load(&file)?;
            let target = target.unwrap_or(config.generate.target);
            let rendered = target.generator().render(&schema);

            match output.or_else(|| config.output_path(&file, target)) {
                Some(path) => {
                    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                        std::fs::create_dir_all(dir)
                            .with_context(|| format!("creating {}", dir.display()))?;
                    }
                    std::fs::write(&path, &rendered)
                        .with_context(|| format!("writing {}", path.display()))?;
                    print_summary(&schema);
                    println!("Generated {} code -> {}", target, path.display());
                }
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}

fn load(file: &Path) -> anyhow::Result<Schema> {
    tracing::info!(path = %file.display(), "parsing schema");
    let schema = yaif::parse_file(file)?;
    tracing::debug!(
        interfaces = schema.interfaces.len(),
        enums = schema.enums.len(),
        "schema parsed"
    );
    Ok(schema)
}

fn print_summary(schema: &Schema) {
    for line in schema.summary() {
        println!("{line}");
    }
}
