//! Swagger Tree CLI - keeps a Swagger document as a tree of small YAML files
//!
//! `split` decomposes a document into the tree, `join` reassembles it and
//! `compile` exports the full document as a single JSON file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use swagger_store::{DocumentStore, StoreConfig};

/// Swagger Tree - store a Swagger document as a tree of small files
#[derive(Parser, Debug)]
#[command(name = "swagger-tree")]
#[command(version)]
#[command(about = "Split a Swagger document into a file tree and join it back")]
struct Args {
    /// Root directory of the tree (default: ./doc/swagger)
    #[arg(long, global = true, env = "SWAGGER_TREE_ROOT")]
    root: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, default_value = "swagger-tree.json")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decompose a YAML or JSON document into the tree
    Split {
        /// Document to split
        input: PathBuf,

        /// Replace an existing base document
        #[arg(long)]
        overwrite_base: bool,

        /// Only list the files that would be written
        #[arg(long)]
        dry_run: bool,
    },
    /// Reassemble the tree into one YAML document
    Join {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compile a document (or the tree) to a single pretty-printed JSON file
    Compile {
        /// Document to compile; the tree is used when omitted
        input: Option<PathBuf>,
    },
    /// Delete every file of the tree
    Clean,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let mut config = StoreConfig::load(&args.config)?;
    if let Some(root) = args.root {
        config = config.with_root(root);
    }
    info!("Using document tree at {:?}", config.root);

    match args.command {
        Command::Split {
            input,
            overwrite_base,
            dry_run: true,
        } => {
            if overwrite_base {
                info!("--overwrite-base has no effect on a dry run");
            }
            for file in swagger_cli::split_dry_run(&config, &input)? {
                println!("{}", file);
            }
        }
        Command::Split {
            input,
            overwrite_base,
            dry_run: false,
        } => {
            let store = DocumentStore::on_disk(config);
            let report = swagger_cli::split(&store, &input, overwrite_base)?;
            info!(
                "Split {} into {} files ({} kept)",
                input.display(),
                report.written.len(),
                report.skipped.len()
            );
        }
        Command::Join { output } => {
            let store = DocumentStore::on_disk(config);
            let yaml = swagger_cli::join(&store, output.as_deref())?;
            if output.is_none() {
                print!("{}", yaml);
            }
        }
        Command::Compile { input } => {
            let store = DocumentStore::on_disk(config);
            let location = swagger_cli::compile(&store, input.as_deref())?;
            info!("Compiled to {}", location);
        }
        Command::Clean => {
            let store = DocumentStore::on_disk(config);
            let deleted = swagger_cli::clean(&store)?;
            info!("Deleted {} files", deleted);
        }
    }

    Ok(())
}
