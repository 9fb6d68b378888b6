// SPDX-License-Identifier: GPL-3.0-only

//! driveletter - export and restore drive letter assignments
//!
//! `export` captures which letter each volume holds, keyed by the volume's
//! partition GUID. `restore` puts those letters back after disks have been
//! re-enumerated, evicting whichever volume currently sits on a wanted letter.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use driveletter_core::RestoreOptions;
use driveletter_sys::PowerShellVolumes;
use tracing::info;

mod commands;
mod config;
mod logging;
mod prompt;

use config::Config;
use prompt::ConsoleHooks;

#[derive(Debug, Parser)]
#[command(name = "driveletter", version)]
#[command(about = "Export and restore drive letter assignments by volume identifier")]
struct Cli {
    /// Configuration file (defaults to $DRIVELETTER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current letter of every identifiable volume as a mapping
    Export {
        /// Write the mapping to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit the letter/identifier pairs as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reassign letters so every mapped volume gets its letter back
    Restore {
        /// Mapping file (defaults to the configured or built-in mapping)
        #[arg(short, long)]
        mapping: Option<PathBuf>,
        /// Show what would change without changing anything
        #[arg(long)]
        dry_run: bool,
        /// Ask before every letter change
        #[arg(long)]
        confirm: bool,
        /// Print the full report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Show every partition with its letter and identifier
    List {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config, cli.verbose);

    info!("driveletter v{}", env!("CARGO_PKG_VERSION"));

    let volumes = PowerShellVolumes::new().context("locate PowerShell")?;

    match cli.command {
        Command::Export { output, json } => {
            let rendered = commands::export(&volumes, &volumes, json)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("write mapping {}", path.display()))?;
                    info!("Mapping written to {}", path.display());
                }
                None => io::stdout().write_all(rendered.as_bytes())?,
            }
        }
        Command::Restore {
            mapping,
            dry_run,
            confirm,
            json,
        } => {
            let (mapping, source) = config.resolve_mapping(mapping.as_deref())?;
            info!("Using mapping from {} ({} entries)", source, mapping.len());

            let options = RestoreOptions {
                dry_run,
                confirm_each: confirm,
            };
            // Status lines move to stderr when stdout carries JSON.
            let status: Box<dyn Write> = if json {
                Box::new(io::stderr())
            } else {
                Box::new(io::stdout())
            };
            let mut hooks = ConsoleHooks::new(io::stdin().lock(), status);

            let report =
                commands::restore(&volumes, &volumes, &volumes, &mapping, options, &mut hooks)?;
            io::stdout().write_all(commands::render_report(&report, json)?.as_bytes())?;
        }
        Command::List { json } => {
            let rendered = commands::list(&volumes, json)?;
            io::stdout().write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}
