// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use driveletter_core::{AutoApprove, RestoreOptions, Restorer};
use driveletter_testing::errors::TestingError;
use driveletter_testing::lab;
use driveletter_types::Mapping;

#[derive(Debug, Parser)]
#[command(name = "lab")]
#[command(about = "Run driveletter export and restore against in-memory volume labs")]
struct LabCli {
    #[command(subcommand)]
    command: LabCommand,
}

#[derive(Debug, Subcommand)]
enum LabCommand {
    /// Print the lab's volume table
    Show {
        lab_name: String,
        #[arg(long)]
        json: bool,
    },
    /// Export the lab's current letters as a mapping
    Export { lab_name: String },
    /// Restore a mapping file onto a fresh copy of the lab
    Restore {
        lab_name: String,
        #[arg(long)]
        mapping: PathBuf,
        #[arg(long)]
        dry_run: bool,
        /// Also print the machine call ledger as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = LabCli::parse();
    match cli.command {
        LabCommand::Show { lab_name, json } => {
            let lab = lab::load_by_name(&lab_name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&lab.volumes())?);
                return Ok(());
            }
            println!("DISK PART LETTER ID");
            for volume in lab.volumes() {
                println!(
                    "{:>4} {:>4} {:<6} {}",
                    volume.disk_index,
                    volume.partition_index,
                    volume
                        .current_letter
                        .map(|letter| format!("{letter}:"))
                        .unwrap_or_else(|| "-".to_string()),
                    volume
                        .durable_id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            Ok(())
        }
        LabCommand::Export { lab_name } => {
            let machine = lab::load_by_name(&lab_name)?.machine();
            let mapping = driveletter_core::export(&machine, &machine)?;
            print!("{}", mapping.to_toml_string()?);
            Ok(())
        }
        LabCommand::Restore {
            lab_name,
            mapping,
            dry_run,
            json,
        } => {
            let machine = lab::load_by_name(&lab_name)?.machine();
            let raw = fs::read_to_string(&mapping).map_err(|error| TestingError::MappingIo {
                path: mapping.clone(),
                reason: error.to_string(),
            })?;
            let parsed = Mapping::from_toml_str(&raw)
                .with_context(|| format!("parse mapping {}", mapping.display()))?;

            let options = RestoreOptions {
                dry_run,
                confirm_each: false,
            };
            let report = Restorer::new(&machine, &machine, options).run(
                &machine,
                &parsed,
                &mut AutoApprove,
            )?;

            for entry in &report.entries {
                println!("{}", entry.status_line());
            }
            println!("{}", report.summary());

            if json {
                println!("{}", serde_json::to_string_pretty(&machine.calls())?);
            }
            Ok(())
        }
    }
}
