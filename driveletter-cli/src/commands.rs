// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Write as _;

use anyhow::{Context, Result};
use driveletter_contracts::{PrivilegeProbe, VolumeDirectory, VolumeLetterMutator};
use driveletter_core::{RestoreHooks, RestoreOptions, Restorer};
use driveletter_types::{Mapping, RestoreReport, Volume};
use tracing::info;

const EXPORT_HEADER: &str = "\
# Drive letter mapping exported by driveletter.
# Restore it with: driveletter restore --mapping <this file>

";

/// Export the live assignments, rendered as a mapping file or as JSON pairs.
pub fn export(
    probe: &dyn PrivilegeProbe,
    directory: &dyn VolumeDirectory,
    json: bool,
) -> Result<String> {
    let mapping = driveletter_core::export(probe, directory)?;

    if json {
        let mut rendered = serde_json::to_string_pretty(mapping.entries())?;
        rendered.push('\n');
        return Ok(rendered);
    }

    let body = mapping.to_toml_string().context("render mapping")?;
    Ok(format!("{EXPORT_HEADER}{body}"))
}

/// Run the restorer. Per-entry problems end up in the report, so only
/// privilege and early enumeration failures come back as errors.
pub fn restore(
    probe: &dyn PrivilegeProbe,
    directory: &dyn VolumeDirectory,
    mutator: &dyn VolumeLetterMutator,
    mapping: &Mapping,
    options: RestoreOptions,
    hooks: &mut dyn RestoreHooks,
) -> Result<RestoreReport> {
    if options.dry_run && options.confirm_each {
        info!("Dry run: nothing will be executed, so nothing is confirmed");
    }

    let report = Restorer::new(directory, mutator, options).run(probe, mapping, hooks)?;
    Ok(report)
}

/// Closing output of a restore run: the summary line, or the full report as JSON.
pub fn render_report(report: &RestoreReport, json: bool) -> Result<String> {
    if json {
        let mut rendered = serde_json::to_string_pretty(report)?;
        rendered.push('\n');
        return Ok(rendered);
    }

    let mut rendered = String::new();
    if report.dry_run {
        rendered.push_str("dry run, no changes made\n");
    }
    writeln!(rendered, "{}", report.summary())?;
    Ok(rendered)
}

pub fn list(directory: &dyn VolumeDirectory, json: bool) -> Result<String> {
    let volumes = directory.list_volumes().context("enumerate volumes")?;

    if json {
        let mut rendered = serde_json::to_string_pretty(&volumes)?;
        rendered.push('\n');
        return Ok(rendered);
    }

    render_table(&volumes)
}

fn render_table(volumes: &[Volume]) -> Result<String> {
    let mut table = String::new();
    writeln!(table, "{:>4} {:>4} {:<6} ID", "DISK", "PART", "LETTER")?;
    for volume in volumes {
        let letter = volume
            .current_letter
            .map(|letter| format!("{letter}:"))
            .unwrap_or_else(|| "-".to_string());
        let id = volume
            .durable_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            table,
            "{:>4} {:>4} {:<6} {}",
            volume.disk_index, volume.partition_index, letter, id
        )?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use driveletter_core::AutoApprove;
    use driveletter_testing::FakeMachine;
    use driveletter_types::{DriveLetter, EntryOutcome, MappingEntry};

    use super::*;

    const ID_SYSTEM: &str = "5b1d7e0a-4c2f-4e61-9a3b-7f0e2d1c8a44";
    const ID_DATA: &str = "6f1e1c2a-93b4-4c55-9b0e-0d9f3a6b7c11";

    fn machine() -> FakeMachine {
        FakeMachine::new(vec![
            Volume {
                durable_id: Some(ID_SYSTEM.parse().unwrap()),
                current_letter: Some(DriveLetter::new('C').unwrap()),
                disk_index: 0,
                partition_index: 3,
            },
            Volume {
                durable_id: Some(ID_DATA.parse().unwrap()),
                current_letter: Some(DriveLetter::new('F').unwrap()),
                disk_index: 1,
                partition_index: 1,
            },
            Volume {
                durable_id: None,
                current_letter: None,
                disk_index: 0,
                partition_index: 1,
            },
        ])
    }

    #[test]
    fn exported_text_restores_cleanly() {
        let machine = machine();
        let text = export(&machine, &machine, false).unwrap();
        assert!(text.starts_with("# Drive letter mapping"));

        let mapping = Mapping::from_toml_str(&text).unwrap();
        assert_eq!(mapping.len(), 2);

        let report = restore(
            &machine,
            &machine,
            &machine,
            &mapping,
            RestoreOptions::default(),
            &mut AutoApprove,
        )
        .unwrap();
        assert!(
            report
                .entries
                .iter()
                .all(|entry| entry.outcome == EntryOutcome::AlreadyCorrect)
        );
        assert!(machine.mutations().is_empty());
    }

    #[test]
    fn export_json_lists_pairs() {
        let machine = machine();
        let json = export(&machine, &machine, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["letter"], "C");
        assert_eq!(value[1]["id"], ID_DATA);
    }

    #[test]
    fn export_refuses_without_elevation() {
        let machine = machine();
        machine.set_elevated(false);
        let error = export(&machine, &machine, false).unwrap_err();
        assert!(format!("{error:#}").contains("privilege"));
    }

    #[test]
    fn dry_run_report_renders_summary() {
        let machine = machine();
        let mapping: Mapping = [MappingEntry {
            letter: DriveLetter::new('E').unwrap(),
            id: ID_DATA.parse().unwrap(),
        }]
        .into_iter()
        .collect();
        let options = RestoreOptions {
            dry_run: true,
            confirm_each: true,
        };

        let report =
            restore(&machine, &machine, &machine, &mapping, options, &mut AutoApprove).unwrap();
        assert!(machine.mutations().is_empty());

        let text = render_report(&report, false).unwrap();
        assert!(text.starts_with("dry run"));
        assert!(text.contains("assigned=1"));

        let json = render_report(&report, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dry_run"], true);
    }

    #[test]
    fn table_marks_missing_fields() {
        let table = list(&machine(), false).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("DISK"));
        assert!(lines[1].contains("C:"));
        assert!(lines[3].ends_with("-      -"));
    }
}
