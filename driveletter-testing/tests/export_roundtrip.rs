// SPDX-License-Identifier: GPL-3.0-only

mod common;

use driveletter_core::{AutoApprove, RestoreOptions, Restorer, RunError, export};
use driveletter_testing::lab;
use driveletter_types::{EntryOutcome, Mapping};

#[test]
fn export_keeps_lettered_volumes_with_identifiers() {
    let machine = lab::load_by_name("workstation").unwrap().machine();

    let mapping = export(&machine, &machine).unwrap();

    let pairs: Vec<String> = mapping
        .iter()
        .map(|entry| format!("{}={}", entry.letter, entry.id))
        .collect();
    assert_eq!(
        pairs,
        vec![
            "C=5b1d7e0a-4c2f-4e61-9a3b-7f0e2d1c8a44",
            "D=6f1e1c2a-93b4-4c55-9b0e-0d9f3a6b7c11",
            "E=0c3a5b8e-1d2f-4a6b-8c9d-112233445566",
        ]
    );
    assert!(machine.mutations().is_empty());
}

#[test]
fn export_is_idempotent() {
    let machine = lab::load_by_name("workstation").unwrap().machine();

    let first = export(&machine, &machine).unwrap().to_toml_string().unwrap();
    let second = export(&machine, &machine).unwrap().to_toml_string().unwrap();

    assert_eq!(first, second);
}

#[test]
fn exported_text_restores_as_already_correct() {
    let machine = lab::load_by_name("workstation").unwrap().machine();
    let text = export(&machine, &machine).unwrap().to_toml_string().unwrap();
    let mapping = Mapping::from_toml_str(&text).unwrap();

    let report = Restorer::new(&machine, &machine, RestoreOptions::default())
        .run(&machine, &mapping, &mut AutoApprove)
        .unwrap();

    assert_eq!(report.entries.len(), 3);
    assert!(
        report
            .entries
            .iter()
            .all(|entry| entry.outcome == EntryOutcome::AlreadyCorrect)
    );
    assert!(machine.mutations().is_empty());
}

#[test]
fn exported_mapping_repairs_reenumerated_machine() {
    let source = lab::load_by_name("workstation").unwrap().machine();
    let mapping = export(&source, &source).unwrap();

    let target = lab::load_by_name("reenumerated").unwrap().machine();
    let report = Restorer::new(&target, &target, RestoreOptions::default())
        .run(&target, &mapping, &mut AutoApprove)
        .unwrap();

    let outcomes: Vec<&EntryOutcome> = report.entries.iter().map(|entry| &entry.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            &EntryOutcome::AlreadyCorrect,
            &EntryOutcome::Assigned,
            &EntryOutcome::Assigned,
        ]
    );

    let after = export(&target, &target).unwrap();
    assert_eq!(after, mapping);
}

#[test]
fn export_requires_elevation() {
    let machine = lab::load_by_name("unprivileged").unwrap().machine();

    let error = export(&machine, &machine).unwrap_err();

    assert!(matches!(error, RunError::Permission(_)));
    assert_eq!(machine.listing_count(), 0);
}
