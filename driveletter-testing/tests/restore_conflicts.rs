// SPDX-License-Identifier: GPL-3.0-only

mod common;

use common::*;
use driveletter_core::{AutoApprove, RestoreOptions, Restorer};
use driveletter_testing::{FakeMachine, MachineCall};
use driveletter_types::{
    ActionStatus, EntryOutcome, LetterAction, Mapping, MappingEntry, RestoreReport,
};

fn e_to_v1() -> Mapping {
    Mapping::new(vec![MappingEntry::new(letter('E'), id(ID_V1))])
}

fn planned(report: &RestoreReport) -> Vec<LetterAction> {
    report
        .actions()
        .map(|record| record.action.clone())
        .collect()
}

#[test]
fn conflicting_holder_is_evicted_before_assignment() {
    let machine = swap_machine();

    let report = Restorer::new(&machine, &machine, RestoreOptions::default())
        .run(&machine, &e_to_v1(), &mut AutoApprove)
        .unwrap();

    assert_eq!(report.entries[0].outcome, EntryOutcome::Assigned);
    assert_eq!(
        machine.mutations(),
        vec![
            MachineCall::UnassignLetter {
                disk: 1,
                partition: 2,
                letter: letter('E'),
            },
            MachineCall::AssignLetter {
                disk: 1,
                partition: 1,
                letter: letter('E'),
            },
        ]
    );
    assert_eq!(machine.letter_of(&id(ID_V1)), Some(letter('E')));
    assert_eq!(machine.letter_of(&id(ID_V2)), None);
}

#[test]
fn dry_run_reports_the_same_plan_without_changes() {
    let live = swap_machine();
    let live_report = Restorer::new(&live, &live, RestoreOptions::default())
        .run(&live, &e_to_v1(), &mut AutoApprove)
        .unwrap();

    let preview = swap_machine();
    let options = RestoreOptions {
        dry_run: true,
        confirm_each: false,
    };
    let preview_report = Restorer::new(&preview, &preview, options)
        .run(&preview, &e_to_v1(), &mut AutoApprove)
        .unwrap();

    assert_eq!(planned(&preview_report), planned(&live_report));
    assert!(
        preview_report
            .actions()
            .all(|record| record.status == ActionStatus::Previewed)
    );
    assert!(preview.mutations().is_empty());
    assert_eq!(preview.letter_of(&id(ID_V1)), Some(letter('F')));
    assert_eq!(preview.letter_of(&id(ID_V2)), Some(letter('E')));
}

#[test]
fn dry_run_plan_accounts_for_earlier_entries() {
    let mapping = Mapping::new(vec![
        MappingEntry::new(letter('E'), id(ID_V1)),
        MappingEntry::new(letter('F'), id(ID_V2)),
    ]);

    let live = swap_machine();
    let live_report = Restorer::new(&live, &live, RestoreOptions::default())
        .restore(&mapping, &mut AutoApprove)
        .unwrap();

    let preview = swap_machine();
    let options = RestoreOptions {
        dry_run: true,
        confirm_each: false,
    };
    let preview_report = Restorer::new(&preview, &preview, options)
        .restore(&mapping, &mut AutoApprove)
        .unwrap();

    // F: was freed by the first entry, so the second needs no eviction.
    assert_eq!(live_report.entries[1].conflict, None);
    assert_eq!(planned(&preview_report), planned(&live_report));
}

#[test]
fn unknown_identifier_is_reported_and_run_continues() {
    let machine = swap_machine();
    let mapping = Mapping::new(vec![
        MappingEntry::new(letter('G'), id(ID_MISSING)),
        MappingEntry::new(letter('E'), id(ID_V1)),
    ]);
    let mut hooks = Scripted::default();

    let report = Restorer::new(&machine, &machine, RestoreOptions::default())
        .run(&machine, &mapping, &mut hooks)
        .unwrap();

    assert_eq!(report.entries[0].outcome, EntryOutcome::NotFound);
    assert!(report.entries[0].actions.is_empty());
    assert_eq!(report.entries[1].outcome, EntryOutcome::Assigned);
    assert!(hooks.lines[0].starts_with("WARN G:"), "{}", hooks.lines[0]);
    assert!(hooks.lines[0].contains(ID_MISSING));
}

#[test]
fn not_found_alone_changes_nothing() {
    let machine = swap_machine();
    let before = machine.volumes();
    let mapping = Mapping::new(vec![MappingEntry::new(letter('E'), id(ID_MISSING))]);

    let report = Restorer::new(&machine, &machine, RestoreOptions::default())
        .run(&machine, &mapping, &mut AutoApprove)
        .unwrap();

    assert_eq!(report.summary().not_found, 1);
    assert!(!report.has_failures());
    assert_eq!(machine.volumes(), before);
}

#[test]
fn second_entry_for_same_letter_sees_first_change() {
    let machine = FakeMachine::new(vec![
        volume(Some('D'), Some(ID_V1), 0, 1),
        volume(Some('E'), Some(ID_V2), 0, 2),
        volume(Some('G'), Some(ID_V3), 0, 3),
    ]);
    let mapping = Mapping::new(vec![
        MappingEntry::new(letter('G'), id(ID_V1)),
        MappingEntry::new(letter('G'), id(ID_V2)),
    ]);

    let report = Restorer::new(&machine, &machine, RestoreOptions::default())
        .run(&machine, &mapping, &mut AutoApprove)
        .unwrap();

    let first = &report.entries[0];
    let second = &report.entries[1];
    assert_eq!(first.conflict.as_ref().and_then(|v| v.durable_id), Some(id(ID_V3)));
    assert_eq!(second.conflict.as_ref().and_then(|v| v.durable_id), Some(id(ID_V1)));
    assert_eq!(second.outcome, EntryOutcome::Assigned);

    assert_eq!(machine.letter_of(&id(ID_V1)), None);
    assert_eq!(machine.letter_of(&id(ID_V2)), Some(letter('G')));
    assert_eq!(machine.letter_of(&id(ID_V3)), None);
    assert_eq!(machine.listing_count(), 2);
}

#[test]
fn reported_target_reflects_state_before_actions() {
    let machine = swap_machine();

    let report = Restorer::new(&machine, &machine, RestoreOptions::default())
        .restore(&e_to_v1(), &mut AutoApprove)
        .unwrap();

    let entry = &report.entries[0];
    assert_eq!(
        entry.target.as_ref().and_then(|v| v.current_letter),
        Some(letter('F'))
    );
    assert_eq!(
        entry.conflict.as_ref().and_then(|v| v.current_letter),
        Some(letter('E'))
    );
}
