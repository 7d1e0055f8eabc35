use serde_json::json;

use willow_core::core_api::{
    CoreErrorCode, Engine, MissionCatalog, MissionDefinition, ReportKind,
};
use willow_core::playthrough::Playthrough;
use willow_core::save::{MissionPlaythroughRecord, MissionRecord, MissionStatus};

fn definition(id: &str, name: &str, number: i32) -> MissionDefinition {
    MissionDefinition {
        id: id.to_string(),
        name: name.to_string(),
        number,
    }
}

fn small_catalog() -> MissionCatalog {
    MissionCatalog::from_definitions(vec![
        definition("GD_Episode01.M_Ep1_Champion", "My First Gun", 1),
        definition("GD_Episode02.M_Ep2a_Circle", "Blindsided", 2),
        definition("GD_Episode03.M_Ep3_FastTrack", "Cleaning Up the Berg", 3),
    ])
}

fn playthrough_record(number: i32, missions: Vec<MissionRecord>) -> MissionPlaythroughRecord {
    MissionPlaythroughRecord {
        play_through_number: number,
        mission_data: missions,
        ..Default::default()
    }
}

fn opaque_record(number: i32) -> MissionPlaythroughRecord {
    serde_json::from_value(json!({
        "play_through_number": number,
        "active_mission": "GD_Episode02.M_Ep2a_Circle",
        "pending_mission_rewards": [
            { "mission": "GD_Episode01.M_Ep1_Champion", "reward_chosen": 1 }
        ],
        "filtered_missions": ["GD_Episode01.M_Ep1_Champion"],
        "mission_data": [
            { "mission": "GD_Episode01.M_Ep1_Champion", "status": 4, "objectives_progress": [1, 0] }
        ],
        "undocumented_counter": number * 10
    }))
    .expect("opaque fixture should deserialize")
}

#[test]
fn export_reproduces_import_for_zero_to_three_playthroughs() {
    let engine = Engine::new();
    for count in 0..=3 {
        let records: Vec<MissionPlaythroughRecord> = (0..count).map(opaque_record).collect();
        let session = engine
            .import(small_catalog(), &records)
            .expect("import should accept up to three playthroughs");
        assert_eq!(session.export(), records);
    }
}

#[test]
fn import_rejects_more_than_three_playthroughs() {
    let engine = Engine::new();
    let records: Vec<MissionPlaythroughRecord> =
        (0..4).map(|i| playthrough_record(i, Vec::new())).collect();
    let err = engine
        .import(small_catalog(), &records)
        .expect_err("four playthroughs are out of range");
    assert_eq!(err.code, CoreErrorCode::InvalidPlaythrough);
}

#[test]
fn empty_progress_reports_every_catalog_mission_in_order() {
    let engine = Engine::new();
    let session = engine
        .import(small_catalog(), &[playthrough_record(0, Vec::new())])
        .expect("import should succeed");

    let entries = session.reconcile(Playthrough::Normal);
    assert_eq!(entries.len(), small_catalog().len());
    assert!(
        entries
            .iter()
            .all(|entry| entry.kind == ReportKind::MissingFromProgress)
    );
    let names: Vec<&str> = entries.iter().map(|entry| entry.label()).collect();
    assert_eq!(
        names,
        vec!["My First Gun", "Blindsided", "Cleaning Up the Berg"]
    );
}

#[test]
fn active_record_emits_one_incomplete_line_and_complete_emits_none() {
    let engine = Engine::new();
    let session = engine
        .import(
            small_catalog(),
            &[playthrough_record(
                0,
                vec![
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::Active),
                    MissionRecord::new("GD_Episode02.M_Ep2a_Circle", MissionStatus::Complete),
                    MissionRecord::new("GD_Episode03.M_Ep3_FastTrack", MissionStatus::Complete),
                ],
            )],
        )
        .expect("import should succeed");

    let entries = session.reconcile(Playthrough::Normal);
    let incomplete: Vec<_> = entries
        .iter()
        .filter(|entry| entry.kind == ReportKind::IncompleteInProgress)
        .collect();
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].label(), "My First Gun");
}

#[test]
fn reconcile_is_idempotent() {
    let engine = Engine::new();
    let session = engine
        .import(small_catalog(), &[opaque_record(0)])
        .expect("import should succeed");

    assert_eq!(session.reconcile_all(), session.reconcile_all());
}

#[test]
fn unknown_identifier_is_surfaced_without_stopping_the_pass() {
    let engine = Engine::new();
    let session = engine
        .import(
            small_catalog(),
            &[playthrough_record(
                0,
                vec![
                    MissionRecord::new("GD_Hotfix.M_NotInCatalog", MissionStatus::Active),
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::Active),
                ],
            )],
        )
        .expect("import should succeed");

    let entries = session.reconcile(Playthrough::Normal);
    let incomplete: Vec<_> = entries
        .iter()
        .filter(|entry| entry.kind == ReportKind::IncompleteInProgress)
        .collect();
    assert_eq!(incomplete.len(), 2);
    assert_eq!(incomplete[0].name, None);
    assert_eq!(incomplete[0].label(), "GD_Hotfix.M_NotInCatalog");
    assert_eq!(incomplete[1].label(), "My First Gun");
}

#[test]
fn duplicate_records_count_as_present_and_emit_a_single_line() {
    let engine = Engine::new();
    let session = engine
        .import(
            small_catalog(),
            &[playthrough_record(
                0,
                vec![
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::Active),
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::ReadyToTurnIn),
                ],
            )],
        )
        .expect("import should succeed");

    let entries = session.reconcile(Playthrough::Normal);
    assert!(
        !entries
            .iter()
            .any(|entry| entry.kind == ReportKind::MissingFromProgress
                && entry.mission == "GD_Episode01.M_Ep1_Champion")
    );
    let incomplete: Vec<_> = entries
        .iter()
        .filter(|entry| entry.kind == ReportKind::IncompleteInProgress)
        .collect();
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].label(), "My First Gun");
}

#[test]
fn reconciling_an_absent_playthrough_is_empty_not_an_error() {
    let engine = Engine::new();
    let session = engine
        .import(small_catalog(), &[playthrough_record(0, Vec::new())])
        .expect("import should succeed");

    assert!(session.reconcile(Playthrough::Tvhm).is_empty());
    assert!(session.reconcile(Playthrough::Uvhm).is_empty());
}

#[test]
fn empty_catalog_is_a_valid_degenerate_input() {
    let engine = Engine::new();
    let session = engine
        .import(
            MissionCatalog::empty(),
            &[playthrough_record(
                0,
                vec![MissionRecord::new(
                    "GD_Episode01.M_Ep1_Champion",
                    MissionStatus::Active,
                )],
            )],
        )
        .expect("import should succeed");

    let entries = session.reconcile(Playthrough::Normal);
    assert!(
        entries
            .iter()
            .all(|entry| entry.kind != ReportKind::MissingFromProgress)
    );
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label(), "GD_Episode01.M_Ep1_Champion");
}

#[test]
fn combined_report_runs_tiers_in_fixed_order() {
    let engine = Engine::new();
    let session = engine
        .import(
            small_catalog(),
            &[
                playthrough_record(0, Vec::new()),
                playthrough_record(1, Vec::new()),
            ],
        )
        .expect("import should succeed");

    let report = session.reconcile_all();
    assert_eq!(report.len(), small_catalog().len() * 2);
    let playthroughs: Vec<Playthrough> = report
        .entries
        .iter()
        .map(|entry| entry.playthrough)
        .collect();
    let mut sorted = playthroughs.clone();
    sorted.sort();
    assert_eq!(playthroughs, sorted);

    let lines = report.lines();
    assert_eq!(lines[0], "NVHM: missing: My First Gun");
    assert_eq!(lines[3], "TVHM: missing: My First Gun");
}

#[test]
fn edits_in_one_tier_never_leak_into_another() {
    let engine = Engine::new();
    let records = vec![opaque_record(0), opaque_record(1), opaque_record(2)];
    let mut session = engine
        .import(small_catalog(), &records)
        .expect("import should succeed");

    session
        .set_mission_status(
            Playthrough::Tvhm,
            "GD_Episode01.M_Ep1_Champion",
            MissionStatus::Active,
        )
        .expect("edit should apply");
    session
        .add_mission(
            Playthrough::Tvhm,
            MissionRecord::new("GD_Episode02.M_Ep2a_Circle", MissionStatus::Active),
        )
        .expect("add should apply");

    let exported = session.export();
    assert_eq!(exported[0], records[0]);
    assert_eq!(exported[2], records[2]);
    assert_ne!(exported[1], records[1]);
    assert_eq!(exported[1].mission_data.len(), 2);
    assert_eq!(exported[1].mission_data[0].status, MissionStatus::Active);
}

#[test]
fn set_status_updates_every_duplicate_record() {
    let engine = Engine::new();
    let mut session = engine
        .import(
            small_catalog(),
            &[playthrough_record(
                0,
                vec![
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::Active),
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::NotStarted),
                ],
            )],
        )
        .expect("import should succeed");

    session
        .set_mission_status(
            Playthrough::Normal,
            "GD_Episode01.M_Ep1_Champion",
            MissionStatus::Complete,
        )
        .expect("edit should apply");

    let exported = session.export();
    assert!(
        exported[0]
            .mission_data
            .iter()
            .all(|record| record.status == MissionStatus::Complete)
    );
}

#[test]
fn editing_an_unloaded_playthrough_is_an_error() {
    let engine = Engine::new();
    let mut session = engine
        .import(small_catalog(), &[playthrough_record(0, Vec::new())])
        .expect("import should succeed");

    let err = session
        .set_mission_status(
            Playthrough::Uvhm,
            "GD_Episode01.M_Ep1_Champion",
            MissionStatus::Complete,
        )
        .expect_err("UVHM was never imported");
    assert_eq!(err.code, CoreErrorCode::PlaythroughNotLoaded);
}

#[test]
fn editing_an_unknown_record_is_an_error() {
    let engine = Engine::new();
    let mut session = engine
        .import(small_catalog(), &[playthrough_record(0, Vec::new())])
        .expect("import should succeed");

    let err = session
        .remove_mission(Playthrough::Normal, "GD_Episode01.M_Ep1_Champion")
        .expect_err("nothing to remove");
    assert_eq!(err.code, CoreErrorCode::MissionNotFound);
}

#[test]
fn remove_mission_drops_every_matching_record() {
    let engine = Engine::new();
    let mut session = engine
        .import(
            small_catalog(),
            &[playthrough_record(
                0,
                vec![
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::Active),
                    MissionRecord::new("GD_Episode02.M_Ep2a_Circle", MissionStatus::Complete),
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::Failed),
                ],
            )],
        )
        .expect("import should succeed");

    session
        .remove_mission(Playthrough::Normal, "GD_Episode01.M_Ep1_Champion")
        .expect("remove should apply");

    let exported = session.export();
    assert_eq!(exported[0].mission_data.len(), 1);
    assert_eq!(exported[0].mission_data[0].mission, "GD_Episode02.M_Ep2a_Circle");
}

#[test]
fn summaries_count_recorded_and_complete_missions() {
    let engine = Engine::new();
    let session = engine
        .import(
            small_catalog(),
            &[playthrough_record(
                0,
                vec![
                    MissionRecord::new("GD_Episode01.M_Ep1_Champion", MissionStatus::Complete),
                    MissionRecord::new("GD_Episode02.M_Ep2a_Circle", MissionStatus::Active),
                ],
            )],
        )
        .expect("import should succeed");

    let summaries = session.summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].playthrough, Playthrough::Normal);
    assert_eq!(summaries[0].title, "Normal Mode");
    assert_eq!(summaries[0].recorded, 2);
    assert_eq!(summaries[0].complete, 1);
    assert_eq!(summaries[0].catalog_total, 3);
}

// The worked example: catalog [A, B]; tier-0 progress holds A complete.
// Only "missing B" may appear.
#[test]
fn present_and_complete_mission_only_reports_the_absent_one() {
    let catalog = MissionCatalog::from_definitions(vec![
        definition("mission.A", "A", 0),
        definition("mission.B", "B", 1),
    ]);
    let engine = Engine::new();
    let session = engine
        .import(
            catalog,
            &[playthrough_record(
                0,
                vec![MissionRecord::new("mission.A", MissionStatus::Complete)],
            )],
        )
        .expect("import should succeed");

    let entries = session.reconcile(Playthrough::Normal);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, ReportKind::MissingFromProgress);
    assert_eq!(entries[0].label(), "B");
}
