use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::{Map as JsonMap, Value as JsonValue};
use willow_core::core_api::{Engine, MissionCatalog, ReconciliationReport, Session};
use willow_core::playthrough::Playthrough;
use willow_core::save::{MissionRecord, MissionStatus, SaveDocument};
use willow_render::{
    JsonStyle, render_report_json, render_report_text, render_summary_json, render_summary_text,
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Decoded save document (JSON).
    #[arg(value_name = "SAVE.json")]
    path: PathBuf,
    /// Mission catalog, plain or gzip-compressed JSON. Without it the
    /// report cannot flag catalog missions absent from the save.
    #[arg(long, value_name = "MISSIONS.json[.gz]")]
    catalog: Option<PathBuf>,
    /// Restrict the report to one playthrough; edits always require it.
    #[arg(
        long,
        value_name = "0|1|2|nvhm|tvhm|uvhm",
        value_parser = parse_playthrough
    )]
    playthrough: Option<Playthrough>,
    #[arg(long)]
    report: bool,
    #[arg(long)]
    summary: bool,
    #[arg(long)]
    json: bool,
    /// Also write the report lines to this file.
    #[arg(long = "report-file", value_name = "PATH")]
    report_file: Option<PathBuf>,
    /// Set a mission record's status, e.g. GD_Episode01.M_Ep1_Champion=Complete.
    #[arg(long = "set-status", value_name = "MISSION=STATUS")]
    set_status: Vec<String>,
    /// Append a mission record, optionally with a status (default NotStarted).
    #[arg(long = "add-mission", value_name = "MISSION[=STATUS]")]
    add_mission: Vec<String>,
    /// Remove every record for a mission identifier.
    #[arg(long = "remove-mission", value_name = "MISSION")]
    remove_mission: Vec<String>,
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_playthrough(value: &str) -> Result<Playthrough, String> {
    match value.to_ascii_lowercase().as_str() {
        "0" | "normal" | "nvhm" => Ok(Playthrough::Normal),
        "1" | "tvhm" => Ok(Playthrough::Tvhm),
        "2" | "uvhm" => Ok(Playthrough::Uvhm),
        other => Err(format!(
            "unknown playthrough {other:?}, expected 0|1|2|normal|nvhm|tvhm|uvhm"
        )),
    }
}

fn parse_status(value: &str) -> Result<MissionStatus, String> {
    if let Ok(raw) = value.parse::<i32>() {
        return Ok(MissionStatus::from_raw(raw));
    }
    match value.to_ascii_lowercase().as_str() {
        "notstarted" => Ok(MissionStatus::NotStarted),
        "active" => Ok(MissionStatus::Active),
        "requiredobjectivescomplete" => Ok(MissionStatus::RequiredObjectivesComplete),
        "readytoturnin" => Ok(MissionStatus::ReadyToTurnIn),
        "complete" => Ok(MissionStatus::Complete),
        "failed" => Ok(MissionStatus::Failed),
        other => Err(format!("unknown mission status {other:?}")),
    }
}

fn split_mission_status(value: &str) -> Result<(&str, MissionStatus), String> {
    let (mission, status) = value
        .split_once('=')
        .ok_or_else(|| format!("expected MISSION=STATUS, got {value:?}"))?;
    if mission.is_empty() {
        return Err(format!("expected MISSION=STATUS, got {value:?}"));
    }
    Ok((mission, parse_status(status)?))
}

fn selected_report(session: &Session, playthrough: Option<Playthrough>) -> ReconciliationReport {
    match playthrough {
        Some(playthrough) => ReconciliationReport {
            entries: session.reconcile(playthrough),
        },
        None => session.reconcile_all(),
    }
}

fn main() {
    let cli = Cli::parse();

    let has_edits =
        !cli.set_status.is_empty() || !cli.add_mission.is_empty() || !cli.remove_mission.is_empty();
    if has_edits && cli.output.is_none() {
        eprintln!("--set-status/--add-mission/--remove-mission require --output <PATH>");
        process::exit(2);
    }
    if has_edits && cli.playthrough.is_none() {
        eprintln!("--set-status/--add-mission/--remove-mission require --playthrough");
        process::exit(2);
    }
    if !has_edits && cli.output.is_some() {
        eprintln!("--output requires at least one edit flag");
        process::exit(2);
    }

    let bytes = fs::read(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.path.display());
        process::exit(1);
    });
    let mut document = SaveDocument::from_json_slice(&bytes).unwrap_or_else(|e| {
        eprintln!("Error parsing save document {}: {e}", cli.path.display());
        process::exit(1);
    });

    let catalog = match cli.catalog.as_ref() {
        Some(path) => MissionCatalog::load_from_path(path).unwrap_or_else(|e| {
            eprintln!("Error loading mission catalog {}: {e}", path.display());
            process::exit(1);
        }),
        None => MissionCatalog::empty(),
    };

    let engine = Engine::new();
    let mut session = engine.open_document(catalog, &document).unwrap_or_else(|e| {
        eprintln!("Error importing mission playthroughs: {e}");
        process::exit(1);
    });

    let mut report = selected_report(&session, cli.playthrough);

    if has_edits {
        let playthrough = cli.playthrough.expect("checked above");

        for edit in &cli.set_status {
            let (mission, status) = split_mission_status(edit).unwrap_or_else(|e| {
                eprintln!("Error parsing --set-status: {e}");
                process::exit(2);
            });
            session
                .set_mission_status(playthrough, mission, status)
                .unwrap_or_else(|e| {
                    eprintln!("Error applying status edit: {e}");
                    process::exit(1);
                });
        }
        for added in &cli.add_mission {
            let (mission, status) = match added.split_once('=') {
                Some(_) => split_mission_status(added).unwrap_or_else(|e| {
                    eprintln!("Error parsing --add-mission: {e}");
                    process::exit(2);
                }),
                None => (added.as_str(), MissionStatus::NotStarted),
            };
            session
                .add_mission(playthrough, MissionRecord::new(mission, status))
                .unwrap_or_else(|e| {
                    eprintln!("Error adding mission record: {e}");
                    process::exit(1);
                });
        }
        for mission in &cli.remove_mission {
            session
                .remove_mission(playthrough, mission)
                .unwrap_or_else(|e| {
                    eprintln!("Error removing mission record: {e}");
                    process::exit(1);
                });
        }

        session.export_into(&mut document);
        let out_path = cli.output.as_ref().expect("checked above");
        let emitted = document.to_json_vec().unwrap_or_else(|e| {
            eprintln!("Error serializing edited save document: {e}");
            process::exit(1);
        });
        fs::write(out_path, emitted).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {e}", out_path.display());
            process::exit(1);
        });

        report = selected_report(&session, cli.playthrough);
    }

    if let Some(path) = cli.report_file.as_ref() {
        let mut file = File::create(path).unwrap_or_else(|e| {
            eprintln!("Error creating {}: {e}", path.display());
            process::exit(1);
        });
        report.write_to(&mut file).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        });
    }

    let want_report = cli.report || !cli.summary;

    if cli.json {
        let value = if cli.summary && want_report {
            let mut out = JsonMap::new();
            out.insert(
                "summary".to_string(),
                render_summary_json(&session, JsonStyle::CanonicalV1),
            );
            out.insert(
                "report".to_string(),
                render_report_json(&report, JsonStyle::CanonicalV1),
            );
            JsonValue::Object(out)
        } else if cli.summary {
            render_summary_json(&session, JsonStyle::CanonicalV1)
        } else {
            render_report_json(&report, JsonStyle::CanonicalV1)
        };
        let rendered = serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    if cli.summary {
        print!("{}", render_summary_text(&session));
    }
    if want_report {
        print!("{}", render_report_text(&report));
    }
    if has_edits {
        let out_path = cli.output.as_ref().expect("checked above");
        println!("Wrote edited save to {}", out_path.display());
    }
}
