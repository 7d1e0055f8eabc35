use std::fmt::Write as _;

use serde_json::{Map as JsonMap, Value as JsonValue};
use willow_core::core_api::{ReconciliationReport, ReportEntry, ReportKind, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    MissionLog,
}

pub fn render_report_text(report: &ReconciliationReport) -> String {
    render_report_text_styled(report, TextStyle::MissionLog)
}

pub fn render_report_text_styled(report: &ReconciliationReport, style: TextStyle) -> String {
    match style {
        TextStyle::MissionLog => {
            let mut out = String::new();
            for entry in &report.entries {
                let _ = writeln!(out, "{entry}");
            }
            out
        }
    }
}

pub fn render_report_json(report: &ReconciliationReport, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Array(
            report
                .entries
                .iter()
                .map(report_entry_json)
                .map(JsonValue::Object)
                .collect(),
        ),
    }
}

pub fn render_summary_text(session: &Session) -> String {
    let mut out = String::new();
    for summary in session.summaries() {
        let _ = writeln!(
            out,
            "{}: {} of {} recorded, {} complete",
            summary.title, summary.recorded, summary.catalog_total, summary.complete
        );
    }
    out
}

pub fn render_summary_json(session: &Session, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Array(
            session
                .summaries()
                .iter()
                .map(|summary| {
                    let mut out = JsonMap::new();
                    out.insert(
                        "playthrough".to_string(),
                        JsonValue::String(summary.playthrough.short_code().to_string()),
                    );
                    out.insert(
                        "title".to_string(),
                        JsonValue::String(summary.title.clone()),
                    );
                    out.insert("recorded".to_string(), JsonValue::from(summary.recorded));
                    out.insert("complete".to_string(), JsonValue::from(summary.complete));
                    out.insert(
                        "catalog_total".to_string(),
                        JsonValue::from(summary.catalog_total),
                    );
                    JsonValue::Object(out)
                })
                .collect(),
        ),
    }
}

fn report_entry_json(entry: &ReportEntry) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    out.insert(
        "playthrough".to_string(),
        JsonValue::String(entry.playthrough.short_code().to_string()),
    );
    out.insert(
        "kind".to_string(),
        JsonValue::String(
            match entry.kind {
                ReportKind::MissingFromProgress => "missing",
                ReportKind::IncompleteInProgress => "active",
            }
            .to_string(),
        ),
    );
    out.insert(
        "mission".to_string(),
        JsonValue::String(entry.mission.clone()),
    );
    out.insert(
        "name".to_string(),
        match &entry.name {
            Some(name) => JsonValue::String(name.clone()),
            None => JsonValue::Null,
        },
    );
    out
}
