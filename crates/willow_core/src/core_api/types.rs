use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

use crate::playthrough::Playthrough;
use crate::save::{MissionPlaythroughRecord, MissionRecord};

/// One catalog entry. `id` is unique within a catalog; `number` gives the
/// stable display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissionDefinition {
    pub id: String,
    pub name: String,
    pub number: i32,
}

/// The per-playthrough store entry. The imported record is held verbatim so
/// export can reproduce it field-for-field; only `mission_data` is ever
/// edited through the session.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaythroughProgress {
    pub playthrough: Playthrough,
    pub record: MissionPlaythroughRecord,
}

impl PlaythroughProgress {
    pub fn missions(&self) -> &[MissionRecord] {
        &self.record.mission_data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    MissingFromProgress,
    IncompleteInProgress,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match *self {
            Self::MissingFromProgress => "missing",
            Self::IncompleteInProgress => "active",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportEntry {
    pub playthrough: Playthrough,
    pub kind: ReportKind,
    pub mission: String,
    /// Catalog display name; `None` when the save references an identifier
    /// the catalog does not know.
    pub name: Option<String>,
}

impl ReportEntry {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.mission)
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.playthrough.short_code(),
            self.kind.label(),
            self.label()
        )
    }
}

/// Derived diagnostics, recomputed on every call and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub entries: Vec<ReportEntry>,
}

impl ReconciliationReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Optional sink for callers that want the diagnostics persisted.
    pub fn write_to<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(w, "{entry}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaythroughSummary {
    pub playthrough: Playthrough,
    pub title: String,
    pub recorded: usize,
    pub complete: usize,
    pub catalog_total: usize,
}
