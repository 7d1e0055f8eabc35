use std::collections::BTreeSet;

use crate::playthrough::Playthrough;
use crate::save::{MissionPlaythroughRecord, MissionRecord, MissionStatus, SaveDocument};

use super::error::{CoreError, CoreErrorCode};
use super::mission_catalog::MissionCatalog;
use super::types::{
    PlaythroughProgress, PlaythroughSummary, ReconciliationReport, ReportEntry, ReportKind,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Imports the decoded playthrough list wholesale. This is a pure
    /// structural copy: nothing is validated against the catalog, so
    /// unknown mission identifiers import unchanged and surface later as
    /// reconciliation diagnostics.
    pub fn import(
        &self,
        catalog: MissionCatalog,
        playthroughs: &[MissionPlaythroughRecord],
    ) -> Result<Session, CoreError> {
        if playthroughs.len() > Playthrough::COUNT {
            return Err(CoreError::new(
                CoreErrorCode::InvalidPlaythrough,
                format!(
                    "save document carries {} mission playthroughs, at most {} are supported",
                    playthroughs.len(),
                    Playthrough::COUNT
                ),
            ));
        }

        let mut progress = Vec::with_capacity(playthroughs.len());
        for (index, record) in playthroughs.iter().enumerate() {
            let playthrough = Playthrough::from_index(index).ok_or_else(|| {
                CoreError::new(
                    CoreErrorCode::InvalidPlaythrough,
                    format!("no playthrough at index {index}"),
                )
            })?;
            progress.push(PlaythroughProgress {
                playthrough,
                record: record.clone(),
            });
        }

        Ok(Session {
            catalog,
            playthroughs: progress,
        })
    }

    pub fn open_document(
        &self,
        catalog: MissionCatalog,
        document: &SaveDocument,
    ) -> Result<Session, CoreError> {
        self.import(catalog, &document.mission_playthroughs)
    }
}

/// An editing session over one save document's mission progress. The
/// session exclusively owns the imported store; the catalog is read-only
/// for the session's lifetime.
#[derive(Debug)]
pub struct Session {
    catalog: MissionCatalog,
    playthroughs: Vec<PlaythroughProgress>,
}

impl Session {
    pub fn catalog(&self) -> &MissionCatalog {
        &self.catalog
    }

    pub fn playthroughs(&self) -> &[PlaythroughProgress] {
        &self.playthroughs
    }

    pub fn progress(&self, playthrough: Playthrough) -> Option<&PlaythroughProgress> {
        self.playthroughs
            .iter()
            .find(|progress| progress.playthrough == playthrough)
    }

    fn progress_mut(
        &mut self,
        playthrough: Playthrough,
    ) -> Result<&mut PlaythroughProgress, CoreError> {
        self.playthroughs
            .iter_mut()
            .find(|progress| progress.playthrough == playthrough)
            .ok_or_else(|| {
                CoreError::new(
                    CoreErrorCode::PlaythroughNotLoaded,
                    format!("{} is not present in the loaded save", playthrough.title()),
                )
            })
    }

    pub fn add_mission(
        &mut self,
        playthrough: Playthrough,
        record: MissionRecord,
    ) -> Result<(), CoreError> {
        let progress = self.progress_mut(playthrough)?;
        progress.record.mission_data.push(record);
        Ok(())
    }

    /// Removes every record carrying the identifier.
    pub fn remove_mission(
        &mut self,
        playthrough: Playthrough,
        mission: &str,
    ) -> Result<(), CoreError> {
        let progress = self.progress_mut(playthrough)?;
        let before = progress.record.mission_data.len();
        progress
            .record
            .mission_data
            .retain(|record| record.mission != mission);
        if progress.record.mission_data.len() == before {
            return Err(CoreError::new(
                CoreErrorCode::MissionNotFound,
                format!("no record for {mission} in {}", playthrough.title()),
            ));
        }
        Ok(())
    }

    /// Updates every record carrying the identifier, so defensive
    /// duplicates stay mutually consistent.
    pub fn set_mission_status(
        &mut self,
        playthrough: Playthrough,
        mission: &str,
        status: MissionStatus,
    ) -> Result<(), CoreError> {
        let progress = self.progress_mut(playthrough)?;
        let mut updated = 0usize;
        for record in progress
            .record
            .mission_data
            .iter_mut()
            .filter(|record| record.mission == mission)
        {
            record.status = status;
            updated += 1;
        }
        if updated == 0 {
            return Err(CoreError::new(
                CoreErrorCode::MissionNotFound,
                format!("no record for {mission} in {}", playthrough.title()),
            ));
        }
        Ok(())
    }

    /// One output record per loaded playthrough, in tier order, opaque
    /// fields forwarded unchanged. With no intervening edits the result is
    /// field-for-field equal to what `import` consumed.
    pub fn export(&self) -> Vec<MissionPlaythroughRecord> {
        self.playthroughs
            .iter()
            .map(|progress| progress.record.clone())
            .collect()
    }

    /// Replaces the document's playthrough list wholesale (cleared, then
    /// rebuilt); every other document field is left untouched.
    pub fn export_into(&self, document: &mut SaveDocument) {
        document.mission_playthroughs.clear();
        document.mission_playthroughs.extend(self.export());
    }

    pub fn reconcile(&self, playthrough: Playthrough) -> Vec<ReportEntry> {
        reconcile_playthrough(&self.catalog, playthrough, self.progress(playthrough))
    }

    /// Combined report over all tiers in fixed order, missing-then-active
    /// within each tier.
    pub fn reconcile_all(&self) -> ReconciliationReport {
        let mut entries = Vec::new();
        for playthrough in Playthrough::ALL {
            entries.extend(self.reconcile(playthrough));
        }
        ReconciliationReport { entries }
    }

    pub fn summaries(&self) -> Vec<PlaythroughSummary> {
        self.playthroughs
            .iter()
            .map(|progress| PlaythroughSummary {
                playthrough: progress.playthrough,
                title: progress.playthrough.title().to_string(),
                recorded: progress.missions().len(),
                complete: progress
                    .missions()
                    .iter()
                    .filter(|record| record.status.is_complete())
                    .count(),
                catalog_total: self.catalog.len(),
            })
            .collect()
    }
}

/// Read-only comparison of the catalog against one playthrough's progress.
/// An absent playthrough yields an empty report; absence is not an error.
pub fn reconcile_playthrough(
    catalog: &MissionCatalog,
    playthrough: Playthrough,
    progress: Option<&PlaythroughProgress>,
) -> Vec<ReportEntry> {
    let Some(progress) = progress else {
        return Vec::new();
    };

    let missions = progress.missions();
    let mut entries = Vec::new();

    for definition in catalog.all_missions() {
        if missions
            .iter()
            .any(|record| record.mission == definition.id)
        {
            continue;
        }
        entries.push(ReportEntry {
            playthrough,
            kind: ReportKind::MissingFromProgress,
            mission: definition.id.clone(),
            name: Some(definition.name.clone()),
        });
    }

    // At most one line per identifier: the first non-complete record wins.
    // Identifiers the catalog does not know keep name = None and fall back
    // to the raw identifier for display.
    let mut reported = BTreeSet::new();
    for record in missions {
        if record.status.is_complete() {
            continue;
        }
        if !reported.insert(record.mission.as_str()) {
            continue;
        }
        entries.push(ReportEntry {
            playthrough,
            kind: ReportKind::IncompleteInProgress,
            mission: record.mission.clone(),
            name: catalog.name_of(&record.mission).map(str::to_string),
        });
    }

    entries
}
