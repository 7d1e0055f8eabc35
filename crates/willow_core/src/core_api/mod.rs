mod engine;
mod error;
mod mission_catalog;
mod types;

pub use engine::{Engine, Session, reconcile_playthrough};
pub use error::{CoreError, CoreErrorCode};
pub use mission_catalog::MissionCatalog;
pub use types::{
    MissionDefinition, PlaythroughProgress, PlaythroughSummary, ReconciliationReport, ReportEntry,
    ReportKind,
};
