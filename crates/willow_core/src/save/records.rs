use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Mission state as stored in the save document. Raw values outside the
/// known range must survive an import/export cycle, so the raw integer is
/// carried in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum MissionStatus {
    NotStarted,
    Active,
    RequiredObjectivesComplete,
    ReadyToTurnIn,
    Complete,
    Failed,
    Unknown(i32),
}

impl MissionStatus {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::NotStarted,
            1 => Self::Active,
            2 => Self::RequiredObjectivesComplete,
            3 => Self::ReadyToTurnIn,
            4 => Self::Complete,
            5 => Self::Failed,
            other => Self::Unknown(other),
        }
    }

    pub fn raw(&self) -> i32 {
        match *self {
            Self::NotStarted => 0,
            Self::Active => 1,
            Self::RequiredObjectivesComplete => 2,
            Self::ReadyToTurnIn => 3,
            Self::Complete => 4,
            Self::Failed => 5,
            Self::Unknown(other) => other,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(*self, Self::Complete)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::NotStarted => "NotStarted",
            Self::Active => "Active",
            Self::RequiredObjectivesComplete => "RequiredObjectivesComplete",
            Self::ReadyToTurnIn => "ReadyToTurnIn",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl From<i32> for MissionStatus {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<MissionStatus> for i32 {
    fn from(status: MissionStatus) -> Self {
        status.raw()
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unknown(v) => write!(f, "Unknown ({})", v),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// One mission's recorded state within a playthrough. Fields this engine
/// does not interpret (objective progress, DLC package ids, ...) land in
/// `extra` and are written back exactly as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub mission: String,
    pub status: MissionStatus,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl MissionRecord {
    pub fn new(mission: impl Into<String>, status: MissionStatus) -> Self {
        Self {
            mission: mission.into(),
            status,
            extra: JsonMap::new(),
        }
    }
}
