mod records;

pub use records::{MissionRecord, MissionStatus};

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::core_api::{CoreError, CoreErrorCode};

/// One playthrough's mission block as it appears in the decoded save
/// document. `active_mission`, `pending_mission_rewards` and
/// `filtered_missions` are pass-through payloads: the engine copies them
/// across an import/export cycle without ever reading their contents, and
/// `extra` catches any sibling fields this crate predates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionPlaythroughRecord {
    #[serde(default)]
    pub play_through_number: i32,
    #[serde(default)]
    pub active_mission: String,
    #[serde(default)]
    pub pending_mission_rewards: Vec<JsonValue>,
    #[serde(default)]
    pub filtered_missions: Vec<String>,
    #[serde(default)]
    pub mission_data: Vec<MissionRecord>,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

/// The decoded save document. Only `mission_playthroughs` is interpreted;
/// everything else rides along in `rest` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    #[serde(default)]
    pub mission_playthroughs: Vec<MissionPlaythroughRecord>,
    #[serde(flatten)]
    pub rest: JsonMap<String, JsonValue>,
}

impl SaveDocument {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse save document: {e}"),
            )
        })
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>, CoreError> {
        let mut out = serde_json::to_vec_pretty(self).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to serialize save document: {e}"),
            )
        })?;
        out.push(b'\n');
        Ok(out)
    }
}
