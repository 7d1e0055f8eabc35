use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Deserialize;

use super::error::{CoreError, CoreErrorCode};
use super::types::MissionDefinition;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// The loader's on-disk value shape: a JSON object keyed by mission
/// identifier. Other game-info fields (DLC package, level requirements,
/// ...) are ignored; this catalog does not carry them.
#[derive(Debug, Deserialize)]
struct RawMissionInfo {
    name: String,
    number: i32,
}

/// Immutable, ordered collection of known missions. Loaded once before a
/// session starts; reconciliation treats an empty catalog as a valid
/// degenerate input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionCatalog {
    missions: Vec<MissionDefinition>,
    by_id: BTreeMap<String, usize>,
}

impl MissionCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a catalog from raw definitions: duplicate identifiers keep the
    /// first definition, then entries are ordered by `number` (ties by id).
    pub fn from_definitions(definitions: Vec<MissionDefinition>) -> Self {
        let mut seen = BTreeSet::new();
        let mut missions: Vec<MissionDefinition> = definitions
            .into_iter()
            .filter(|definition| seen.insert(definition.id.clone()))
            .collect();
        missions.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.id.cmp(&b.id)));

        let by_id = missions
            .iter()
            .enumerate()
            .map(|(index, definition)| (definition.id.clone(), index))
            .collect();

        Self { missions, by_id }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CoreError> {
        let bytes = fs::read(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;

        if bytes.starts_with(&GZIP_MAGIC) {
            let mut decoder = GzDecoder::new(bytes.as_slice());
            let mut decoded = Vec::new();
            decoder.read_to_end(&mut decoded).map_err(|e| {
                CoreError::new(
                    CoreErrorCode::Parse,
                    format!("failed to decompress {}: {e}", path.display()),
                )
            })?;
            return Self::from_json_slice(&decoded);
        }

        Self::from_json_slice(&bytes)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, RawMissionInfo> =
            serde_json::from_slice(bytes).map_err(|e| {
                CoreError::new(
                    CoreErrorCode::Parse,
                    format!("failed to parse mission catalog: {e}"),
                )
            })?;

        let definitions = raw
            .into_iter()
            .map(|(id, info)| MissionDefinition {
                id,
                name: info.name,
                number: info.number,
            })
            .collect();

        Ok(Self::from_definitions(definitions))
    }

    /// All definitions in display order (`number` ascending).
    pub fn all_missions(&self) -> &[MissionDefinition] {
        &self.missions
    }

    pub fn get(&self, id: &str) -> Option<&MissionDefinition> {
        self.by_id.get(id).map(|&index| &self.missions[index])
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|definition| definition.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}
