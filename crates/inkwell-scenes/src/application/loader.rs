//! Scene row loader.
//!
//! One validation pass over the raw table: every row either becomes a
//! [`Scene`] or is dropped with a [`LoadWarning`]. Only the conditions in
//! [`LoadError`] abort the load.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::choice::{Choice, ChoiceRejection};
use crate::domain::scene::{
    CHOICES_FIELD, Presentation, SCENE_ID_FIELD, SCENE_TYPE_FIELD, Scene, SceneId, SceneKind,
};
use crate::domain::scene_set::{SceneSet, to_hex_lower};
use crate::error::LoadError;

/// Row-local problem. The row or choice it names is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowIssue {
    /// The row is not a JSON object.
    #[error("row is not an object")]
    NotAnObject,
    /// `sceneId` is missing or not an integer; the row is dropped.
    #[error("invalid sceneId {raw}; row dropped")]
    InvalidSceneId {
        /// The offending cell.
        raw: Value,
    },
    /// `choices` is valid JSON but not a list; the scene gets no choices.
    #[error("parsed choices is not a list; treating as no choices")]
    ChoicesNotAList,
    /// `choices` has a type that cannot hold a list.
    #[error("choices has unsupported type {found}; treating as no choices")]
    UnsupportedChoicesType {
        /// JSON type name of the cell.
        found: &'static str,
    },
    /// One choice entry failed validation and was dropped.
    #[error("choice {index} dropped: {reason}")]
    InvalidChoice {
        /// 0-based position within the row's choice list.
        index: usize,
        /// Why it was dropped.
        reason: ChoiceRejection,
    },
    /// `sceneType` is not a known tag; the scene is treated as a question.
    #[error("unknown sceneType {raw:?}; treating as question")]
    UnknownSceneType {
        /// The tag as written.
        raw: String,
    },
    /// A choice points at a scene id that does not exist.
    #[error("choice {choice_index} targets missing scene {target}")]
    DanglingTarget {
        /// 0-based position within the row's choice list.
        choice_index: usize,
        /// The missing scene id.
        target: SceneId,
    },
}

/// A non-fatal diagnostic attached to a row.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    /// 1-based row number in the source table.
    pub row: usize,
    /// What was wrong.
    pub issue: RowIssue,
}

/// A loaded scene set together with the diagnostics produced on the way.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The validated scenes.
    pub scenes: SceneSet,
    /// Row-local problems that were skipped.
    pub warnings: Vec<LoadWarning>,
}

/// Loads raw rows into a scene set, logging every row-local warning.
///
/// # Errors
///
/// Returns a [`LoadError`] if the table is empty, no row has a valid id, a
/// serialized choice list is malformed, or two rows share an id.
pub fn load(raw_rows: &[Value]) -> Result<SceneSet, LoadError> {
    let outcome = load_with_diagnostics(raw_rows)?;
    for warning in &outcome.warnings {
        warn!(row = warning.row, "{}", warning.issue);
    }
    debug!(
        scenes = outcome.scenes.len(),
        warnings = outcome.warnings.len(),
        version_hash = outcome.scenes.version_hash(),
        "scene set loaded"
    );
    Ok(outcome.scenes)
}

/// Loads raw rows into a scene set and returns the warnings instead of
/// logging them.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_diagnostics(raw_rows: &[Value]) -> Result<LoadOutcome, LoadError> {
    if raw_rows.is_empty() {
        return Err(LoadError::NoData);
    }

    let mut warnings = Vec::new();
    let mut scenes = Vec::with_capacity(raw_rows.len());
    let mut rows_by_id: HashMap<SceneId, usize> = HashMap::with_capacity(raw_rows.len());

    for (index, raw) in raw_rows.iter().enumerate() {
        let row = index + 1;
        let Some(fields) = raw.as_object() else {
            warnings.push(LoadWarning {
                row,
                issue: RowIssue::NotAnObject,
            });
            continue;
        };

        let Some(id) = fields.get(SCENE_ID_FIELD).and_then(SceneId::from_value) else {
            warnings.push(LoadWarning {
                row,
                issue: RowIssue::InvalidSceneId {
                    raw: fields.get(SCENE_ID_FIELD).cloned().unwrap_or(Value::Null),
                },
            });
            continue;
        };

        let choices = parse_choices(row, fields.get(CHOICES_FIELD), &mut warnings)?;
        let kind = parse_kind(row, fields.get(SCENE_TYPE_FIELD), &mut warnings);

        match rows_by_id.entry(id) {
            Entry::Occupied(first) => {
                return Err(LoadError::DuplicateSceneId {
                    scene_id: id,
                    first_row: *first.get(),
                    duplicate_row: row,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
        }

        scenes.push(Scene::new(id, kind, choices).with_presentation(presentation_of(fields)));
    }

    if scenes.is_empty() {
        return Err(LoadError::EmptyValidSceneSet {
            rows: raw_rows.len(),
        });
    }

    let scenes = SceneSet::from_unique(scenes, hash_rows(raw_rows));

    for dangling in scenes.dangling_targets() {
        warnings.push(LoadWarning {
            row: rows_by_id.get(&dangling.scene_id).copied().unwrap_or_default(),
            issue: RowIssue::DanglingTarget {
                choice_index: dangling.choice_index,
                target: dangling.target,
            },
        });
    }

    Ok(LoadOutcome { scenes, warnings })
}

fn parse_choices(
    row: usize,
    cell: Option<&Value>,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Vec<Choice>, LoadError> {
    let entries = match cell {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries.clone(),
        Some(Value::String(raw)) => {
            if raw.trim().is_empty() {
                return Ok(Vec::new());
            }
            let cleaned: String = raw
                .chars()
                .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
                .collect();
            let parsed: Value =
                serde_json::from_str(cleaned.trim()).map_err(|e| LoadError::ChoicesParse {
                    row,
                    raw: raw.clone(),
                    reason: e.to_string(),
                })?;
            let Value::Array(entries) = parsed else {
                warnings.push(LoadWarning {
                    row,
                    issue: RowIssue::ChoicesNotAList,
                });
                return Ok(Vec::new());
            };
            entries
        }
        Some(other) => {
            warnings.push(LoadWarning {
                row,
                issue: RowIssue::UnsupportedChoicesType {
                    found: json_type_name(other),
                },
            });
            return Ok(Vec::new());
        }
    };

    let mut choices = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match Choice::from_value(entry) {
            Ok(choice) => choices.push(choice),
            Err(reason) => warnings.push(LoadWarning {
                row,
                issue: RowIssue::InvalidChoice { index, reason },
            }),
        }
    }
    Ok(choices)
}

fn parse_kind(row: usize, cell: Option<&Value>, warnings: &mut Vec<LoadWarning>) -> SceneKind {
    match cell {
        Some(Value::String(raw)) if !raw.trim().is_empty() => {
            SceneKind::parse(raw).unwrap_or_else(|| {
                warnings.push(LoadWarning {
                    row,
                    issue: RowIssue::UnknownSceneType { raw: raw.clone() },
                });
                SceneKind::default()
            })
        }
        _ => SceneKind::default(),
    }
}

fn presentation_of(fields: &Map<String, Value>) -> Presentation {
    Presentation::new(
        fields
            .iter()
            .filter(|(key, _)| {
                !matches!(key.as_str(), SCENE_ID_FIELD | CHOICES_FIELD | SCENE_TYPE_FIELD)
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

/// SHA-256 over the raw rows in source order, one NUL between rows.
pub(crate) fn hash_rows(raw_rows: &[Value]) -> String {
    let mut hasher = Sha256::new();
    for raw in raw_rows {
        hasher.update(raw.to_string().as_bytes());
        hasher.update([0u8]);
    }
    to_hex_lower(&hasher.finalize())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
