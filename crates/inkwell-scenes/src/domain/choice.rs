//! Choices: labeled outgoing edges between scenes.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::scene::SceneId;

const TEXT_FIELD: &str = "text";
const NEXT_SCENE_ID_FIELD: &str = "nextSceneId";

/// One labeled edge from a scene to another scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Button label. Never empty.
    pub text: String,
    /// Scene this choice leads to.
    pub next_scene_id: SceneId,
}

/// Why a single choice entry was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceRejection {
    /// The entry is not a JSON object.
    #[error("choice entry is not an object")]
    NotAnObject,
    /// The entry has no `text` field.
    #[error("choice has no text")]
    MissingText,
    /// `text` is present but not a string.
    #[error("choice text is not a string")]
    NonStringText,
    /// `text` is an empty string.
    #[error("choice text is empty")]
    EmptyText,
    /// `nextSceneId` is missing or not an integer.
    #[error("choice nextSceneId is missing or not an integer")]
    InvalidNextSceneId,
}

impl Choice {
    /// Creates a choice.
    #[must_use]
    pub fn new(text: impl Into<String>, next_scene_id: SceneId) -> Self {
        Self {
            text: text.into(),
            next_scene_id,
        }
    }

    /// Validates one raw choice entry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChoiceRejection`] the entry fails.
    pub fn from_value(value: &Value) -> Result<Self, ChoiceRejection> {
        let fields = value.as_object().ok_or(ChoiceRejection::NotAnObject)?;

        let text = match fields.get(TEXT_FIELD) {
            None | Some(Value::Null) => return Err(ChoiceRejection::MissingText),
            Some(Value::String(text)) if text.is_empty() => {
                return Err(ChoiceRejection::EmptyText);
            }
            Some(Value::String(text)) => text.clone(),
            Some(_) => return Err(ChoiceRejection::NonStringText),
        };

        let next_scene_id = fields
            .get(NEXT_SCENE_ID_FIELD)
            .and_then(SceneId::from_value)
            .ok_or(ChoiceRejection::InvalidNextSceneId)?;

        Ok(Self {
            text,
            next_scene_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_numeric_string_target() {
        let choice = Choice::from_value(&json!({ "text": "Go", "nextSceneId": "2" })).unwrap();

        assert_eq!(choice, Choice::new("Go", SceneId(2)));
    }

    #[test]
    fn test_from_value_rejects_non_string_text() {
        let result = Choice::from_value(&json!({ "text": 123, "nextSceneId": "2" }));

        assert_eq!(result, Err(ChoiceRejection::NonStringText));
    }

    #[test]
    fn test_from_value_rejects_empty_text() {
        let result = Choice::from_value(&json!({ "text": "", "nextSceneId": 2 }));

        assert_eq!(result, Err(ChoiceRejection::EmptyText));
    }

    #[test]
    fn test_from_value_rejects_missing_or_bad_target() {
        assert_eq!(
            Choice::from_value(&json!({ "text": "Go" })),
            Err(ChoiceRejection::InvalidNextSceneId)
        );
        assert_eq!(
            Choice::from_value(&json!({ "text": "Go", "nextSceneId": "later" })),
            Err(ChoiceRejection::InvalidNextSceneId)
        );
    }

    #[test]
    fn test_from_value_rejects_non_object_entries() {
        assert_eq!(
            Choice::from_value(&json!("Go")),
            Err(ChoiceRejection::NotAnObject)
        );
    }
}
