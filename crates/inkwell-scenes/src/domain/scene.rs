//! Scenes: the nodes of the branching narrative graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::choice::Choice;

/// Row field holding the scene identifier.
pub const SCENE_ID_FIELD: &str = "sceneId";
/// Row field holding the choice list.
pub const CHOICES_FIELD: &str = "choices";
/// Row field holding the scene type tag.
pub const SCENE_TYPE_FIELD: &str = "sceneType";

const QUESTION_FIELD: &str = "question";
const BACKGROUND_IMAGE_FIELD: &str = "backgroundImage";
const BACKGROUND_MUSIC_FIELD: &str = "backgroundMusic";

/// Integer scene identifier, the sole join key between scenes and choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub i64);

impl SceneId {
    /// The scene a session starts on when present.
    pub const INITIAL: SceneId = SceneId(1);

    /// Parses an id from a loosely typed cell.
    ///
    /// Accepts JSON integers, integral floats and strings holding an
    /// optionally signed decimal integer. Surrounding whitespace in strings
    /// is ignored.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(integral_f64))
                .map(SceneId),
            Value::String(text) => text.trim().parse::<i64>().ok().map(SceneId),
            _ => None,
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn integral_f64(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && in_range && value.trunc() == value).then_some(value as i64)
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SceneId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Closed tag describing how the renderer treats a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// A regular scene offering choices.
    #[default]
    Question,
    /// A terminal scene; the default renderer offers no further choices.
    Ending,
}

impl SceneKind {
    /// Parses a scene type tag, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let tag = raw.trim();
        if tag.eq_ignore_ascii_case("question") {
            Some(Self::Question)
        } else if tag.eq_ignore_ascii_case("ending") {
            Some(Self::Ending)
        } else {
            None
        }
    }
}

/// Opaque presentation directives carried through to the renderer.
///
/// Holds every row field the engine does not interpret itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Presentation(Map<String, Value>);

impl Presentation {
    /// Wraps a field map.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns a raw field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a field as text when it is a non-blank string.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// The question text shown for the scene.
    #[must_use]
    pub fn question(&self) -> Option<&str> {
        self.text(QUESTION_FIELD)
    }

    /// The background image reference, as written in the table.
    #[must_use]
    pub fn background_image(&self) -> Option<&str> {
        self.text(BACKGROUND_IMAGE_FIELD)
    }

    /// The background music reference, as written in the table.
    #[must_use]
    pub fn background_music(&self) -> Option<&str> {
        self.text(BACKGROUND_MUSIC_FIELD)
    }

    /// All pass-through fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A normalized scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Unique scene identifier.
    pub id: SceneId,
    /// How the renderer treats this scene.
    pub kind: SceneKind,
    /// Outgoing edges in display order.
    pub choices: Vec<Choice>,
    /// Pass-through display directives.
    pub presentation: Presentation,
}

impl Scene {
    /// Creates a scene with no presentation fields.
    #[must_use]
    pub fn new(id: SceneId, kind: SceneKind, choices: Vec<Choice>) -> Self {
        Self {
            id,
            kind,
            choices,
            presentation: Presentation::default(),
        }
    }

    /// Attaches presentation fields.
    #[must_use]
    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    /// Whether the scene is tagged as an ending.
    #[must_use]
    pub fn is_ending(&self) -> bool {
        self.kind == SceneKind::Ending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scene_id_from_value_accepts_integers_and_numeric_strings() {
        assert_eq!(SceneId::from_value(&json!(7)), Some(SceneId(7)));
        assert_eq!(SceneId::from_value(&json!("12")), Some(SceneId(12)));
        assert_eq!(SceneId::from_value(&json!(" 3 ")), Some(SceneId(3)));
        assert_eq!(SceneId::from_value(&json!("-4")), Some(SceneId(-4)));
        assert_eq!(SceneId::from_value(&json!(2.0)), Some(SceneId(2)));
    }

    #[test]
    fn test_scene_id_from_value_rejects_non_integers() {
        assert_eq!(SceneId::from_value(&json!("x")), None);
        assert_eq!(SceneId::from_value(&json!("")), None);
        assert_eq!(SceneId::from_value(&json!(2.5)), None);
        assert_eq!(SceneId::from_value(&json!(null)), None);
        assert_eq!(SceneId::from_value(&json!(true)), None);
        assert_eq!(SceneId::from_value(&json!([1])), None);
    }

    #[test]
    fn test_scene_kind_parse_is_case_insensitive() {
        assert_eq!(SceneKind::parse("Ending"), Some(SceneKind::Ending));
        assert_eq!(SceneKind::parse(" question "), Some(SceneKind::Question));
        assert_eq!(SceneKind::parse("epilogue"), None);
    }

    #[test]
    fn test_presentation_text_skips_blank_and_non_string_fields() {
        let mut fields = Map::new();
        fields.insert("question".to_owned(), json!("Where to?"));
        fields.insert("backgroundImage".to_owned(), json!("   "));
        fields.insert("backgroundMusic".to_owned(), json!(42));
        let presentation = Presentation::new(fields);

        assert_eq!(presentation.question(), Some("Where to?"));
        assert_eq!(presentation.background_image(), None);
        assert_eq!(presentation.background_music(), None);
    }
}
