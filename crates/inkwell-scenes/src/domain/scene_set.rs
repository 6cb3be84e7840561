//! The validated, id-unique collection of scenes for one session.

use std::fmt::Write as _;

use serde::Serialize;

use super::scene::{Scene, SceneId};

/// A choice whose target id is not part of the scene set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DanglingTarget {
    /// Scene carrying the broken choice.
    pub scene_id: SceneId,
    /// Position of the choice within that scene.
    pub choice_index: usize,
    /// The missing target.
    pub target: SceneId,
}

/// Scenes ordered ascending by id, ids unique.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSet {
    scenes: Vec<Scene>,
    version_hash: String,
}

impl SceneSet {
    /// Builds a set from scenes whose ids were already checked for
    /// uniqueness.
    pub(crate) fn from_unique(mut scenes: Vec<Scene>, version_hash: String) -> Self {
        scenes.sort_by_key(|scene| scene.id);
        Self {
            scenes,
            version_hash,
        }
    }

    /// Looks up a scene by id.
    #[must_use]
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes
            .binary_search_by_key(&id, |scene| scene.id)
            .ok()
            .map(|index| &self.scenes[index])
    }

    /// Whether a scene with `id` exists.
    #[must_use]
    pub fn contains(&self, id: SceneId) -> bool {
        self.get(id).is_some()
    }

    /// The scene with the smallest id.
    #[must_use]
    pub fn first(&self) -> Option<&Scene> {
        self.scenes.first()
    }

    /// Number of scenes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the set holds no scenes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scenes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.scenes.iter().map(|scene| scene.id)
    }

    /// Hex SHA-256 identifying the content this set was built from.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }

    /// Every choice pointing at a scene id that is not in the set.
    #[must_use]
    pub fn dangling_targets(&self) -> Vec<DanglingTarget> {
        self.scenes
            .iter()
            .flat_map(|scene| {
                scene
                    .choices
                    .iter()
                    .enumerate()
                    .filter(|(_, choice)| !self.contains(choice.next_scene_id))
                    .map(|(choice_index, choice)| DanglingTarget {
                        scene_id: scene.id,
                        choice_index,
                        target: choice.next_scene_id,
                    })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SceneSet {
    type Item = &'a Scene;
    type IntoIter = std::slice::Iter<'a, Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}

pub(crate) fn to_hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::loader::{hash_rows, load};
    use serde_json::{Value, json};

    fn row(id: i64, targets: &[i64]) -> Value {
        let choices: Vec<Value> = targets
            .iter()
            .map(|target| json!({ "text": format!("to {target}"), "nextSceneId": target }))
            .collect();
        json!({ "sceneId": id, "choices": choices })
    }

    #[test]
    fn test_scenes_are_sorted_by_id() {
        // Arrange
        let rows = vec![row(3, &[]), row(1, &[3]), row(2, &[])];

        // Act
        let set = load(&rows).unwrap();

        // Assert
        let ids: Vec<i64> = set.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(set.first().map(|s| s.id), Some(SceneId(1)));
        assert_eq!(set.version_hash().len(), 64);
    }

    #[test]
    fn test_get_and_contains() {
        let set = load(&[row(10, &[]), row(5, &[])]).unwrap();

        assert_eq!(set.get(SceneId(10)).map(|s| s.id), Some(SceneId(10)));
        assert!(set.contains(SceneId(5)));
        assert!(!set.contains(SceneId(7)));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_dangling_targets_lists_missing_choice_targets() {
        // Arrange
        let set = load(&[row(1, &[2, 9]), row(2, &[1, 4])]).unwrap();

        // Act
        let dangling = set.dangling_targets();

        // Assert
        assert_eq!(
            dangling,
            vec![
                DanglingTarget {
                    scene_id: SceneId(1),
                    choice_index: 1,
                    target: SceneId(9),
                },
                DanglingTarget {
                    scene_id: SceneId(2),
                    choice_index: 1,
                    target: SceneId(4),
                },
            ]
        );
    }

    #[test]
    fn test_version_hash_changes_with_content() {
        let a = load(&[row(1, &[2]), row(2, &[])]).unwrap();
        let b = load(&[row(1, &[]), row(2, &[])]).unwrap();

        assert_ne!(a.version_hash(), b.version_hash());
    }

    #[test]
    fn test_version_hash_is_the_raw_row_hash() {
        // Arrange
        let rows = vec![row(1, &[2]), row(2, &[])];
        let mut with_dropped_row = rows.clone();
        with_dropped_row.push(json!({ "sceneId": "not a number" }));

        // Act
        let set = load(&rows).unwrap();
        let same_scenes = load(&with_dropped_row).unwrap();

        // Assert
        assert_eq!(set.version_hash(), hash_rows(&rows));
        assert_eq!(same_scenes.iter().count(), set.iter().count());
        assert_eq!(same_scenes.version_hash(), hash_rows(&with_dropped_row));
        assert_ne!(same_scenes.version_hash(), set.version_hash());
    }

    #[test]
    fn test_to_hex_lower_pads_each_byte() {
        assert_eq!(to_hex_lower(&[0x00, 0x0a, 0xff]), "000aff");
    }
}
