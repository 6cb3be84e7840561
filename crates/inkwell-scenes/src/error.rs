//! Load-fatal error types.

use thiserror::Error;

use crate::domain::scene::SceneId;

/// A problem that aborts the whole load. No partial scene set is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The source delivered zero rows.
    #[error("no scene data found: the scene table is empty")]
    NoData,

    /// Rows were delivered but none of them carried a usable scene id.
    #[error("scene data was fetched but none of its {rows} rows has a valid sceneId")]
    EmptyValidSceneSet {
        /// Number of rows that were checked.
        rows: usize,
    },

    /// A row's serialized choice list is not valid JSON.
    #[error("failed to parse choices on row {row}: {reason} (input: {raw:?})")]
    ChoicesParse {
        /// 1-based row number.
        row: usize,
        /// The choices string as delivered.
        raw: String,
        /// Parser message.
        reason: String,
    },

    /// Two rows claim the same scene id.
    #[error("scene id {scene_id} appears on row {first_row} and again on row {duplicate_row}")]
    DuplicateSceneId {
        /// The contested id.
        scene_id: SceneId,
        /// Row (or position) where the id was first seen.
        first_row: usize,
        /// Row (or position) of the second occurrence.
        duplicate_row: usize,
    },
}
