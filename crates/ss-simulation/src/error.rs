//! Errors that stop a simulation from being built or ticked.

use ss_world::{Position, WorldError};

/// Result alias for fallible simulation work.
pub type SimResult<T> = Result<T, SimError>;

/// Failures outside the player's control, as opposed to a [`ss_core::Rejection`].
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The maps could not be loaded.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The configured start map is missing from the atlas.
    #[error("start map \"{0}\" is not loaded")]
    UnknownStartMap(String),

    /// The start position is taken.
    #[error("cannot start on \"{map}\" at {position}: the tile is not empty")]
    StartBlocked {
        /// Start map name.
        map: String,
        /// The occupied tile.
        position: Position,
    },
}
