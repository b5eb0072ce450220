//! Errors raised while loading maps.

use std::path::PathBuf;

use crate::tile::CodeError;

/// Errors that can occur when reading map definitions.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A map file or directory could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file or directory.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A map file is not valid JSON for a map definition.
    #[error("invalid map file {path}: {source}")]
    Json {
        /// The file.
        path: PathBuf,
        /// The parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Width, height, or window settings do not fit together.
    #[error("map \"{map}\": {reason}")]
    Dimensions {
        /// Map name.
        map: String,
        /// What does not fit.
        reason: String,
    },

    /// A grid cell could not be turned into a tile.
    #[error("map \"{map}\" at ({x}, {y}): {source}")]
    Tile {
        /// Map name.
        map: String,
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Why the code was rejected.
        #[source]
        source: CodeError,
    },

    /// A transport points at a missing map or off its edge.
    #[error("map \"{map}\" at ({x}, {y}): transport to {destination} leads nowhere")]
    DanglingTransport {
        /// Map name.
        map: String,
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// The map the transport names.
        destination: String,
    },

    /// Two map files share a name.
    #[error("duplicate map name: \"{0}\"")]
    DuplicateMap(String),

    /// A directory holds no map files.
    #[error("no map files found in {0}")]
    NoMaps(PathBuf),
}

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;
