//! Reading map definitions from JSON.
//!
//! One file describes one map; the file stem is the map's name. Cells are
//! tile codes (see [`crate::tile::tile_from_code`]), blank for empty ground.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::atlas::Atlas;
use crate::error::{WorldError, WorldResult};
use crate::map::{GridMap, MapSettings};
use crate::tile::{Position, tile_from_code};

/// Width and height in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// In tiles.
    pub width: usize,
    /// In tiles.
    pub height: usize,
}

/// The on-disk form of a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDefinition {
    /// Size of the whole grid.
    pub total: Dimensions,
    /// Size of the visible window.
    pub window: Dimensions,
    /// Whether logs may be lit on this map.
    pub can_light_fires: bool,
    /// Colour name used behind empty tiles.
    pub background_color: String,
    /// Rows of tile codes, top row first.
    pub map: Vec<Vec<String>>,
}

impl MapDefinition {
    /// Check the layout and build the map, rolling fresh node health.
    pub fn build<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> WorldResult<GridMap> {
        let bad = |reason: String| WorldError::Dimensions {
            map: name.to_string(),
            reason,
        };
        let (total, window) = (self.total, self.window);
        if total.width == 0 || total.height == 0 {
            return Err(bad("map has no tiles".into()));
        }
        if window.width % 2 == 0 || window.height % 2 == 0 {
            return Err(bad(format!(
                "window {}x{} must be odd in both directions",
                window.width, window.height
            )));
        }
        if window.width > total.width || window.height > total.height {
            return Err(bad(format!(
                "window {}x{} is larger than the map {}x{}",
                window.width, window.height, total.width, total.height
            )));
        }
        if self.map.len() != total.height {
            return Err(bad(format!(
                "expected {} rows, found {}",
                total.height,
                self.map.len()
            )));
        }

        let mut kinds = Vec::with_capacity(total.width * total.height);
        for (y, row) in self.map.iter().enumerate() {
            if row.len() != total.width {
                return Err(bad(format!(
                    "row {y} has {} cells, expected {}",
                    row.len(),
                    total.width
                )));
            }
            for (x, code) in row.iter().enumerate() {
                let kind = tile_from_code(code, Position::new(x, y), rng).map_err(|source| {
                    WorldError::Tile {
                        map: name.to_string(),
                        x,
                        y,
                        source,
                    }
                })?;
                kinds.push(kind);
            }
        }

        Ok(GridMap::new(
            name,
            MapSettings {
                width: total.width,
                height: total.height,
                window_width: window.width,
                window_height: window.height,
                can_light_fires: self.can_light_fires,
                background_color: self.background_color.clone(),
            },
            kinds,
        ))
    }
}

/// Load one map file. The map is named after the file stem.
pub fn load_file<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> WorldResult<GridMap> {
    let content = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let definition: MapDefinition =
        serde_json::from_str(&content).map_err(|source| WorldError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::debug!(map = %name, path = %path.display(), "loading map");
    definition.build(&name, rng)
}

/// Load every `*.json` file in `dir`, in file-name order, into an atlas.
pub fn load_dir<R: Rng + ?Sized>(dir: &Path, rng: &mut R) -> WorldResult<Atlas> {
    let io = |source| WorldError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(WorldError::NoMaps(dir.to_path_buf()));
    }
    paths.sort();
    let maps = paths
        .iter()
        .map(|p| load_file(p, &mut *rng))
        .collect::<WorldResult<Vec<_>>>()?;
    Atlas::new(maps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const FIELD: &str = r#"{
        "total": {"width": 3, "height": 3},
        "window": {"width": 3, "height": 1},
        "can_light_fires": true,
        "background_color": "green",
        "map": [
            ["OT", "", "BC"],
            ["", "Chicken", ""],
            ["CEntrance:cave:0:0", "", "GS"]
        ]
    }"#;

    const CAVE: &str = r#"{
        "total": {"width": 1, "height": 1},
        "window": {"width": 1, "height": 1},
        "can_light_fires": false,
        "background_color": "grey",
        "map": [["CExit:field:1:0"]]
    }"#;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn definition(json: &str) -> MapDefinition {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn builds_tiles_in_place() {
        let map = definition(FIELD).build("field", &mut rng()).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.tile(Position::new(2, 0)).unwrap().kind, TileKind::Bank);
        assert!(map.tile(Position::new(1, 0)).unwrap().kind.is_empty());
        assert!(matches!(
            map.tile(Position::new(0, 2)).unwrap().kind,
            TileKind::Transport(_)
        ));
        assert!(map.settings().can_light_fires);
    }

    #[test]
    fn rejects_bad_windows() {
        let mut def = definition(FIELD);
        def.window.width = 2;
        assert!(matches!(
            def.build("field", &mut rng()),
            Err(WorldError::Dimensions { .. })
        ));
        def.window.width = 5;
        assert!(matches!(
            def.build("field", &mut rng()),
            Err(WorldError::Dimensions { .. })
        ));
    }

    #[test]
    fn rejects_ragged_rows_and_unknown_codes() {
        let mut def = definition(FIELD);
        def.map[1].pop();
        assert!(matches!(
            def.build("field", &mut rng()),
            Err(WorldError::Dimensions { .. })
        ));

        let mut def = definition(FIELD);
        def.map[1][1] = "Dragon".into();
        let err = def.build("field", &mut rng()).unwrap_err();
        assert!(matches!(err, WorldError::Tile { x: 1, y: 1, .. }));
        assert!(err.to_string().contains("Dragon"));
    }

    #[test]
    fn loads_a_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("field.json"), FIELD).unwrap();
        std::fs::write(dir.path().join("cave.json"), CAVE).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a map").unwrap();

        let atlas = load_dir(dir.path(), &mut rng()).unwrap();
        assert_eq!(atlas.names().collect::<Vec<_>>(), vec!["cave", "field"]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_dir(dir.path(), &mut rng()),
            Err(WorldError::NoMaps(_))
        ));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_file(&path, &mut rng()).unwrap_err();
        assert!(matches!(err, WorldError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
