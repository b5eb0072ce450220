//! Plain-text rendering of maps, one glyph per tile.

use crate::map::GridMap;
use crate::tile::{Position, Tile};

/// Glyphs and what they stand for, in display order.
pub const LEGEND: [(char, &str); 13] = [
    ('@', "player"),
    ('.', "empty ground"),
    ('T', "tree"),
    ('t', "felled tree"),
    ('R', "rock"),
    ('r', "mined-out rock"),
    ('$', "shop"),
    ('B', "bank chest"),
    ('>', "transport"),
    ('#', "scenery"),
    ('*', "fire"),
    ('c', "chicken"),
    ('g', "guard / d stray dog"),
];

fn render_rows<'a>(rows: impl Iterator<Item = &'a [Tile]>) -> String {
    rows.map(|row| row.iter().map(|t| t.kind.glyph()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The visible window around `anchor`.
pub fn render_window(map: &GridMap, anchor: Position) -> String {
    render_rows(map.windowed_view(anchor).rows.into_iter())
}

/// The whole map.
pub fn render_map(map: &GridMap) -> String {
    render_rows(map.tiles().chunks(map.width()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapSettings;
    use crate::node::{NodeKind, NodeState, ResourceNode};
    use crate::tile::TileKind;

    fn sample() -> GridMap {
        let mut kinds = vec![TileKind::Empty; 25];
        kinds[2] = TileKind::Node(ResourceNode::with_state(
            NodeKind::OakTree,
            NodeState::Active { health: 3 },
        ));
        kinds[6] = TileKind::Bank;
        kinds[24] = TileKind::Fire { ticks_left: 4 };
        let mut map = GridMap::new(
            "sample",
            MapSettings {
                width: 5,
                height: 5,
                window_width: 3,
                window_height: 3,
                can_light_fires: true,
                background_color: "green".into(),
            },
            kinds,
        );
        map.insert_player(Position::new(0, 0));
        map
    }

    #[test]
    fn window_at_the_corner() {
        insta::assert_snapshot!(render_window(&sample(), Position::new(0, 0)), @r"
        @.T
        .B.
        ...
        ");
    }

    #[test]
    fn whole_map() {
        let text = render_map(&sample());
        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with("....*"));
    }
}
