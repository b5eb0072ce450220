//! Map tiles and the registry of tile codes used in map files.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use ss_core::ShopKind;
use ss_core::skills::{RequirementError, SkillRequirements};

use crate::node::{NodeKind, ResourceNode};

/// Absolute tile coordinates; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, from the left.
    pub x: usize,
    /// Row, from the top.
    pub y: usize,
}

impl Position {
    /// A position at column `x`, row `y`.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A step in one of the four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" | "north" => Ok(Self::Up),
            "down" | "d" | "south" => Ok(Self::Down),
            "left" | "l" | "west" => Ok(Self::Left),
            "right" | "r" | "east" => Ok(Self::Right),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Non-player characters that wander around their starting tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    /// Stays within two tiles of its origin.
    Chicken,
    /// Stays within three tiles of its origin.
    Guard,
    /// Roams freely.
    StrayDog,
}

impl NpcKind {
    /// Display name, e.g. `"Stray Dog"`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Chicken => "Chicken",
            Self::Guard => "Guard",
            Self::StrayDog => "Stray Dog",
        }
    }

    /// Furthest the NPC may stray from its origin along either axis.
    pub fn radius(self) -> usize {
        match self {
            Self::Chicken => 2,
            Self::Guard => 3,
            Self::StrayDog => 100,
        }
    }
}

/// A wandering NPC and the tile it started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Npc {
    /// What sort of NPC.
    pub kind: NpcKind,
    /// Where the NPC was placed. It never strays far from here.
    pub origin: Position,
}

/// Static decoration that blocks movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneryKind {
    /// Town fountain.
    WaterFountain,
    /// Merchant's cart.
    Cart,
    /// Blacksmith's anvil.
    Anvil,
    /// Barrel of arrows.
    ArcheryBarrel,
    /// Barrel of ore.
    MiningBarrel,
    /// Wooden crate.
    Crate,
    /// Market stall selling furs.
    FurStall,
    /// Market stall selling bread.
    BakeryStall,
}

impl SceneryKind {
    /// Display name, e.g. `"Water Fountain"`.
    pub fn title(self) -> &'static str {
        match self {
            Self::WaterFountain => "Water Fountain",
            Self::Cart => "Cart",
            Self::Anvil => "Anvil",
            Self::ArcheryBarrel => "Archery Barrel",
            Self::MiningBarrel => "Mining Barrel",
            Self::Crate => "Crate",
            Self::FurStall => "Fur Stall",
            Self::BakeryStall => "Bakery Stall",
        }
    }
}

/// Tiles that move the player to another map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    /// Surface to cave.
    CaveEntrance,
    /// Cave to surface.
    CaveExit,
    /// Cave to lower cave.
    LadderDown,
    /// Lower cave to cave.
    LadderUp,
    /// Gated by firemaking.
    FireAltar,
}

impl TransportKind {
    /// Display name, e.g. `"Cave Entrance"`.
    pub fn title(self) -> &'static str {
        match self {
            Self::CaveEntrance => "Cave Entrance",
            Self::CaveExit => "Cave Exit",
            Self::LadderDown => "Ladder Down",
            Self::LadderUp => "Ladder Up",
            Self::FireAltar => "Fire Altar",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "CEntrance" => Some(Self::CaveEntrance),
            "CExit" => Some(Self::CaveExit),
            "LDown" => Some(Self::LadderDown),
            "LUP" => Some(Self::LadderUp),
            "FAltar" => Some(Self::FireAltar),
            _ => None,
        }
    }
}

/// Where a transport tile leads and who may use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportLink {
    /// What the link looks like.
    pub kind: TransportKind,
    /// Name of the map it leads to.
    pub destination: String,
    /// Arrival tile on the destination.
    pub target: Position,
    /// Levels needed to pass.
    pub requirements: SkillRequirements,
}

/// What occupies a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileKind {
    /// Walkable ground.
    Empty,
    /// Where the player stands.
    Player,
    /// A wandering NPC.
    Npc(Npc),
    /// A tree or rock.
    Node(ResourceNode),
    /// A shop counter.
    Shop(ShopKind),
    /// The bank booth.
    Bank,
    /// A link to another map.
    Transport(TransportLink),
    /// Decoration that blocks movement.
    Scenery(SceneryKind),
    /// A burning fire that reverts to empty ground when `ticks_left` runs out.
    Fire {
        /// Ticks until the fire burns out.
        ticks_left: u32,
    },
}

impl TileKind {
    /// Whether nothing stands here.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Name shown when the tile is examined.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Player => "Player",
            Self::Npc(npc) => npc.kind.title(),
            Self::Node(node) => node.kind().title(),
            Self::Shop(kind) => kind.title(),
            Self::Bank => "Bank Chest",
            Self::Transport(link) => link.kind.title(),
            Self::Scenery(kind) => kind.title(),
            Self::Fire { .. } => "Fire",
        }
    }

    /// One-character glyph for text rendering.
    pub fn glyph(&self) -> char {
        match self {
            Self::Empty => '.',
            Self::Player => '@',
            Self::Npc(npc) => match npc.kind {
                NpcKind::Chicken => 'c',
                NpcKind::Guard => 'g',
                NpcKind::StrayDog => 'd',
            },
            Self::Node(node) => match (node.kind().tool_family(), node.is_depleted()) {
                (ss_core::ToolFamily::Axe, false) => 'T',
                (ss_core::ToolFamily::Axe, true) => 't',
                (_, false) => 'R',
                (_, true) => 'r',
            },
            Self::Shop(_) => '$',
            Self::Bank => 'B',
            Self::Transport(_) => '>',
            Self::Scenery(_) => '#',
            Self::Fire { .. } => '*',
        }
    }
}

/// A tile and the coordinates it currently sits at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Where the tile sits.
    pub position: Position,
    /// What occupies it.
    pub kind: TileKind,
}

impl Tile {
    /// A tile holding `kind`.
    pub fn new(position: Position, kind: TileKind) -> Self {
        Self { position, kind }
    }

    /// An empty tile at `position`.
    pub fn empty(position: Position) -> Self {
        Self::new(position, TileKind::Empty)
    }
}

/// A map cell that names no known tile.
#[derive(Debug, thiserror::Error)]
pub enum CodeError {
    /// No tile uses this code.
    #[error("unknown tile code \"{0}\"")]
    Unknown(String),
    /// A transport code that does not parse.
    #[error("malformed transport code \"{code}\": {reason}")]
    Transport {
        /// The offending cell.
        code: String,
        /// Which part is wrong.
        reason: &'static str,
    },
    /// A requirement on a transport code that does not parse.
    #[error(transparent)]
    Requirement(#[from] RequirementError),
}

/// Build the tile a map-file cell describes. Blank cells are empty ground.
///
/// Transport cells read `Code:destination:x:y[:requirements]`, where the
/// requirements are space-separated `skill(level)` tokens.
pub fn tile_from_code<R: Rng + ?Sized>(
    code: &str,
    position: Position,
    rng: &mut R,
) -> Result<TileKind, CodeError> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(TileKind::Empty);
    }
    if code.contains(':') {
        return parse_transport(code).map(TileKind::Transport);
    }
    let kind = match code {
        "OT" => TileKind::Node(ResourceNode::new(NodeKind::OakTree, rng)),
        "WT" => TileKind::Node(ResourceNode::new(NodeKind::WillowTree, rng)),
        "MT" => TileKind::Node(ResourceNode::new(NodeKind::MapleTree, rng)),
        "YT" => TileKind::Node(ResourceNode::new(NodeKind::YewTree, rng)),
        "MagicT" => TileKind::Node(ResourceNode::new(NodeKind::MagicTree, rng)),
        "CR" => TileKind::Node(ResourceNode::new(NodeKind::CopperRock, rng)),
        "TR" => TileKind::Node(ResourceNode::new(NodeKind::TinRock, rng)),
        "C" => TileKind::Node(ResourceNode::new(NodeKind::CoalRock, rng)),
        "IR" => TileKind::Node(ResourceNode::new(NodeKind::IronRock, rng)),
        "GR" => TileKind::Node(ResourceNode::new(NodeKind::GoldRock, rng)),
        "GS" => TileKind::Shop(ShopKind::General),
        "BS" => TileKind::Shop(ShopKind::Blacksmith),
        "AS" => TileKind::Shop(ShopKind::Archery),
        "BC" => TileKind::Bank,
        "WF" => TileKind::Scenery(SceneryKind::WaterFountain),
        "Cart" => TileKind::Scenery(SceneryKind::Cart),
        "Anvil" => TileKind::Scenery(SceneryKind::Anvil),
        "ABarrel" => TileKind::Scenery(SceneryKind::ArcheryBarrel),
        "MBarrel" => TileKind::Scenery(SceneryKind::MiningBarrel),
        "Crate" => TileKind::Scenery(SceneryKind::Crate),
        "FStall" => TileKind::Scenery(SceneryKind::FurStall),
        "BStall" => TileKind::Scenery(SceneryKind::BakeryStall),
        "Chicken" | "Dog" | "Guard" => {
            let kind = match code {
                "Chicken" => NpcKind::Chicken,
                "Dog" => NpcKind::StrayDog,
                _ => NpcKind::Guard,
            };
            TileKind::Npc(Npc {
                kind,
                origin: position,
            })
        }
        other => return Err(CodeError::Unknown(other.to_string())),
    };
    Ok(kind)
}

fn parse_transport(code: &str) -> Result<TransportLink, CodeError> {
    let bad = |reason| CodeError::Transport {
        code: code.to_string(),
        reason,
    };
    let fields: Vec<&str> = code.split(':').collect();
    if !(4..=5).contains(&fields.len()) {
        return Err(bad("expected 4 or 5 colon-separated fields"));
    }
    let kind = TransportKind::from_code(fields[0]).ok_or_else(|| bad("not a transport tile"))?;
    let destination = fields[1].trim();
    if destination.is_empty() {
        return Err(bad("missing destination map"));
    }
    let x = fields[2]
        .trim()
        .parse()
        .map_err(|_| bad("destination x is not a number"))?;
    let y = fields[3]
        .trim()
        .parse()
        .map_err(|_| bad("destination y is not a number"))?;
    let requirements = match fields.get(4) {
        Some(reqs) => reqs.parse()?,
        None => SkillRequirements::default(),
    };
    Ok(TransportLink {
        kind,
        destination: destination.to_string(),
        target: Position::new(x, y),
        requirements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ss_core::SkillKind;

    fn parse(code: &str) -> Result<TileKind, CodeError> {
        tile_from_code(code, Position::new(3, 4), &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn blank_cells_are_empty() {
        assert_eq!(parse("").unwrap(), TileKind::Empty);
        assert_eq!(parse("  ").unwrap(), TileKind::Empty);
    }

    #[test]
    fn fixed_codes() {
        assert_eq!(parse("BC").unwrap(), TileKind::Bank);
        assert_eq!(parse("AS").unwrap(), TileKind::Shop(ShopKind::Archery));
        assert_eq!(
            parse("FStall").unwrap(),
            TileKind::Scenery(SceneryKind::FurStall)
        );
        match parse("C").unwrap() {
            TileKind::Node(node) => assert_eq!(node.kind(), NodeKind::CoalRock),
            other => panic!("expected a node, got {other:?}"),
        }
    }

    #[test]
    fn npcs_remember_their_origin() {
        match parse("Dog").unwrap() {
            TileKind::Npc(npc) => {
                assert_eq!(npc.kind, NpcKind::StrayDog);
                assert_eq!(npc.origin, Position::new(3, 4));
                assert_eq!(npc.kind.radius(), 100);
            }
            other => panic!("expected an NPC, got {other:?}"),
        }
    }

    #[test]
    fn transport_codes() {
        let TileKind::Transport(link) = parse("CEntrance:cave:5:1").unwrap() else {
            panic!("expected a transport");
        };
        assert_eq!(link.kind, TransportKind::CaveEntrance);
        assert_eq!(link.destination, "cave");
        assert_eq!(link.target, Position::new(5, 1));
        assert!(link.requirements.is_empty());

        let TileKind::Transport(link) = parse("LDown:lower_cave:2:3:mining(5) firemaking(10)").unwrap()
        else {
            panic!("expected a transport");
        };
        let reqs: Vec<_> = link.requirements.iter().copied().collect();
        assert_eq!(reqs, vec![(SkillKind::Mining, 5), (SkillKind::Firemaking, 10)]);
    }

    #[test]
    fn bad_codes_are_errors() {
        assert!(matches!(parse("Dragon"), Err(CodeError::Unknown(_))));
        assert!(matches!(parse("CEntrance:cave:5"), Err(CodeError::Transport { .. })));
        assert!(matches!(parse("Cart:cave:1:1"), Err(CodeError::Transport { .. })));
        assert!(matches!(parse("CExit:surface:a:1"), Err(CodeError::Transport { .. })));
        assert!(matches!(
            parse("CExit:surface:1:1:mining"),
            Err(CodeError::Requirement(_))
        ));
    }

    #[test]
    fn directions_parse() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("l".parse::<Direction>(), Ok(Direction::Left));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
