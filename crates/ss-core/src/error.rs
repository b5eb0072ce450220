/// Alias for `Result<T, Rejection>`.
pub type Outcome<T> = Result<T, Rejection>;

/// An expected, recoverable refusal of a player action.
///
/// The `Display` text is the status message shown to the player. A rejected
/// operation leaves the world and the economy untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The inventory has no free slot. The payload names what was attempted.
    #[error("Inventory full - cannot {0}")]
    InventoryFull(&'static str),

    /// The bank has neither a slot for the kind nor an empty slot.
    #[error("Bank is full - cannot deposit")]
    BankFull,

    /// The shop has neither a slot for the kind nor an empty slot.
    #[error("Shop has no space for a new item type - cannot sell")]
    ShopFull,

    /// The pouch does not cover a single unit.
    #[error("Cannot afford to buy any of this item")]
    CannotAfford,

    /// The source holds none of the requested kind.
    #[error("There is no {0} here to move")]
    NothingToTransfer(String),

    /// A transfer was asked for zero items.
    #[error("Choose at least one item to move")]
    ZeroAmount,

    /// The player is not orthogonally adjacent to the target tile.
    #[error("Player not within one tile to interact - try moving closer")]
    OutOfReach,

    /// The resource node is depleted.
    #[error("Wait for it to regenerate!")]
    NodeDepleted,

    /// No wieldable tool of the needed family and strength is carried.
    #[error(
        "No tool available for interaction! Check your inventory and that you have the required skill level for the right strength tool"
    )]
    NoUsableTool,

    /// A transport link's skill gate is not met.
    #[error("You don't have the skill requirements to enter here: {0}")]
    SkillRequirements(String),

    /// The landing tile of a transport is occupied.
    #[error(
        "Cannot move to this map - something is on the tile you're trying to move to! Try again in a second"
    )]
    LandingOccupied,

    /// A transport points at a map that is not loaded.
    #[error("There is no map called {0}")]
    UnknownMap(String),

    /// A tool was used on a resource it cannot work.
    #[error("You can only use a {tool} on a log")]
    WrongResource {
        /// Lower-case tool title.
        tool: &'static str,
    },

    /// The player cannot wield the tool.
    #[error("You don't have the skill level to use this {tool}")]
    ToolSkillTooLow {
        /// Lower-case tool title.
        tool: &'static str,
    },

    /// The player cannot process this tier of resource.
    #[error("You don't have the skill level to {verb} this log")]
    ProcessSkillTooLow {
        /// What the tool does to the log.
        verb: &'static str,
    },

    /// Fire cannot be lit at the player's position.
    #[error("You cannot light a fire here")]
    NoFireHere,

    /// A tool with no crafting use was combined with a resource.
    #[error("You don't know how to use this tool on any resource")]
    UnknownToolUse,

    /// Two selected items are not a tool and a resource.
    #[error("Try using a tool on a resource instead")]
    NotToolAndResource,

    /// An empty slot was inspected.
    #[error("There is nothing in that slot")]
    EmptySlot,

    /// A bank or shop command arrived while that surface was not shown.
    #[error("The {0} is not open")]
    NotOpen(&'static str),
}
