//! Using a tool on a resource in the inventory.

use ss_core::{
    ExperienceReport, Inventory, Item, ItemKind, Outcome, Rejection, ResourceClass, SkillSet,
    ToolFamily, XpAccounting,
};

use crate::map::GridMap;

/// What happened to the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftAction {
    /// The resource was used up.
    Remove,
    /// The resource became this item, in the same slot.
    Replace(ItemKind),
}

/// A successful combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crafted {
    /// What was done.
    pub action: CraftAction,
    /// Experience credited for the action.
    pub experience: ExperienceReport,
}

/// Check whether `tool` can work `resource` on this map, without changing
/// anything. Rejections come in a fixed order: wrong resource, tool skill,
/// resource skill, then surroundings.
pub fn resolve(
    tool: ItemKind,
    resource: ItemKind,
    skills: &SkillSet,
    map: &GridMap,
) -> Outcome<CraftAction> {
    let Some(spec) = tool.tool() else {
        return Err(Rejection::NotToolAndResource);
    };
    let is_log = resource.resource_class() == Some(ResourceClass::Log);
    match spec.family {
        ToolFamily::Tinderbox => {
            if !is_log {
                return Err(Rejection::WrongResource { tool: "tinderbox" });
            }
            if !skills.can_use(tool) {
                return Err(Rejection::ToolSkillTooLow { tool: "tinderbox" });
            }
            if !skills.can_burn(resource) {
                return Err(Rejection::ProcessSkillTooLow { verb: "burn" });
            }
            if !map.can_light_fire() {
                return Err(Rejection::NoFireHere);
            }
            Ok(CraftAction::Remove)
        }
        ToolFamily::Knife => {
            if !is_log {
                return Err(Rejection::WrongResource { tool: "knife" });
            }
            if !skills.can_use(tool) {
                return Err(Rejection::ToolSkillTooLow { tool: "knife" });
            }
            if !skills.can_fletch(resource) {
                return Err(Rejection::ProcessSkillTooLow { verb: "fletch" });
            }
            resource
                .log()
                .map(|log| CraftAction::Replace(log.shortbow))
                .ok_or(Rejection::WrongResource { tool: "knife" })
        }
        ToolFamily::Axe | ToolFamily::Pickaxe => Err(Rejection::UnknownToolUse),
    }
}

/// Use the tool in `tool_slot` on the resource in `resource_slot`.
///
/// Burning a log lights a fire under the player and grants processing
/// experience; carving one swaps it for a bow in place and grants
/// generation experience for the bow.
///
/// # Panics
///
/// Panics if either slot is empty.
pub fn combine(
    inventory: &mut Inventory,
    tool_slot: usize,
    resource_slot: usize,
    skills: &mut SkillSet,
    map: &mut GridMap,
) -> Outcome<Crafted> {
    let (Some(tool), Some(resource)) = (inventory.kind_at(tool_slot), inventory.kind_at(resource_slot))
    else {
        panic!("combine needs two occupied slots");
    };
    let action = resolve(tool, resource, skills, map)?;
    inventory.take(resource_slot);
    let experience = match action {
        CraftAction::Remove => {
            let ticks = resource.log().map_or(1, |log| log.fire_ticks);
            map.light_fire(ticks);
            skills.award(&[resource], XpAccounting::Processing)
        }
        CraftAction::Replace(made) => {
            inventory.put(resource_slot, Item::new(made));
            skills.award(&[made], XpAccounting::Generation)
        }
    };
    tracing::debug!(%tool, %resource, ?action, "crafted");
    Ok(Crafted { action, experience })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapSettings;
    use crate::tile::{Position, TileKind};

    fn map(can_light_fires: bool) -> GridMap {
        let mut map = GridMap::new(
            "field",
            MapSettings {
                width: 3,
                height: 1,
                window_width: 1,
                window_height: 1,
                can_light_fires,
                background_color: "green".into(),
            },
            vec![TileKind::Empty; 3],
        );
        map.insert_player(Position::new(0, 0));
        map
    }

    fn inventory_with(kinds: &[ItemKind]) -> Inventory {
        let mut inventory = Inventory::with_starter_kit(28, 0);
        inventory.add(kinds.iter().map(|k| Item::new(*k)).collect());
        inventory
    }

    #[test]
    fn burning_an_oak_log() {
        let mut map = map(true);
        let mut skills = SkillSet::new();
        let mut inventory = inventory_with(&[ItemKind::OakLog]);
        let crafted = combine(&mut inventory, 2, 4, &mut skills, &mut map).unwrap();
        assert_eq!(crafted.action, CraftAction::Remove);
        assert_eq!(inventory.kind_at(4), None);
        assert_eq!(map.player(), Some(Position::new(1, 0)));
        assert_eq!(
            map.tile(Position::new(0, 0)).unwrap().kind,
            TileKind::Fire { ticks_left: 10 }
        );
        assert_eq!(skills.get(ss_core::SkillKind::Firemaking).experience(), 61);
    }

    #[test]
    fn low_firemaking_keeps_the_log() {
        let mut map = map(true);
        let mut skills = SkillSet::new();
        let mut inventory = inventory_with(&[ItemKind::WillowLog]);
        assert_eq!(
            combine(&mut inventory, 2, 4, &mut skills, &mut map),
            Err(Rejection::ProcessSkillTooLow { verb: "burn" })
        );
        assert_eq!(inventory.kind_at(4), Some(ItemKind::WillowLog));
        assert_eq!(map.player(), Some(Position::new(0, 0)));
    }

    #[test]
    fn no_fires_in_caves() {
        let mut map = map(false);
        let mut inventory = inventory_with(&[ItemKind::OakLog]);
        assert_eq!(
            combine(&mut inventory, 2, 4, &mut SkillSet::new(), &mut map),
            Err(Rejection::NoFireHere)
        );
        assert_eq!(inventory.kind_at(4), Some(ItemKind::OakLog));
    }

    #[test]
    fn fletching_replaces_in_place() {
        let mut map = map(false);
        let mut skills = SkillSet::new();
        let mut inventory = inventory_with(&[ItemKind::OakLog]);
        let crafted = combine(&mut inventory, 3, 4, &mut skills, &mut map).unwrap();
        assert_eq!(crafted.action, CraftAction::Replace(ItemKind::OakShortbow));
        assert_eq!(inventory.kind_at(4), Some(ItemKind::OakShortbow));
        assert_eq!(skills.get(ss_core::SkillKind::Fletching).experience(), 31);
    }

    #[test]
    fn rejection_order() {
        let map = map(true);
        let skills = SkillSet::new();
        assert_eq!(
            resolve(ItemKind::Tinderbox, ItemKind::IronOre, &skills, &map),
            Err(Rejection::WrongResource { tool: "tinderbox" })
        );
        assert_eq!(
            resolve(ItemKind::Knife, ItemKind::MagicLog, &skills, &map),
            Err(Rejection::ProcessSkillTooLow { verb: "fletch" })
        );
        assert_eq!(
            resolve(ItemKind::CopperAxe, ItemKind::OakLog, &skills, &map),
            Err(Rejection::UnknownToolUse)
        );
        assert_eq!(
            Rejection::WrongResource { tool: "knife" }.to_string(),
            "You can only use a knife on a log"
        );
    }
}
