//! The skill information screen: which tools a skill gates and what they
//! work on.

use ss_core::{ItemKind, SkillKind};

use crate::node::NodeKind;

/// Something a skill's tools work on, with what it takes to do so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTarget {
    /// Tree, rock or log title.
    pub title: &'static str,
    /// The weakest tool that works on a node (`"Steel Axe"`), or the level
    /// needed to process a log (`"Level 5"`).
    pub requirement: String,
}

/// Everything the information screen shows for one skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInfo {
    /// The skill described.
    pub skill: SkillKind,
    /// Heading over the tool list, e.g. `"Axes"`.
    pub tools_heading: &'static str,
    /// Each gated tool with the level needed to wield it, weakest first.
    pub tools: Vec<(ItemKind, u32)>,
    /// Heading over the target list: `"Trees"`, `"Rocks"` or `"Logs"`.
    pub targets_heading: &'static str,
    /// What the tools work on, weakest first.
    pub targets: Vec<SkillTarget>,
}

/// Build the information screen for `skill` from the item and node tables.
pub fn skill_info(skill: SkillKind) -> SkillInfo {
    let tools = skill
        .relevant_tools()
        .iter()
        .filter_map(|&tool| Some((tool, tool.tool()?.skill_level_required)))
        .collect();

    let (tools_heading, targets_heading, targets) = match skill {
        SkillKind::Mining => ("Pickaxes", "Rocks", node_targets(skill)),
        SkillKind::Woodcutting => ("Axes", "Trees", node_targets(skill)),
        SkillKind::Firemaking => (
            "Tinderboxes",
            "Logs",
            log_targets(|log| log.log().map(|spec| spec.firemaking_required)),
        ),
        SkillKind::Fletching => (
            "Knives",
            "Logs",
            log_targets(|log| log.log().map(|spec| spec.fletching_required)),
        ),
    };

    SkillInfo {
        skill,
        tools_heading,
        tools,
        targets_heading,
        targets,
    }
}

fn node_targets(skill: SkillKind) -> Vec<SkillTarget> {
    NodeKind::ALL
        .iter()
        .filter(|node| SkillKind::for_family(node.tool_family()) == skill)
        .map(|&node| {
            let weakest = skill
                .relevant_tools()
                .iter()
                .find(|tool| tool.tool().and_then(|spec| spec.tier) == Some(node.min_tier()));
            SkillTarget {
                title: node.title(),
                requirement: weakest.map_or_else(String::new, |tool| tool.title().to_string()),
            }
        })
        .collect()
}

fn log_targets(level: impl Fn(ItemKind) -> Option<u32>) -> Vec<SkillTarget> {
    ItemKind::ALL
        .iter()
        .filter_map(|&log| {
            Some(SkillTarget {
                title: log.title(),
                requirement: format!("Level {}", level(log)?),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn woodcutting_lists_axes_and_trees() {
        let info = skill_info(SkillKind::Woodcutting);
        assert_eq!(info.tools_heading, "Axes");
        assert_eq!(
            info.tools,
            vec![
                (ItemKind::CopperAxe, 1),
                (ItemKind::SteelAxe, 5),
                (ItemKind::MithrilAxe, 10),
                (ItemKind::AdamantAxe, 12),
            ]
        );
        assert_eq!(info.targets_heading, "Trees");
        assert_eq!(info.targets.len(), 5);
        assert_eq!(info.targets[0].title, "Oak Tree");
        assert_eq!(info.targets[0].requirement, "Copper Axe");
        assert_eq!(info.targets[1].requirement, "Steel Axe");
    }

    #[test]
    fn mining_lists_rocks_only() {
        let info = skill_info(SkillKind::Mining);
        assert_eq!(info.tools_heading, "Pickaxes");
        let titles: Vec<&str> = info.targets.iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            ["Copper Rock", "Tin Rock", "Coal Rock", "Iron Rock", "Gold Rock"]
        );
        assert!(info.targets.iter().all(|t| t.requirement.ends_with("Pickaxe")));
    }

    #[test]
    fn log_skills_show_levels() {
        let fire = skill_info(SkillKind::Firemaking);
        assert_eq!(fire.tools, vec![(ItemKind::Tinderbox, 1)]);
        assert_eq!(fire.targets_heading, "Logs");
        assert_eq!(fire.targets[1].title, "Willow Log");
        assert_eq!(fire.targets[1].requirement, "Level 5");

        let fletch = skill_info(SkillKind::Fletching);
        assert_eq!(fletch.tools_heading, "Knives");
        assert_eq!(fletch.targets[1].requirement, "Level 4");
    }
}
