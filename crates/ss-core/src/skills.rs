//! The skill ledger: experience, levels, and the gates they open.
//!
//! Each skill follows the same doubling curve. Experience starts at 1 and
//! the first threshold is 100; every level crossed doubles the threshold.
//! Which skill an item feeds is a table lookup on [`SkillKind`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemKind, ToolFamily};

const FIRST_THRESHOLD: u64 = 100;

/// One of the four trainable skills. `ALL` fixes the order in which batched
/// experience is applied and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    /// Rocks into ore.
    Mining,
    /// Trees into logs.
    Woodcutting,
    /// Burning logs.
    Firemaking,
    /// Carving logs into bows.
    Fletching,
}

impl SkillKind {
    /// Every skill in reporting order.
    pub const ALL: [SkillKind; 4] = [
        Self::Mining,
        Self::Woodcutting,
        Self::Firemaking,
        Self::Fletching,
    ];

    /// Display name, e.g. `"Woodcutting"`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Mining => "Mining",
            Self::Woodcutting => "Woodcutting",
            Self::Firemaking => "Firemaking",
            Self::Fletching => "Fletching",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Mining => 0,
            Self::Woodcutting => 1,
            Self::Firemaking => 2,
            Self::Fletching => 3,
        }
    }

    /// Tools whose use is gated by this skill.
    pub fn relevant_tools(self) -> &'static [ItemKind] {
        match self {
            Self::Mining => &[
                ItemKind::CopperPickaxe,
                ItemKind::SteelPickaxe,
                ItemKind::MithrilPickaxe,
                ItemKind::AdamantPickaxe,
            ],
            Self::Woodcutting => &[
                ItemKind::CopperAxe,
                ItemKind::SteelAxe,
                ItemKind::MithrilAxe,
                ItemKind::AdamantAxe,
            ],
            Self::Firemaking => &[ItemKind::Tinderbox],
            Self::Fletching => &[ItemKind::Knife],
        }
    }

    /// Experience for producing one `kind` (gathering or crafting it).
    pub fn generation_xp(self, kind: ItemKind) -> Option<u64> {
        use ItemKind::*;
        let xp = match (self, kind) {
            (Self::Mining, CopperOre | TinOre) => 40,
            (Self::Mining, CoalOre) => 100,
            (Self::Mining, IronOre) => 120,
            (Self::Mining, GoldOre) => 200,
            (Self::Woodcutting, OakLog) => 50,
            (Self::Woodcutting, WillowLog) => 150,
            (Self::Woodcutting, MapleLog) => 400,
            (Self::Woodcutting, YewLog) => 600,
            (Self::Woodcutting, MagicLog) => 1000,
            (Self::Fletching, OakShortbow) => 30,
            (Self::Fletching, WillowShortbow) => 100,
            (Self::Fletching, MapleShortbow) => 250,
            (Self::Fletching, YewShortbow) => 400,
            (Self::Fletching, MagicShortbow) => 600,
            _ => return None,
        };
        Some(xp)
    }

    /// Experience for consuming one `kind`.
    pub fn processing_xp(self, kind: ItemKind) -> Option<u64> {
        use ItemKind::*;
        let xp = match (self, kind) {
            (Self::Firemaking, OakLog) => 60,
            (Self::Firemaking, WillowLog) => 100,
            (Self::Firemaking, MapleLog) => 250,
            (Self::Firemaking, YewLog) => 500,
            (Self::Firemaking, MagicLog) => 750,
            _ => return None,
        };
        Some(xp)
    }

    /// Experience for `kind` under the given accounting.
    pub fn experience_for(self, kind: ItemKind, accounting: XpAccounting) -> Option<u64> {
        match accounting {
            XpAccounting::Generation => self.generation_xp(kind),
            XpAccounting::Processing => self.processing_xp(kind),
        }
    }

    /// The skill that gates every tool of `family`.
    pub fn for_family(family: ToolFamily) -> SkillKind {
        match family {
            ToolFamily::Pickaxe => Self::Mining,
            ToolFamily::Axe => Self::Woodcutting,
            ToolFamily::Tinderbox => Self::Firemaking,
            ToolFamily::Knife => Self::Fletching,
        }
    }

    /// The skill that gates `tool`, if it is a tool at all.
    pub fn for_tool(tool: ItemKind) -> Option<SkillKind> {
        tool.tool().map(|spec| Self::for_family(spec.family))
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A skill name that matches none of the four skills.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown skill: \"{0}\"")]
pub struct UnknownSkill(pub String);

impl FromStr for SkillKind {
    type Err = UnknownSkill;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.title().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSkill(s.to_string()))
    }
}

/// Whether experience is credited for making an item or for using one up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpAccounting {
    /// Credited when the item is produced.
    Generation,
    /// Credited when the item is consumed.
    Processing,
}

/// Level and experience in a single skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    level: u32,
    experience: u64,
    next_level_experience: u64,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 1,
            next_level_experience: FIRST_THRESHOLD,
        }
    }
}

impl Skill {
    /// Current level, starting at 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total experience earned.
    pub fn experience(&self) -> u64 {
        self.experience
    }

    /// Experience at which the next level is reached.
    pub fn next_level_experience(&self) -> u64 {
        self.next_level_experience
    }

    /// Add experience and return every level reached by this addition.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is zero.
    pub fn add_experience(&mut self, amount: u64) -> Vec<u32> {
        assert!(amount > 0, "experience must be positive");
        self.experience += amount;
        let mut crossed = Vec::new();
        while self.experience >= self.next_level_experience {
            self.level += 1;
            self.next_level_experience *= 2;
            crossed.push(self.level);
        }
        crossed
    }
}

/// Levels gained in one skill by one award.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    /// The skill that leveled.
    pub skill: SkillKind,
    /// Every level reached, lowest first.
    pub levels: Vec<u32>,
    /// Tools whose required level is exactly one of `levels`.
    pub unlocked: Vec<ItemKind>,
}

impl fmt::Display for LevelUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.levels.len();
        write!(
            f,
            "{n} {} level{} gained. ",
            self.skill,
            if n > 1 { "s" } else { "" }
        )?;
        if !self.unlocked.is_empty() {
            let titles: Vec<&str> = self.unlocked.iter().map(|k| k.title()).collect();
            write!(
                f,
                "Tool{} unlocked: {}",
                if titles.len() > 1 { "s" } else { "" },
                titles.join(", ")
            )?;
        }
        Ok(())
    }
}

/// What a batched award did, skill by skill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceReport {
    /// Experience credited per skill, in skill order. Skills with nothing
    /// credited are absent.
    pub gained: Vec<(SkillKind, u64)>,
    /// Skills that gained a level, if any.
    pub level_ups: Vec<LevelUp>,
}

impl ExperienceReport {
    /// Whether any skill gained a level.
    pub fn leveled(&self) -> bool {
        !self.level_ups.is_empty()
    }
}

impl fmt::Display for ExperienceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for up in &self.level_ups {
            write!(f, "{up}")?;
        }
        Ok(())
    }
}

/// The player's four skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    skills: [Skill; 4],
}

impl SkillSet {
    /// All four skills at level 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// One skill's progress.
    pub fn get(&self, kind: SkillKind) -> &Skill {
        &self.skills[kind.index()]
    }

    /// Shorthand for `get(kind).level()`.
    pub fn level(&self, kind: SkillKind) -> u32 {
        self.get(kind).level
    }

    /// Credit experience for a batch of items.
    ///
    /// Each skill receives the sum for the whole batch in one update, so a
    /// level-up message for one skill never sees another skill mid-update.
    pub fn award(&mut self, items: &[ItemKind], accounting: XpAccounting) -> ExperienceReport {
        let mut report = ExperienceReport::default();
        for kind in SkillKind::ALL {
            let total: u64 = items
                .iter()
                .filter_map(|item| kind.experience_for(*item, accounting))
                .sum();
            if total == 0 {
                continue;
            }
            report.gained.push((kind, total));
            let levels = self.skills[kind.index()].add_experience(total);
            if levels.is_empty() {
                continue;
            }
            let unlocked = kind
                .relevant_tools()
                .iter()
                .copied()
                .filter(|tool| {
                    tool.tool()
                        .is_some_and(|spec| levels.contains(&spec.skill_level_required))
                })
                .collect();
            tracing::info!(skill = %kind, ?levels, "level up");
            report.level_ups.push(LevelUp {
                skill: kind,
                levels,
                unlocked,
            });
        }
        report
    }

    /// Whether the player is skilled enough to wield `tool`.
    pub fn can_use(&self, tool: ItemKind) -> bool {
        match (SkillKind::for_tool(tool), tool.tool()) {
            (Some(skill), Some(spec)) => self.level(skill) >= spec.skill_level_required,
            _ => false,
        }
    }

    /// Whether the firemaking level covers burning `log`.
    pub fn can_burn(&self, log: ItemKind) -> bool {
        log.log()
            .is_some_and(|spec| self.level(SkillKind::Firemaking) >= spec.firemaking_required)
    }

    /// Whether the fletching level covers carving `log`.
    pub fn can_fletch(&self, log: ItemKind) -> bool {
        log.log()
            .is_some_and(|spec| self.level(SkillKind::Fletching) >= spec.fletching_required)
    }

    /// True when every listed skill is at or above its minimum.
    pub fn meets_requirements(&self, requirements: &SkillRequirements) -> bool {
        requirements
            .iter()
            .all(|(skill, level)| self.level(*skill) >= *level)
    }
}

/// A malformed `skill(level)` token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequirementError {
    /// The token is not `name(level)`.
    #[error("requirement \"{0}\" is not of the form name(level)")]
    Malformed(String),
    /// The name is not a skill.
    #[error(transparent)]
    UnknownSkill(#[from] UnknownSkill),
}

/// Minimum skill levels, as written on a transport link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirements(Vec<(SkillKind, u32)>);

impl SkillRequirements {
    /// Requirements from explicit pairs.
    pub fn new(entries: Vec<(SkillKind, u32)>) -> Self {
        Self(entries)
    }

    /// True when nothing is required.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Skill and minimum level pairs, in written order.
    pub fn iter(&self) -> impl Iterator<Item = &(SkillKind, u32)> {
        self.0.iter()
    }
}

fn parse_token(token: &str) -> Result<(SkillKind, u32), RequirementError> {
    let malformed = || RequirementError::Malformed(token.to_string());
    let (name, rest) = token.split_once('(').ok_or_else(malformed)?;
    let digits = rest.strip_suffix(')').ok_or_else(malformed)?;
    let name_ok = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    let digits_ok = (1..=2).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    if !name_ok || !digits_ok {
        return Err(malformed());
    }
    let level = digits.parse().map_err(|_| malformed())?;
    Ok((name.parse()?, level))
}

impl FromStr for SkillRequirements {
    type Err = RequirementError;

    /// Parse space-separated `name(level)` tokens. An empty string means no
    /// requirements.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for SkillRequirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self
            .0
            .iter()
            .map(|(skill, level)| format!("{skill}({level})"))
            .collect();
        f.write_str(&tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fresh_skill() {
        let skill = Skill::default();
        assert_eq!(skill.level(), 1);
        assert_eq!(skill.experience(), 1);
        assert_eq!(skill.next_level_experience(), 100);
    }

    #[test]
    fn ninety_eight_xp_stays_level_one() {
        let mut skill = Skill::default();
        assert!(skill.add_experience(98).is_empty());
        assert_eq!(skill.level(), 1);
        assert_eq!(skill.experience(), 99);
    }

    #[test]
    fn reaching_the_threshold_levels_up_and_doubles_it() {
        let mut skill = Skill::default();
        skill.add_experience(98);
        // 99 total is one short; the next point lands exactly on 100.
        assert_eq!(skill.add_experience(1), vec![2]);
        assert_eq!(skill.level(), 2);
        assert_eq!(skill.experience(), 100);
        assert_eq!(skill.next_level_experience(), 200);
        assert!(skill.add_experience(99).is_empty());
        assert_eq!(skill.add_experience(1), vec![3]);
    }

    #[test]
    fn large_award_reports_every_level() {
        let mut skill = Skill::default();
        // 1001 total passes 100, 200, 400 and 800.
        assert_eq!(skill.add_experience(1000), vec![2, 3, 4, 5]);
        assert_eq!(skill.next_level_experience(), 1600);
    }

    #[test]
    #[should_panic(expected = "experience must be positive")]
    fn zero_experience_is_a_contract_breach() {
        Skill::default().add_experience(0);
    }

    #[test]
    fn tool_gating() {
        let mut skills = SkillSet::new();
        assert!(skills.can_use(ItemKind::CopperAxe));
        assert!(skills.can_use(ItemKind::Tinderbox));
        assert!(!skills.can_use(ItemKind::SteelAxe));
        assert!(!skills.can_use(ItemKind::OakLog));

        // Six willow logs bring woodcutting to 901 experience, level 5.
        skills.award(&[ItemKind::WillowLog; 6], XpAccounting::Generation);
        assert_eq!(skills.level(SkillKind::Woodcutting), 5);
        assert!(skills.can_use(ItemKind::SteelAxe));
        assert!(!skills.can_use(ItemKind::SteelPickaxe));
    }

    #[test]
    fn every_tool_is_claimed_by_its_family_skill() {
        for skill in SkillKind::ALL {
            for tool in skill.relevant_tools() {
                assert_eq!(SkillKind::for_tool(*tool), Some(skill));
            }
        }
        assert_eq!(SkillKind::for_tool(ItemKind::OakLog), None);
    }

    #[test]
    fn burn_and_fletch_gates() {
        let skills = SkillSet::new();
        assert!(skills.can_burn(ItemKind::OakLog));
        assert!(!skills.can_burn(ItemKind::WillowLog));
        assert!(skills.can_fletch(ItemKind::OakLog));
        assert!(!skills.can_fletch(ItemKind::MagicLog));
        assert!(!skills.can_burn(ItemKind::IronOre));
    }

    #[test]
    fn award_reports_unlocks() {
        let mut skills = SkillSet::new();
        // 601 experience reaches level 4 without unlocking anything.
        let report = skills.award(&[ItemKind::YewLog], XpAccounting::Generation);
        assert_eq!(report.to_string(), "3 Woodcutting levels gained. ");
        let report = skills.award(&[ItemKind::MagicLog], XpAccounting::Generation);
        // 1601 crosses 800 and 1600: levels 5 and 6.
        assert_eq!(
            report.to_string(),
            "2 Woodcutting levels gained. Tool unlocked: Steel Axe"
        );
    }

    #[test]
    fn batch_awards_each_skill_once_in_order() {
        let mut skills = SkillSet::new();
        let report = skills.award(
            &[ItemKind::OakLog, ItemKind::CopperOre, ItemKind::OakLog],
            XpAccounting::Generation,
        );
        assert_eq!(
            report.gained,
            vec![(SkillKind::Mining, 40), (SkillKind::Woodcutting, 100)]
        );
        assert_eq!(report.to_string(), "1 Woodcutting level gained. ");
        assert_eq!(skills.get(SkillKind::Woodcutting).experience(), 101);
    }

    #[test]
    fn processing_only_feeds_firemaking() {
        let mut skills = SkillSet::new();
        let report = skills.award(&[ItemKind::OakLog], XpAccounting::Processing);
        assert_eq!(report.gained, vec![(SkillKind::Firemaking, 60)]);
        assert!(!report.leveled());
    }

    #[test]
    fn skill_names_parse_case_insensitively() {
        assert_eq!("mining".parse::<SkillKind>(), Ok(SkillKind::Mining));
        assert_eq!("FLETCHING".parse::<SkillKind>(), Ok(SkillKind::Fletching));
        assert!("cooking".parse::<SkillKind>().is_err());
    }

    #[test]
    fn requirements_parse_and_gate() {
        let reqs: SkillRequirements = "mining(5) Woodcutting(10)".parse().unwrap();
        assert_eq!(reqs.to_string(), "Mining(5) Woodcutting(10)");
        assert!(!SkillSet::new().meets_requirements(&reqs));

        let none: SkillRequirements = "".parse().unwrap();
        assert!(none.is_empty());
        assert!(SkillSet::new().meets_requirements(&none));
    }

    #[test]
    fn requirements_reject_bad_tokens() {
        for bad in ["Mining", "Mining(5", "Mining(123)", "Mining(x)", "(5)"] {
            assert!(
                matches!(
                    bad.parse::<SkillRequirements>(),
                    Err(RequirementError::Malformed(_))
                ),
                "{bad} should be malformed"
            );
        }
        assert!(matches!(
            "Cooking(5)".parse::<SkillRequirements>(),
            Err(RequirementError::UnknownSkill(_))
        ));
    }

    proptest! {
        #[test]
        fn level_always_matches_threshold(awards in prop::collection::vec(1u64..5_000, 0..20)) {
            let mut skill = Skill::default();
            let mut reported = 0usize;
            for amount in awards {
                reported += skill.add_experience(amount).len();
            }
            prop_assert_eq!(
                skill.next_level_experience(),
                FIRST_THRESHOLD << (skill.level() - 1)
            );
            prop_assert!(skill.experience() < skill.next_level_experience());
            prop_assert!(skill.experience() >= skill.next_level_experience() / 2 || skill.level() == 1);
            prop_assert_eq!(reported, (skill.level() - 1) as usize);
        }
    }
}
