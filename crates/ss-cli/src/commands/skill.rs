use colored::Colorize;
use comfy_table::Table;
use ss_core::SkillKind;
use ss_world::{SkillInfo, skill_info};

pub fn run(name: &str) -> Result<(), String> {
    let skill: SkillKind = name.parse().map_err(|e| format!("{e}"))?;
    print_info(&skill_info(skill));
    Ok(())
}

/// Print the tools a skill gates and what they work on.
pub fn print_info(info: &SkillInfo) {
    println!("  {}", info.skill.title().to_uppercase().bold());
    println!();

    let mut tools = Table::new();
    tools.set_header(vec![info.tools_heading, "Level"]);
    for (tool, level) in &info.tools {
        tools.add_row(vec![tool.title().to_string(), level.to_string()]);
    }
    println!("{tools}");

    let mut targets = Table::new();
    targets.set_header(vec![info.targets_heading, "Requires"]);
    for target in &info.targets {
        targets.add_row(vec![target.title, target.requirement.as_str()]);
    }
    println!("{targets}");
}
