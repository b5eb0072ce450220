use comfy_table::{ContentArrangement, Table};
use ss_core::{ItemCategory, ItemKind, SkillKind};

pub fn run(category: Option<&str>) -> Result<(), String> {
    let filter = category.map(parse_category).transpose()?;
    let kinds: Vec<ItemKind> = ItemKind::ALL
        .iter()
        .copied()
        .filter(|k| filter.is_none_or(|c| k.category() == c))
        .collect();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Category", "Sell", "Buy", "Requires", "Description"]);
    for kind in &kinds {
        table.add_row(vec![
            kind.title().to_string(),
            format!("{:?}", kind.category()),
            format!("{}g", kind.sell_price()),
            format!("{}g", kind.buy_price()),
            requirement(*kind),
            kind.description().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} items", kinds.len());
    Ok(())
}

fn parse_category(name: &str) -> Result<ItemCategory, String> {
    match name.to_lowercase().as_str() {
        "tool" | "tools" => Ok(ItemCategory::Tool),
        "resource" | "resources" => Ok(ItemCategory::Resource),
        "weapon" | "weapons" => Ok(ItemCategory::Weapon),
        other => Err(format!(
            "unknown category '{other}' (expected tool, resource or weapon)"
        )),
    }
}

fn requirement(kind: ItemKind) -> String {
    if let (Some(spec), Some(skill)) = (kind.tool(), SkillKind::for_tool(kind)) {
        return format!("{skill} {}", spec.skill_level_required);
    }
    if let Some(log) = kind.log() {
        return format!(
            "Fletching {} / Firemaking {}",
            log.fletching_required, log.firemaking_required
        );
    }
    "-".to_string()
}
