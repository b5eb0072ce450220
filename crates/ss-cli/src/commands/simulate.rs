use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ss_simulation::SimEventKind;

pub fn run(dir: &Path, ticks: u64, seed: u64, events: bool) -> Result<(), String> {
    let mut sim = super::start(dir, seed)?;
    sim.run(ticks).map_err(|e| format!("simulation error: {e}"))?;

    println!(
        "  {} {}",
        "Simulation".bold(),
        format!("({ticks} ticks, seed={seed})").dimmed()
    );
    println!(
        "  {} maps simulated, {} events logged",
        sim.atlas().len(),
        sim.events().len()
    );
    println!();

    if events {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in sim.events().iter() {
            let tick_label = format!("[tick {:>3}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if sim.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    }

    let mut counts: BTreeMap<&str, BTreeMap<&'static str, usize>> = BTreeMap::new();
    let names: Vec<&str> = sim.atlas().names().collect();
    for name in &names {
        let row = counts.entry(*name).or_default();
        for event in sim.events().on_map(name) {
            *row.entry(label(&event.kind)).or_default() += 1;
        }
    }

    let columns = ["NPC moves", "Regrown", "Fires out"];
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Map"];
    header.extend(columns);
    table.set_header(header);
    for (name, row) in &counts {
        let mut cells = vec![name.to_string()];
        cells.extend(
            columns
                .iter()
                .map(|c| row.get(c).copied().unwrap_or(0).to_string()),
        );
        table.add_row(cells);
    }
    println!("{table}");
    Ok(())
}

fn label(kind: &SimEventKind) -> &'static str {
    match kind {
        SimEventKind::NpcMoved { .. } => "NPC moves",
        SimEventKind::NodeRegenerated { .. } => "Regrown",
        SimEventKind::FireBurnedOut { .. } => "Fires out",
        SimEventKind::NodeDepleted { .. } => "Depleted",
        SimEventKind::FireLit { .. } => "Fires lit",
        SimEventKind::LevelUp { .. } => "Level ups",
        SimEventKind::PlayerTransported { .. } => "Transports",
        SimEventKind::ItemsTransferred { .. } => "Transfers",
    }
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::NodeDepleted { .. } => description.red(),
        SimEventKind::NodeRegenerated { .. } => description.green(),
        SimEventKind::NpcMoved { .. } => description.normal(),
        SimEventKind::FireLit { .. } | SimEventKind::FireBurnedOut { .. } => description.yellow(),
        SimEventKind::LevelUp { .. } => description.cyan().bold(),
        SimEventKind::PlayerTransported { .. } => description.blue(),
        SimEventKind::ItemsTransferred { .. } => description.magenta(),
    }
}
