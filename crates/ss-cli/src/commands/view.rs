use std::path::Path;

use colored::Colorize;
use ss_world::render::LEGEND;
use ss_world::{render_map, render_window};

pub fn run(dir: &Path, map: Option<&str>, full: bool, legend: bool) -> Result<(), String> {
    let sim = super::start(dir, 42)?;
    let (player_map, player) = sim.player_location();
    let name = map.unwrap_or(&player_map);
    let grid = sim
        .atlas()
        .get(name)
        .ok_or_else(|| format!("no map named '{name}'"))?;

    println!(
        "  {} {}",
        grid.name().bold(),
        format!(
            "({}x{}, window {}x{}{})",
            grid.width(),
            grid.height(),
            grid.settings().window_width,
            grid.settings().window_height,
            if grid.settings().can_light_fires {
                ", fires allowed"
            } else {
                ""
            }
        )
        .dimmed()
    );
    println!();

    let text = if full || name != player_map {
        render_map(grid)
    } else {
        render_window(grid, player)
    };
    for line in text.lines() {
        println!("  {line}");
    }

    if legend {
        println!();
        for (glyph, meaning) in LEGEND {
            println!("  {glyph}  {meaning}");
        }
    }
    Ok(())
}
