//! Replay a script of player commands against the bundled world.
//!
//! One command per line; blank lines and lines starting with `#` are
//! skipped. Item names use underscores for spaces (`oak_log`).

use std::path::Path;

use colored::Colorize;
use ss_core::{ItemKind, SkillKind};
use ss_simulation::{Simulation, Surface};
use ss_world::{CraftAction, Direction, Harvest, Interaction, Position};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Move(Direction),
    Interact(Position),
    Tick(u64),
    Select(usize),
    Deposit(ItemKind, usize),
    DepositAll,
    Withdraw(ItemKind, usize),
    Sell(ItemKind, usize),
    Buy(ItemKind, usize),
    Sort,
    Inspect(usize),
    InspectStock(usize),
    Skill(SkillKind),
    Close,
    Status,
    View,
}

pub fn run(dir: &Path, script: &Path, seed: u64) -> Result<(), String> {
    let source = std::fs::read_to_string(script)
        .map_err(|e| format!("cannot read {}: {e}", script.display()))?;
    let steps = source
        .lines()
        .enumerate()
        .filter_map(|(n, line)| {
            parse_line(line)
                .map_err(|e| format!("{}:{}: {e}", script.display(), n + 1))
                .transpose()
                .map(|step| step.map(|s| (line.trim(), s)))
        })
        .collect::<Result<Vec<_>, String>>()?;

    let mut sim = super::start(dir, seed)?;
    for (line, step) in steps {
        println!("{} {}", ">".dimmed(), line);
        apply(&mut sim, step).map_err(|e| format!("simulation error: {e}"))?;
        if !sim.status().is_empty() {
            println!("  {}", sim.status().yellow());
        }
    }
    Ok(())
}

fn parse_line(line: &str) -> Result<Option<Step>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let arg = |i: usize| {
        words
            .get(i)
            .copied()
            .ok_or_else(|| format!("'{}' needs more arguments", words[0]))
    };
    let number = |i: usize| -> Result<usize, String> {
        let word = arg(i)?;
        word.parse()
            .map_err(|_| format!("'{word}' is not a number"))
    };
    let item = |i: usize| -> Result<ItemKind, String> {
        let word = arg(i)?;
        ItemKind::from_title(word).ok_or_else(|| format!("unknown item '{word}'"))
    };
    let amount = |i: usize| -> Result<usize, String> {
        match arg(i)? {
            "all" => Ok(usize::MAX),
            _ => number(i),
        }
    };

    let step = match words[0] {
        "up" | "down" | "left" | "right" => Step::Move(words[0].parse()?),
        "interact" => Step::Interact(Position::new(number(1)?, number(2)?)),
        "tick" => Step::Tick(match words.get(1) {
            Some(word) => word
                .parse()
                .map_err(|_| format!("'{word}' is not a number"))?,
            None => 1,
        }),
        "select" => Step::Select(number(1)?),
        "deposit" => Step::Deposit(item(1)?, amount(2)?),
        "deposit-all" => Step::DepositAll,
        "withdraw" => Step::Withdraw(item(1)?, amount(2)?),
        "sell" => Step::Sell(item(1)?, amount(2)?),
        "buy" => Step::Buy(item(1)?, amount(2)?),
        "sort" => Step::Sort,
        "inspect" => Step::Inspect(number(1)?),
        "inspect-stock" => Step::InspectStock(number(1)?),
        "skill" => Step::Skill(arg(1)?.parse().map_err(|e| format!("{e}"))?),
        "close" => Step::Close,
        "status" => Step::Status,
        "view" => Step::View,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(step))
}

/// Run one step. Rejections are part of play and only show in the status
/// line; only system failures end the script.
fn apply(sim: &mut Simulation, step: Step) -> ss_simulation::SimResult<()> {
    match step {
        Step::Move(direction) => {
            if !sim.move_player(direction) {
                println!("  {}", "blocked".dimmed());
            }
        }
        Step::Interact(target) => match sim.interact(target) {
            Ok(Interaction::OpenBank) => println!("  Opened the bank"),
            Ok(Interaction::OpenShop(_)) => {
                if let Surface::Shop(id) = sim.surface() {
                    let title = sim.shop(id).map_or("shop", |s| s.title());
                    println!("  Opened the {title}");
                }
            }
            Ok(Interaction::Travel { destination, .. }) => {
                println!("  Travelled to {destination}");
            }
            Ok(Interaction::Harvested(Harvest::Yielded { item, .. })) => {
                println!("  Got {}", item.to_string().green());
            }
            Ok(Interaction::Harvested(Harvest::Missed)) | Err(_) => {}
            Ok(Interaction::Inert) => println!("  {}", "Nothing happens".dimmed()),
        },
        Step::Tick(n) => sim.run(n)?,
        Step::Select(slot) => {
            if let Ok(Some(crafted)) = sim.select_slot(slot) {
                match crafted.action {
                    CraftAction::Remove => println!("  {}", "The log catches fire".yellow()),
                    CraftAction::Replace(made) => println!("  Made {}", made.to_string().green()),
                }
            }
        }
        Step::Deposit(kind, n) => print_transfer(sim.deposit(kind, n)),
        Step::DepositAll => {
            if let Ok(report) = sim.deposit_all() {
                for transfer in &report.deposited {
                    println!("  {transfer}");
                }
            }
        }
        Step::Withdraw(kind, n) => print_transfer(sim.withdraw(kind, n)),
        Step::Sell(kind, n) => print_transfer(sim.sell(kind, n)),
        Step::Buy(kind, n) => print_transfer(sim.buy(kind, n)),
        Step::Sort => {
            if sim.sort().is_ok() {
                println!("  Sorted");
            }
        }
        // Quotes and rejections both land in the status line.
        Step::Inspect(slot) => {
            let _quote = sim.inspect_item(slot);
        }
        Step::InspectStock(slot) => {
            let _quote = sim.inspect_stock(slot);
        }
        Step::Skill(skill) => super::skill::print_info(&sim.open_skill_info(skill)),
        Step::Close => sim.close_surface(),
        Step::Status => print_status(sim),
        Step::View => {
            for line in sim.view().lines() {
                println!("  {line}");
            }
        }
    }
    Ok(())
}

fn print_transfer(outcome: ss_core::Outcome<ss_core::Transfer>) {
    if let Ok(transfer) = outcome {
        println!("  {transfer}");
    }
}

fn print_status(sim: &Simulation) {
    let (map, position) = sim.player_location();
    println!("  Location: {map} {position}");
    let surface = match sim.surface() {
        Surface::Map(name) => format!("map {name}"),
        Surface::Bank => "bank".to_string(),
        Surface::Skill(skill) => format!("{skill} information"),
        Surface::Shop(id) => sim
            .shop(id)
            .map_or_else(|| "shop".to_string(), |s| s.title().to_string()),
    };
    println!("  Showing: {surface}");
    println!("  Tick: {}", sim.current_tick());
    println!("  Gold: {}g", sim.inventory().gold());
    let skills: Vec<String> = ss_core::SkillKind::ALL
        .iter()
        .map(|&s| format!("{s} {}", sim.skills().level(s)))
        .collect();
    println!("  Skills: {}", skills.join(", "));
    let items: Vec<String> = sim
        .inventory()
        .kinds_in_order()
        .into_iter()
        .map(|(kind, n)| format!("{n} x {kind}"))
        .collect();
    println!(
        "  Inventory ({}/{}): {}",
        sim.inventory().len(),
        sim.inventory().capacity(),
        if items.is_empty() {
            "empty".to_string()
        } else {
            items.join(", ")
        }
    );
    if !sim.bank().contents().is_empty() {
        let banked: Vec<String> = sim
            .bank()
            .contents()
            .into_iter()
            .map(|(kind, n)| format!("{n} x {kind}"))
            .collect();
        println!("  Bank: {}", banked.join(", "));
    }
}
