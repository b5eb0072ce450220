//! Integration tests for the CLI commands.
#![allow(deprecated)] // Command::cargo_bin - macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The sample maps shipped with the repository.
fn bundled_maps() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../maps")
}

/// A 3x3 surface with a cave entrance beside the start and a 1x1 cave.
fn tiny_world() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("surface.json"),
        r#"{
  "total": {"width": 3, "height": 3},
  "window": {"width": 3, "height": 3},
  "can_light_fires": true,
  "background_color": "green",
  "map": [
    ["BC", "", ""],
    ["", "", "CEntrance:cave:0:0"],
    ["", "", ""]
  ]
}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("cave.json"),
        r#"{
  "total": {"width": 1, "height": 1},
  "window": {"width": 1, "height": 1},
  "can_light_fires": false,
  "background_color": "grey",
  "map": [[""]]
}"#,
    )
    .unwrap();
    dir
}

fn starscape() -> Command {
    let mut cmd = Command::cargo_bin("starscape").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn play(maps: &Path, script: &str) -> assert_cmd::assert::Assert {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("script.txt");
    fs::write(&path, script).unwrap();
    starscape()
        .arg("--maps")
        .arg(maps)
        .arg("play")
        .arg(&path)
        .assert()
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_lists_every_item() {
    starscape()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tinderbox"))
        .stdout(predicate::str::contains("Magic Shortbow"))
        .stdout(predicate::str::contains("25 items"));
}

#[test]
fn catalog_filters_by_category() {
    starscape()
        .args(["catalog", "--category", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adamant Pickaxe"))
        .stdout(predicate::str::contains("Oak Log").not())
        .stdout(predicate::str::contains("10 items"));
}

#[test]
fn catalog_rejects_unknown_category() {
    starscape()
        .args(["catalog", "--category", "food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

// ---------------------------------------------------------------------------
// view
// ---------------------------------------------------------------------------

#[test]
fn view_shows_the_player_window() {
    starscape()
        .arg("--maps")
        .arg(bundled_maps())
        .arg("view")
        .assert()
        .success()
        .stdout(predicate::str::contains("surface"))
        .stdout(predicate::str::contains("window 9x9"))
        .stdout(predicate::str::contains("..@"));
}

#[test]
fn view_full_map_with_legend() {
    starscape()
        .arg("--maps")
        .arg(bundled_maps())
        .args(["view", "cave", "--legend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cave"))
        .stdout(predicate::str::contains("bank chest"));
}

#[test]
fn view_unknown_map_fails() {
    starscape()
        .arg("--maps")
        .arg(bundled_maps())
        .args(["view", "moon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no map named 'moon'"));
}

#[test]
fn missing_map_directory_fails() {
    starscape()
        .args(["--maps", "/nonexistent/maps", "view"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn malformed_map_is_reported() {
    let dir = tiny_world();
    fs::write(dir.path().join("cave.json"), "{ nope").unwrap();
    starscape()
        .arg("--maps")
        .arg(dir.path())
        .arg("view")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cave.json"));
}

// ---------------------------------------------------------------------------
// simulate
// ---------------------------------------------------------------------------

#[test]
fn simulate_summarizes_each_map() {
    starscape()
        .arg("--maps")
        .arg(bundled_maps())
        .args(["simulate", "--ticks", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 ticks, seed=42"))
        .stdout(predicate::str::contains("lower_cave"))
        .stdout(predicate::str::contains("NPC moves"));
}

#[test]
fn simulate_prints_events() {
    starscape()
        .arg("--maps")
        .arg(bundled_maps())
        .args(["simulate", "--ticks", "20", "--events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event Log"))
        .stdout(predicate::str::contains("[tick"));
}

#[test]
fn simulate_is_deterministic() {
    let run = || {
        starscape()
            .arg("--maps")
            .arg(bundled_maps())
            .args(["simulate", "--ticks", "30", "--seed", "7", "--events"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn verbose_logging_goes_to_stderr() {
    starscape()
        .arg("--maps")
        .arg(bundled_maps())
        .args(["--verbose", "simulate", "--ticks", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulation"));
}

// ---------------------------------------------------------------------------
// skill
// ---------------------------------------------------------------------------

#[test]
fn skill_lists_tools_and_targets() {
    starscape()
        .args(["skill", "woodcutting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WOODCUTTING"))
        .stdout(predicate::str::contains("Adamant Axe"))
        .stdout(predicate::str::contains("Trees"))
        .stdout(predicate::str::contains("Yew Tree"));
}

#[test]
fn skill_rejects_unknown_names() {
    starscape()
        .args(["skill", "cooking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown skill"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_chops_the_nearby_oak() {
    let script = "interact 2 1\n".repeat(60);
    play(&bundled_maps(), &script)
        .success()
        .stdout(predicate::str::contains("Got Oak Log"));
}

#[test]
fn play_banks_an_item() {
    play(
        &bundled_maps(),
        "right\nright\nup\ninteract 5 1\ndeposit knife 1\nstatus\n",
    )
    .success()
    .stdout(predicate::str::contains("Opened the bank"))
    .stdout(predicate::str::contains("Deposited 1 x Knife"))
    .stdout(predicate::str::contains("Bank: 1 x Knife"));
}

#[test]
fn play_buys_what_gold_allows() {
    play(
        &bundled_maps(),
        "right\nright\nright\nright\nup\ninteract 7 1\nbuy oak_log all\nbuy oak_log 1\n",
    )
    .success()
    .stdout(predicate::str::contains("Opened the General Shop"))
    .stdout(predicate::str::contains("Bought 2 x Oak Log for 100g"))
    .stdout(predicate::str::contains("Cannot afford"));
}

#[test]
fn play_quotes_prices_and_sorts_at_the_shop() {
    play(
        &bundled_maps(),
        "right\nright\nright\nright\nup\ninteract 7 1\ninspect 3\ninspect-stock 4\nsort\n",
    )
    .success()
    .stdout(predicate::str::contains("Knife sells for 10g"))
    .stdout(predicate::str::contains("Oak Log costs 50g to buy"))
    .stdout(predicate::str::contains("Sorted"));
}

#[test]
fn play_opens_a_skill_screen() {
    play(&bundled_maps(), "skill firemaking\nup\nstatus\nclose\nsort\n")
        .success()
        .stdout(predicate::str::contains("Tinderboxes"))
        .stdout(predicate::str::contains("blocked"))
        .stdout(predicate::str::contains("Showing: Firemaking information"))
        .stdout(predicate::str::contains("The bank is not open"));
}

#[test]
fn play_reports_rejections_as_status() {
    play(&bundled_maps(), "deposit knife 1\ninteract 10 10\n")
        .success()
        .stdout(predicate::str::contains("The bank is not open"))
        .stdout(predicate::str::contains("within one tile"));
}

#[test]
fn play_travels_between_maps() {
    let dir = tiny_world();
    play(dir.path(), "interact 2 1\nstatus\nview\n")
        .success()
        .stdout(predicate::str::contains("Travelled to cave"))
        .stdout(predicate::str::contains("Location: cave (0, 0)"));
}

#[test]
fn play_rejects_bad_scripts() {
    play(&bundled_maps(), "up\ndance\n")
        .failure()
        .stderr(predicate::str::contains("script.txt:2: unknown command 'dance'"));
}
