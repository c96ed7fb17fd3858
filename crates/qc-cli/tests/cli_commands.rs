//! Integration tests for the qc CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `qc` command pointed at data and save directories inside `dir`.
fn qc(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qc").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--save-dir")
        .arg(dir.path().join("saves"));
    cmd
}

/// A temp directory with starter data and one saved warrior named Hero.
fn game_with_hero() -> TempDir {
    let dir = TempDir::new().unwrap();
    qc(&dir).arg("init").assert().success();
    qc(&dir).args(["new", "Hero", "warrior"]).assert().success();
    dir
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_data_files() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized game data"));

    assert!(dir.path().join("data/quests.txt").exists());
    assert!(dir.path().join("data/items.txt").exists());
    assert!(dir.path().join("saves").is_dir());
}

#[test]
fn init_keeps_existing_files() {
    let dir = TempDir::new().unwrap();
    qc(&dir).arg("init").assert().success();
    fs::write(
        dir.path().join("data/items.txt"),
        "ITEM_ID: rock\nNAME: Rock\nTYPE: weapon\nEFFECT: strength:1\nCOST: 1\n",
    )
    .unwrap();

    qc(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));
    let items = fs::read_to_string(dir.path().join("data/items.txt")).unwrap();
    assert!(items.contains("rock"));
}

// ---------------------------------------------------------------------------
// new / list / show / delete
// ---------------------------------------------------------------------------

#[test]
fn new_creates_save_file() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .args(["new", "Aria", "Mage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aria the Mage (level 1, HP 80/80)"));

    let save = fs::read_to_string(dir.path().join("saves/Aria_save.txt")).unwrap();
    assert!(save.contains("class:Mage"));
    assert!(save.contains("gold:100"));
}

#[test]
fn new_rejects_unknown_class() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .args(["new", "Aria", "bard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: bard is not an available class"));
}

#[test]
fn new_rejects_duplicate() {
    let dir = game_with_hero();
    qc(&dir)
        .args(["new", "Hero", "rogue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn new_rejects_padded_name() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .args(["new", " Bob", "rogue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used as a save name"));
    assert!(!dir.path().join("saves/ Bob_save.txt").exists());
}

#[test]
fn list_shows_characters() {
    let dir = game_with_hero();
    qc(&dir).args(["new", "Bran", "cleric"]).assert().success();

    qc(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Hero")
                .and(predicate::str::contains("Bran"))
                .and(predicate::str::contains("Cleric"))
                .and(predicate::str::contains("2 characters")),
        );
}

#[test]
fn list_empty() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved characters"));
}

#[test]
fn show_character() {
    let dir = game_with_hero();
    qc(&dir)
        .args(["show", "Hero"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("health:     120/120")
                .and(predicate::str::contains("strength:   15"))
                .and(predicate::str::contains("100 XP to next")),
        );
}

#[test]
fn show_json() {
    let dir = game_with_hero();
    let output = qc(&dir).args(["show", "Hero", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "Hero");
    assert_eq!(value["class"], "Warrior");
    assert_eq!(value["gold"], 100);
    assert_eq!(value["inventory"], serde_json::json!([]));
}

#[test]
fn show_missing_character() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .args(["show", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("character 'Nobody' not found"));
}

#[test]
fn delete_character() {
    let dir = game_with_hero();
    qc(&dir)
        .args(["delete", "Hero"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted Hero"));
    assert!(!dir.path().join("saves/Hero_save.txt").exists());

    qc(&dir).args(["delete", "Hero"]).assert().failure();
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_bootstraps_and_lists() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .args(["catalog", "quests"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("first_steps")
                .and(predicate::str::contains("Slay the Dragon"))
                .and(predicate::str::contains("Iron Sword").not()),
        );

    qc(&dir)
        .args(["catalog", "items"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Iron Sword")
                .and(predicate::str::contains("health:50")),
        );
}

#[test]
fn catalog_unknown_kind() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .args(["catalog", "spells"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown catalog 'spells'"));
}

#[test]
fn catalog_reports_bad_data() {
    let dir = TempDir::new().unwrap();
    qc(&dir).arg("init").assert().success();
    fs::write(
        dir.path().join("data/items.txt"),
        "ITEM_ID: rock\nNAME: Rock\nTYPE: weapon\nEFFECT: strength:1\nCOST: cheap\n",
    )
    .unwrap();

    qc(&dir)
        .args(["catalog", "items"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 5"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_shop_and_quit_saves() {
    let dir = game_with_hero();
    qc(&dir)
        .args(["play", "Hero"])
        .write_stdin("buy health_potion\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Bought Health Potion. Gold left: 90")
                .and(predicate::str::contains("Goodbye!"))
                .and(predicate::str::contains("Progress saved")),
        );

    let save = fs::read_to_string(dir.path().join("saves/Hero_save.txt")).unwrap();
    assert!(save.contains("gold:90"));
    assert!(save.contains("inventory:health_potion"));
}

#[test]
fn play_saves_at_end_of_input() {
    let dir = game_with_hero();
    qc(&dir)
        .args(["play", "Hero"])
        .write_stdin("accept first_steps\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quest accepted: First Steps"));

    let save = fs::read_to_string(dir.path().join("saves/Hero_save.txt")).unwrap();
    assert!(save.contains("active_quests:first_steps"));
}

#[test]
fn play_battle_round() {
    let dir = game_with_hero();
    qc(&dir)
        .args(["play", "Hero"])
        .write_stdin("explore\nattack\nstats\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("A wild Goblin appears!")
                .and(predicate::str::contains("Hero attacks Goblin for 13 damage."))
                .and(predicate::str::contains("Goblin attacks Hero for 5 damage."))
                .and(predicate::str::contains("In battle with Goblin (37/50 HP)")),
        );
}

#[test]
fn play_reports_errors_and_continues() {
    let dir = game_with_hero();
    qc(&dir)
        .args(["play", "Hero"])
        .write_stdin("fly away\nsell iron_sword\nsave\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("unknown command: fly")
                .and(predicate::str::contains("item 'iron_sword' not found"))
                .and(predicate::str::contains("Game saved.")),
        );
}

#[test]
fn play_missing_character() {
    let dir = TempDir::new().unwrap();
    qc(&dir)
        .args(["play", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("character 'Ghost' not found"));
}
