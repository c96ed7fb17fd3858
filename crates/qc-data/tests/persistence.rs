//! Integration tests for character persistence.
use qc_core::{CharacterClass, create_character, inventory, quest};
use qc_data::{
    DataError, create_default_data_files, delete_character, list_saved_characters,
    load_catalogs, load_character, save_character,
};
use tempfile::TempDir;

#[test]
fn progress_survives_a_save_round_trip() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    let saves = data.join("save_games");

    create_default_data_files(&data).unwrap();
    let (quests, items) = load_catalogs(&data).unwrap();

    let mut hero = create_character("Kael", "warrior").unwrap();
    assert_eq!(hero.class(), CharacterClass::Warrior);

    quest::accept_quest(&mut hero, "first_steps", &quests).unwrap();
    quest::complete_quest(&mut hero, "first_steps", &quests).unwrap();
    quest::accept_quest(&mut hero, "goblin_trouble", &quests).unwrap();
    inventory::purchase_item(&mut hero, "iron_sword", &items).unwrap();
    inventory::purchase_item(&mut hero, "health_potion", &items).unwrap();
    inventory::equip_weapon(&mut hero, "iron_sword", &items).unwrap();

    save_character(&hero, &saves).unwrap();
    let restored = load_character("Kael", &saves).unwrap();

    assert_eq!(restored, hero);
    assert_eq!(restored.strength, 20);
    assert_eq!(restored.gold, 65);
    assert_eq!(restored.inventory, vec!["health_potion"]);
    assert_eq!(restored.equipped_weapon.as_deref(), Some("iron_sword"));
    assert_eq!(restored.completed_quests, vec!["first_steps"]);
    assert_eq!(restored.active_quests, vec!["goblin_trouble"]);
}

#[test]
fn restored_equipment_can_be_removed() {
    let tmp = TempDir::new().unwrap();
    create_default_data_files(tmp.path()).unwrap();
    let (_, items) = load_catalogs(tmp.path()).unwrap();

    let mut mage = create_character("Aria", "Mage").unwrap();
    inventory::purchase_item(&mut mage, "oak_staff", &items).unwrap();
    inventory::equip_weapon(&mut mage, "oak_staff", &items).unwrap();
    assert_eq!(mage.magic, 28);

    save_character(&mage, tmp.path()).unwrap();
    let mut restored = load_character("Aria", tmp.path()).unwrap();
    inventory::unequip_weapon(&mut restored, &items).unwrap();
    assert_eq!(restored.magic, 20);
    assert_eq!(restored.inventory, vec!["oak_staff"]);
}

#[test]
fn save_directory_management() {
    let tmp = TempDir::new().unwrap();
    let saves = tmp.path().join("save_games");

    for (name, class) in [("Cyra", "rogue"), ("Bran", "cleric"), ("Aria", "mage")] {
        save_character(&create_character(name, class).unwrap(), &saves).unwrap();
    }
    assert_eq!(
        list_saved_characters(&saves).unwrap(),
        vec!["Aria", "Bran", "Cyra"]
    );

    delete_character("Bran", &saves).unwrap();
    assert_eq!(list_saved_characters(&saves).unwrap(), vec!["Aria", "Cyra"]);
    assert!(matches!(
        load_character("Bran", &saves),
        Err(DataError::CharacterNotFound(name)) if name == "Bran"
    ));
}

#[test]
fn tampered_save_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let hero = create_character("Kael", "warrior").unwrap();
    let path = save_character(&hero, tmp.path()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, text.replace("level:1", "level:0")).unwrap();
    assert!(matches!(
        load_character("Kael", tmp.path()),
        Err(DataError::CorruptedData(_))
    ));
}
