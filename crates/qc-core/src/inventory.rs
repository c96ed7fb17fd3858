//! Inventory, equipment slots, consumables, and the shop.
//!
//! The inventory is an ordered bag of item ids capped at
//! [`MAX_INVENTORY_SIZE`]. Equipped items leave the bag while they occupy a
//! slot, and their effect is reversed when they come back.

use serde::{Deserialize, Serialize};

use crate::catalog::{Item, ItemCatalog, ItemId, ItemKind};
use crate::character::Character;
use crate::error::{GameError, GameResult};
use crate::stats::{self, Effect, Stat};

/// Maximum number of items a character can carry.
pub const MAX_INVENTORY_SIZE: usize = 20;

/// An equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Holds one weapon.
    Weapon,
    /// Holds one piece of armor.
    Armor,
}

impl Slot {
    /// Parse a slot name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Some(Self::Weapon),
            "armor" | "armour" => Some(Self::Armor),
            _ => None,
        }
    }

    /// The item kind that fits this slot.
    pub fn kind(self) -> ItemKind {
        match self {
            Self::Weapon => ItemKind::Weapon,
            Self::Armor => ItemKind::Armor,
        }
    }

    fn of(self, character: &mut Character) -> &mut Option<ItemId> {
        match self {
            Self::Weapon => &mut character.equipped_weapon,
            Self::Armor => &mut character.equipped_armor,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
        }
    }
}

/// Add an item to the inventory.
pub fn add_item(character: &mut Character, item_id: &str) -> GameResult<()> {
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull {
            capacity: MAX_INVENTORY_SIZE,
        });
    }
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Remove one instance of an item from the inventory.
pub fn remove_item(character: &mut Character, item_id: &str) -> GameResult<()> {
    let pos = character
        .inventory
        .iter()
        .position(|id| id == item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))?;
    character.inventory.remove(pos);
    Ok(())
}

/// Returns true if the inventory holds at least one of the item.
pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|id| id == item_id)
}

/// Number of copies of an item in the inventory.
pub fn count_item(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|id| *id == item_id).count()
}

/// Free inventory slots.
pub fn space_remaining(character: &Character) -> usize {
    MAX_INVENTORY_SIZE.saturating_sub(character.inventory.len())
}

/// Empty the inventory, returning what it held.
pub fn clear_inventory(character: &mut Character) -> Vec<ItemId> {
    std::mem::take(&mut character.inventory)
}

/// Item names with their counts, in order of first appearance.
///
/// Ids missing from the catalog are listed by id.
pub fn inventory_summary(character: &Character, items: &ItemCatalog) -> Vec<(String, usize)> {
    let mut summary: Vec<(String, usize)> = Vec::new();
    for id in &character.inventory {
        let name = items.get(id).map_or(id.as_str(), |item| item.name.as_str());
        match summary.iter_mut().find(|(n, _)| n == name) {
            Some((_, count)) => *count += 1,
            None => summary.push((name.to_string(), 1)),
        }
    }
    summary
}

/// Look up a held item and check its kind.
fn held_item<'a>(
    character: &Character,
    item_id: &str,
    items: &'a ItemCatalog,
    expected: ItemKind,
) -> GameResult<&'a Item> {
    if !has_item(character, item_id) {
        return Err(GameError::ItemNotFound(item_id.to_string()));
    }
    let item = items.item(item_id)?;
    if item.kind != expected {
        return Err(GameError::InvalidItemType {
            item: item_id.to_string(),
            expected,
            found: item.kind,
        });
    }
    Ok(item)
}

/// Health effects cannot bring a dead character back; only revival can.
fn check_alive_for(character: &Character, effect: Effect) -> GameResult<()> {
    if effect.stat == Stat::Health && character.is_dead() {
        return Err(GameError::CharacterDead(character.name().to_string()));
    }
    Ok(())
}

/// Use a consumable: apply its effect and remove one from the inventory.
///
/// Fails with `CharacterDead` if the character is dead.
pub fn use_item(character: &mut Character, item_id: &str, items: &ItemCatalog) -> GameResult<Effect> {
    if character.is_dead() {
        return Err(GameError::CharacterDead(character.name().to_string()));
    }
    let item = held_item(character, item_id, items, ItemKind::Consumable)?;
    stats::apply_effect(character, item.effect.stat, item.effect.amount)?;
    remove_item(character, item_id)?;
    tracing::debug!(item = item_id, effect = %item.effect, "item used");
    Ok(item.effect)
}

/// Put an item from the inventory into a slot.
///
/// An occupied slot is emptied first: the old item's effect is reversed and
/// it goes back into the inventory, which fails with `InventoryFull` if there
/// is no room. Returns the id of the item that was replaced, if any.
pub fn equip(
    character: &mut Character,
    item_id: &str,
    slot: Slot,
    items: &ItemCatalog,
) -> GameResult<Option<ItemId>> {
    let item = held_item(character, item_id, items, slot.kind())?;
    check_alive_for(character, item.effect)?;

    // Work on a copy so a failure leaves the character untouched.
    let mut staged = character.clone();
    let previous = unequip(&mut staged, slot, items)?;
    remove_item(&mut staged, item_id)?;
    stats::apply_effect(&mut staged, item.effect.stat, item.effect.amount)?;
    *slot.of(&mut staged) = Some(item_id.to_string());
    *character = staged;

    tracing::info!(item = item_id, %slot, replaced = ?previous, "equipped");
    Ok(previous)
}

/// Equip a weapon.
pub fn equip_weapon(
    character: &mut Character,
    item_id: &str,
    items: &ItemCatalog,
) -> GameResult<Option<ItemId>> {
    equip(character, item_id, Slot::Weapon, items)
}

/// Equip a piece of armor.
pub fn equip_armor(
    character: &mut Character,
    item_id: &str,
    items: &ItemCatalog,
) -> GameResult<Option<ItemId>> {
    equip(character, item_id, Slot::Armor, items)
}

/// Empty a slot, reversing its effect and returning the item to the
/// inventory. Returns `None` if the slot was already empty.
pub fn unequip(
    character: &mut Character,
    slot: Slot,
    items: &ItemCatalog,
) -> GameResult<Option<ItemId>> {
    let Some(current) = slot.of(character).clone() else {
        return Ok(None);
    };
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull {
            capacity: MAX_INVENTORY_SIZE,
        });
    }
    let reversal = items.item(&current)?.effect.inverse();
    check_alive_for(character, reversal)?;
    stats::check_effect(character, reversal)?;

    stats::apply_effect(character, reversal.stat, reversal.amount)?;
    character.inventory.push(current.clone());
    *slot.of(character) = None;
    Ok(Some(current))
}

/// Unequip the weapon slot.
pub fn unequip_weapon(character: &mut Character, items: &ItemCatalog) -> GameResult<Option<ItemId>> {
    unequip(character, Slot::Weapon, items)
}

/// Unequip the armor slot.
pub fn unequip_armor(character: &mut Character, items: &ItemCatalog) -> GameResult<Option<ItemId>> {
    unequip(character, Slot::Armor, items)
}

/// Buy an item from the shop.
pub fn purchase_item(character: &mut Character, item_id: &str, items: &ItemCatalog) -> GameResult<()> {
    let item = items.item(item_id)?;
    if character.gold < item.cost {
        return Err(GameError::InsufficientResources {
            needed: item.cost,
            available: character.gold,
        });
    }
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull {
            capacity: MAX_INVENTORY_SIZE,
        });
    }
    character.gold -= item.cost;
    character.inventory.push(item_id.to_string());
    tracing::info!(item = item_id, cost = item.cost, "purchased");
    Ok(())
}

/// Sell an item for half its cost (rounded down). Returns the gold received.
pub fn sell_item(character: &mut Character, item_id: &str, items: &ItemCatalog) -> GameResult<u32> {
    if !has_item(character, item_id) {
        return Err(GameError::ItemNotFound(item_id.to_string()));
    }
    let price = items.item(item_id)?.cost / 2;
    remove_item(character, item_id)?;
    character.gold = character.gold.saturating_add(price);
    tracing::info!(item = item_id, price, "sold");
    Ok(price)
}
