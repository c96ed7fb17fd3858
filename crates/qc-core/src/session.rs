//! Game session management.
//!
//! `GameSession` is the explicit game context: it owns the character, the
//! item and quest catalogs, the seeded RNG, and the battle in progress (if
//! any). Every menu action of the game is reachable through
//! [`GameSession::process`].

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::{ItemCatalog, ItemKind, Quest, QuestCatalog};
use crate::character::{Character, revive_character};
use crate::combat::{Battle, BattleOutcome, BattleResult, CombatAction, CombatEvent, EnemyKind};
use crate::config::SessionConfig;
use crate::error::{GameError, GameResult};
use crate::inventory::{self, MAX_INVENTORY_SIZE, Slot};
use crate::quest;
use crate::stats;

/// Gold it costs to bring a dead character back.
pub const REVIVE_COST: u32 = 100;

/// What happened during one round of battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Events of this round, in order.
    pub events: Vec<CombatEvent>,
    /// Set when the round ended the battle.
    pub result: Option<BattleResult>,
}

/// An interactive game session.
pub struct GameSession {
    character: Character,
    quests: QuestCatalog,
    items: ItemCatalog,
    battle: Option<Battle>,
    rng: StdRng,
}

impl GameSession {
    /// Create a session for a character with the loaded catalogs.
    pub fn new(
        character: Character,
        quests: QuestCatalog,
        items: ItemCatalog,
        config: SessionConfig,
    ) -> Self {
        Self {
            character,
            quests,
            items,
            battle: None,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Get the character.
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Give up the session and return the character.
    pub fn into_character(self) -> Character {
        self.character
    }

    /// Get the quest catalog.
    pub fn quests(&self) -> &QuestCatalog {
        &self.quests
    }

    /// Get the item catalog.
    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// Get the battle in progress.
    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Returns true while a battle is in progress.
    pub fn in_battle(&self) -> bool {
        self.battle.is_some()
    }

    /// Go looking for trouble: start a battle with an enemy suited to the
    /// character's level.
    pub fn explore(&mut self) -> GameResult<&Battle> {
        if self.battle.is_some() {
            return Err(GameError::BattleInProgress);
        }
        let mut battle = Battle::new(EnemyKind::for_level(self.character.level).spawn());
        battle.start(&self.character)?;
        Ok(self.battle.insert(battle))
    }

    /// Play one round of the current battle.
    ///
    /// The enemy answers in the same round. When the battle ends it is
    /// cleared from the session.
    pub fn fight(&mut self, action: &CombatAction) -> GameResult<RoundReport> {
        let Some(battle) = self.battle.as_mut() else {
            return Err(GameError::CombatNotActive);
        };
        let seen = battle.log().len();
        battle.play_round(&mut self.character, action, &self.items, &mut self.rng)?;

        let events = battle.log()[seen..].to_vec();
        let result = battle.result().cloned();
        if result.is_some() {
            self.battle = None;
        }
        Ok(RoundReport { events, result })
    }

    /// Pay [`REVIVE_COST`] gold to bring a dead character back at half health.
    pub fn revive(&mut self) -> GameResult<()> {
        if !self.character.is_dead() {
            return Err(GameError::InvalidChoice(format!(
                "{} is not dead",
                self.character.name()
            )));
        }
        stats::add_gold(&mut self.character, -i64::from(REVIVE_COST))?;
        revive_character(&mut self.character);
        Ok(())
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> GameResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        // Read-only commands work at any time.
        match cmd.as_str() {
            "stats" | "status" => return Ok(self.do_stats()),
            "inventory" | "inv" | "i" => return Ok(self.do_inventory()),
            "quests" => return self.do_quests(rest),
            "progress" => return Ok(self.do_progress()),
            "chain" => return self.do_chain(rest),
            "shop" => return Ok(self.do_shop()),
            "help" => return Ok(self.do_help(rest)),
            "quit" | "q" => return Ok("Goodbye!".to_string()),
            _ => {}
        }

        if self.battle.is_some() {
            return match CombatAction::parse(trimmed) {
                Some(action) => self.do_combat(&action),
                None if is_command(&cmd) => Err(GameError::BattleInProgress),
                None => Err(GameError::UnknownCommand(cmd)),
            };
        }

        match cmd.as_str() {
            "accept" => self.do_accept(rest),
            "complete" => self.do_complete(rest),
            "abandon" => self.do_abandon(rest),
            "explore" => self.do_explore(),
            "attack" | "a" | "special" | "s" | "flee" | "run" | "f" => {
                Err(GameError::CombatNotActive)
            }
            "buy" => self.do_buy(rest),
            "sell" => self.do_sell(rest),
            "use" => self.do_use(rest),
            "equip" => self.do_equip(rest),
            "unequip" => self.do_unequip(rest),
            "revive" => self.do_revive(),
            _ => Err(GameError::UnknownCommand(cmd)),
        }
    }

    fn do_stats(&self) -> String {
        let c = &self.character;
        let mut out = format!(
            "{} the {}\n\
             Level {} (XP {}/{})\n\
             Health: {}/{}\n\
             Strength: {}  Magic: {}\n\
             Gold: {}\n\
             Weapon: {}  Armor: {}",
            c.name(),
            c.class(),
            c.level,
            c.experience,
            c.experience + c.xp_to_next_level(),
            c.health,
            c.max_health,
            c.strength,
            c.magic,
            c.gold,
            c.equipped_weapon.as_deref().unwrap_or("none"),
            c.equipped_armor.as_deref().unwrap_or("none"),
        );
        if c.is_dead() {
            out.push_str(&format!("\n{} is dead. Type 'revive' ({REVIVE_COST} gold).", c.name()));
        }
        if let Some(battle) = &self.battle {
            let enemy = battle.enemy();
            out.push_str(&format!(
                "\nIn battle with {} ({}/{} HP)",
                enemy.name, enemy.health, enemy.max_health
            ));
        }
        out
    }

    fn do_inventory(&self) -> String {
        let summary = inventory::inventory_summary(&self.character, &self.items);
        if summary.is_empty() {
            return "Inventory is empty.".to_string();
        }
        let mut out = format!(
            "Inventory ({}/{MAX_INVENTORY_SIZE}):\n",
            self.character.inventory.len()
        );
        for (name, count) in summary {
            if count > 1 {
                out.push_str(&format!("  {name} x{count}\n"));
            } else {
                out.push_str(&format!("  {name}\n"));
            }
        }
        out.trim_end().to_string()
    }

    fn do_quests(&self, filter: &str) -> GameResult<String> {
        let c = &self.character;
        let sections: Vec<(&str, Vec<&Quest>)> = match filter.to_lowercase().as_str() {
            "active" => vec![("Active quests", quest::active_quests(c, &self.quests))],
            "available" => vec![("Available quests", quest::available_quests(c, &self.quests))],
            "completed" | "done" => vec![(
                "Completed quests",
                quest::completed_quests(c, &self.quests),
            )],
            "" => vec![
                ("Active quests", quest::active_quests(c, &self.quests)),
                ("Available quests", quest::available_quests(c, &self.quests)),
            ],
            other => {
                return Err(GameError::InvalidChoice(format!(
                    "unknown quest list '{other}', use: active, available, completed"
                )));
            }
        };

        let mut out = String::new();
        for (heading, list) in sections {
            if list.is_empty() {
                out.push_str(&format!("{heading}: none\n"));
                continue;
            }
            out.push_str(&format!("{heading} ({}):\n", list.len()));
            for q in list {
                out.push_str(&format!(
                    "  {} - {} (level {}, {} XP, {} gold)\n",
                    q.id, q.title, q.required_level, q.reward_xp, q.reward_gold
                ));
            }
        }
        Ok(out.trim_end().to_string())
    }

    fn do_progress(&self) -> String {
        let c = &self.character;
        let earned = quest::total_rewards_earned(c, &self.quests);
        format!(
            "Quests completed: {}/{} ({:.0}%)\nRewards earned: {} XP, {} gold",
            quest::completed_quests(c, &self.quests).len(),
            self.quests.len(),
            quest::completion_percentage(c, &self.quests),
            earned.xp,
            earned.gold,
        )
    }

    fn do_chain(&self, quest_id: &str) -> GameResult<String> {
        if quest_id.is_empty() {
            return Err(GameError::InvalidChoice("usage: chain <quest id>".to_string()));
        }
        let chain = quest::prerequisite_chain(quest_id, &self.quests)?;
        let steps: Vec<String> = chain
            .iter()
            .map(|id| format!("{id} [{}]", quest::quest_status(&self.character, id)))
            .collect();
        Ok(steps.join(" -> "))
    }

    fn do_shop(&self) -> String {
        if self.items.is_empty() {
            return "The shop has nothing for sale.".to_string();
        }
        let mut out = format!("Shop (you have {} gold):\n", self.character.gold);
        for item in self.items.iter() {
            out.push_str(&format!(
                "  {} - {} ({}, {}) {} gold\n",
                item.id, item.name, item.kind, item.effect, item.cost
            ));
        }
        out.trim_end().to_string()
    }

    fn do_help(&self, topic: &str) -> String {
        match topic.to_lowercase().as_str() {
            "combat" | "battle" => "\
Combat Commands:
  attack                        Basic attack
  special                       Use your class ability
  use <item id>                 Use a consumable
  flee                          Try to escape (50%)

During a battle only combat commands and read-only commands work."
                .to_string(),
            "quest" | "quests" => "\
Quest Commands:
  quests [active|available|completed]  List quests
  accept <quest id>                    Accept a quest
  complete <quest id>                  Complete an active quest
  abandon <quest id>                   Drop an active quest
  chain <quest id>                     Show the prerequisite chain
  progress                             Show completion statistics"
                .to_string(),
            "items" | "shop" | "inventory" => "\
Item Commands:
  inventory                     Show your inventory
  shop                          List items for sale
  buy <item id>                 Buy an item
  sell <item id>                Sell an item for half its cost
  use <item id>                 Use a consumable
  equip <item id>               Equip a weapon or armor
  unequip weapon|armor          Empty an equipment slot"
                .to_string(),
            _ => format!(
                "\
Quest Chronicles Commands:
  stats                         Show your character
  inventory                     Show your inventory
  quests [filter]               List quests
  accept|complete|abandon <id>  Manage quests
  chain <id>                    Show a quest's prerequisite chain
  progress                      Show quest statistics
  explore                       Look for a fight
  attack|special|use|flee       Combat actions
  shop|buy|sell                 Trade with the shop
  equip|unequip                 Manage equipment
  revive                        Come back from the dead ({REVIVE_COST} gold)
  save                          Save your progress
  help [topic]                  Show help (combat, quests, items)
  quit                          Save and exit"
            ),
        }
    }

    fn do_combat(&mut self, action: &CombatAction) -> GameResult<String> {
        let report = self.fight(action)?;
        let mut out: Vec<String> = report
            .events
            .iter()
            .map(|e| e.description.clone())
            .collect();

        match report.result {
            Some(result) => match result.outcome {
                BattleOutcome::Victory => {
                    out.push(format!(
                        "Victory! You gain {} XP and {} gold.",
                        result.rewards.xp, result.rewards.gold
                    ));
                    if result.levels_gained > 0 {
                        out.push(format!("Level up! You are now level {}.", self.character.level));
                    }
                }
                BattleOutcome::Defeat => out.push(format!(
                    "You have been defeated. Type 'revive' to return ({REVIVE_COST} gold)."
                )),
                BattleOutcome::Escaped => out.push("You got away safely.".to_string()),
            },
            None => {
                if let Some(battle) = &self.battle {
                    let enemy = battle.enemy();
                    out.push(format!(
                        "{}: {}/{} HP. You: {}/{} HP.",
                        enemy.name,
                        enemy.health,
                        enemy.max_health,
                        self.character.health,
                        self.character.max_health
                    ));
                }
            }
        }
        Ok(out.join("\n"))
    }

    fn do_explore(&mut self) -> GameResult<String> {
        let enemy = self.explore()?.enemy();
        Ok(format!(
            "A wild {} appears! ({} HP, {} strength)\nattack, special, use <item> or flee?",
            enemy.name, enemy.health, enemy.strength
        ))
    }

    fn do_accept(&mut self, quest_id: &str) -> GameResult<String> {
        let quest_id = require_arg(quest_id, "accept <quest id>")?;
        quest::accept_quest(&mut self.character, quest_id, &self.quests)?;
        let title = &self.quests.quest(quest_id)?.title;
        Ok(format!("Quest accepted: {title}"))
    }

    fn do_complete(&mut self, quest_id: &str) -> GameResult<String> {
        let quest_id = require_arg(quest_id, "complete <quest id>")?;
        let reward = quest::complete_quest(&mut self.character, quest_id, &self.quests)?;
        let mut out = format!(
            "Quest completed! You gain {} XP and {} gold.",
            reward.xp, reward.gold
        );
        if reward.levels_gained > 0 {
            out.push_str(&format!(
                "\nLevel up! You are now level {}.",
                self.character.level
            ));
        }
        Ok(out)
    }

    fn do_abandon(&mut self, quest_id: &str) -> GameResult<String> {
        let quest_id = require_arg(quest_id, "abandon <quest id>")?;
        quest::abandon_quest(&mut self.character, quest_id)?;
        Ok(format!("Quest abandoned: {quest_id}"))
    }

    fn do_buy(&mut self, item_id: &str) -> GameResult<String> {
        let item_id = require_arg(item_id, "buy <item id>")?;
        inventory::purchase_item(&mut self.character, item_id, &self.items)?;
        Ok(format!(
            "Bought {}. Gold left: {}",
            self.items.item(item_id)?.name,
            self.character.gold
        ))
    }

    fn do_sell(&mut self, item_id: &str) -> GameResult<String> {
        let item_id = require_arg(item_id, "sell <item id>")?;
        let price = inventory::sell_item(&mut self.character, item_id, &self.items)?;
        Ok(format!("Sold {item_id} for {price} gold."))
    }

    fn do_use(&mut self, item_id: &str) -> GameResult<String> {
        let item_id = require_arg(item_id, "use <item id>")?;
        let effect = inventory::use_item(&mut self.character, item_id, &self.items)?;
        Ok(format!("Used {item_id} ({effect})."))
    }

    fn do_equip(&mut self, item_id: &str) -> GameResult<String> {
        let item_id = require_arg(item_id, "equip <item id>")?;
        if !inventory::has_item(&self.character, item_id) {
            return Err(GameError::ItemNotFound(item_id.to_string()));
        }
        let item = self.items.item(item_id)?;
        let slot = match item.kind {
            ItemKind::Weapon => Slot::Weapon,
            ItemKind::Armor => Slot::Armor,
            ItemKind::Consumable => {
                return Err(GameError::InvalidItemType {
                    item: item_id.to_string(),
                    expected: ItemKind::Weapon,
                    found: ItemKind::Consumable,
                });
            }
        };
        let name = item.name.clone();
        let replaced = inventory::equip(&mut self.character, item_id, slot, &self.items)?;
        Ok(match replaced {
            Some(old) => format!("Equipped {name} as {slot}, replacing {old}."),
            None => format!("Equipped {name} as {slot}."),
        })
    }

    fn do_unequip(&mut self, slot: &str) -> GameResult<String> {
        let slot = Slot::parse(slot)
            .ok_or_else(|| GameError::InvalidChoice("usage: unequip weapon|armor".to_string()))?;
        match inventory::unequip(&mut self.character, slot, &self.items)? {
            Some(item_id) => Ok(format!("Unequipped {item_id}.")),
            None => Ok(format!("Nothing equipped as {slot}.")),
        }
    }

    fn do_revive(&mut self) -> GameResult<String> {
        self.revive()?;
        Ok(format!(
            "{} returns with {}/{} HP. Gold left: {}",
            self.character.name(),
            self.character.health,
            self.character.max_health,
            self.character.gold
        ))
    }
}

/// Commands that change state outside of a battle.
fn is_command(cmd: &str) -> bool {
    matches!(
        cmd,
        "accept"
            | "complete"
            | "abandon"
            | "explore"
            | "buy"
            | "sell"
            | "equip"
            | "unequip"
            | "revive"
    )
}

fn require_arg<'a>(arg: &'a str, usage: &str) -> GameResult<&'a str> {
    if arg.is_empty() {
        Err(GameError::InvalidChoice(format!("usage: {usage}")))
    } else {
        Ok(arg)
    }
}
