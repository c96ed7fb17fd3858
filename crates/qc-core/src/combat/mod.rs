//! Turn-based battle state machine.
//!
//! A battle moves `NotStarted -> PlayerTurn <-> EnemyTurn -> Ended`. The
//! player always acts first, every turn resolves exactly one action, and the
//! end condition is checked after each action. Victory rewards are written
//! back into the character when the battle ends.

pub mod ability;
pub mod action;
pub mod enemy;

pub use ability::{AbilityEffect, SpecialAbility};
pub use action::{CombatAction, CombatEvent, Combatant, ESCAPE_CHANCE, calculate_damage};
pub use enemy::{Enemy, EnemyKind, Rewards, create_enemy, victory_rewards};

use crate::catalog::ItemCatalog;
use crate::chance::Chance;
use crate::character::{Character, gain_experience, heal_character};
use crate::error::{GameError, GameResult};
use crate::inventory;

/// Where a battle is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Created but not started.
    NotStarted,
    /// Waiting for the player's action.
    PlayerTurn,
    /// Waiting for the enemy to act.
    EnemyTurn,
    /// Finished.
    Ended(BattleOutcome),
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// The enemy was defeated.
    Victory,
    /// The player was defeated.
    Defeat,
    /// The player ran away.
    Escaped,
}

impl std::fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
            Self::Escaped => write!(f, "escaped"),
        }
    }
}

/// Summary of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleResult {
    /// How the battle ended.
    pub outcome: BattleOutcome,
    /// Rewards granted (zero unless victorious).
    pub rewards: Rewards,
    /// Levels gained from the reward experience.
    pub levels_gained: u32,
    /// Number of turns taken.
    pub turns: u32,
}

/// Decides the player's action each turn.
pub trait BattleController {
    /// Pick the next action.
    fn choose_action(&mut self, battle: &Battle, character: &Character) -> CombatAction;
}

impl<F> BattleController for F
where
    F: FnMut(&Battle, &Character) -> CombatAction,
{
    fn choose_action(&mut self, battle: &Battle, character: &Character) -> CombatAction {
        self(battle, character)
    }
}

/// A single encounter between the character and one enemy.
///
/// The battle owns the enemy; the character is borrowed per turn so the
/// battle can be kept alive between player decisions.
#[derive(Debug, Clone)]
pub struct Battle {
    enemy: Enemy,
    phase: BattlePhase,
    turn: u32,
    log: Vec<CombatEvent>,
    result: Option<BattleResult>,
}

impl Battle {
    /// Set up a battle against an enemy.
    pub fn new(enemy: Enemy) -> Self {
        Self {
            enemy,
            phase: BattlePhase::NotStarted,
            turn: 0,
            log: Vec::new(),
            result: None,
        }
    }

    /// The opponent.
    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Current phase.
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Number of turns resolved so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every event so far, oldest first.
    pub fn log(&self) -> &[CombatEvent] {
        &self.log
    }

    /// Returns true once the battle has ended.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Ended(_))
    }

    /// The result, once the battle has ended.
    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    /// Begin the battle. The character must be alive.
    pub fn start(&mut self, character: &Character) -> GameResult<()> {
        match self.phase {
            BattlePhase::NotStarted => {}
            BattlePhase::Ended(_) => return Err(GameError::CombatNotActive),
            _ => return Err(GameError::BattleInProgress),
        }
        if character.is_dead() {
            return Err(GameError::CharacterDead(character.name().to_string()));
        }
        self.phase = BattlePhase::PlayerTurn;
        tracing::info!(enemy = %self.enemy.name, "battle started");
        Ok(())
    }

    /// Resolve the player's action.
    ///
    /// A rejected action (for example using an item that is not held) returns
    /// an error and does not use up the turn.
    pub fn player_turn(
        &mut self,
        character: &mut Character,
        action: &CombatAction,
        items: &ItemCatalog,
        chance: &mut impl Chance,
    ) -> GameResult<()> {
        if self.phase != BattlePhase::PlayerTurn {
            return Err(GameError::CombatNotActive);
        }

        let name = character.name().to_string();
        let description = match action {
            CombatAction::Attack => {
                let damage = calculate_damage(character.strength, self.enemy.strength);
                self.damage_enemy(damage);
                format!("{name} attacks {} for {damage} damage.", self.enemy.name)
            }
            CombatAction::Special => {
                let ability = character.class().special_ability();
                match ability.resolve(character, &self.enemy, chance) {
                    AbilityEffect::Damage(damage) => {
                        self.damage_enemy(damage);
                        format!("{ability}! {name} deals {damage} damage.")
                    }
                    AbilityEffect::Heal(amount) => {
                        let healed = heal_character(character, amount)?;
                        format!("{ability}! {name} restores {healed} health.")
                    }
                    AbilityEffect::Missed => format!("{ability} failed!"),
                }
            }
            CombatAction::UseItem(item_id) => {
                let effect = inventory::use_item(character, item_id, items)?;
                format!("{name} uses {item_id} ({effect}).")
            }
            CombatAction::Flee => {
                if chance.succeeds(ESCAPE_CHANCE) {
                    self.turn += 1;
                    self.record(Combatant::Player, format!("{name} escaped the battle!"));
                    return self.finish(character, BattleOutcome::Escaped);
                }
                format!("{name} tried to escape but failed!")
            }
        };

        self.turn += 1;
        self.record(Combatant::Player, description);
        if !self.check_end(character)? {
            self.phase = BattlePhase::EnemyTurn;
        }
        Ok(())
    }

    /// Resolve the enemy's basic attack.
    pub fn enemy_turn(&mut self, character: &mut Character) -> GameResult<()> {
        if self.phase != BattlePhase::EnemyTurn {
            return Err(GameError::CombatNotActive);
        }

        let damage = calculate_damage(self.enemy.strength, character.strength);
        character.health = character.health.saturating_sub(damage).max(0);
        self.turn += 1;
        self.record(
            Combatant::Enemy,
            format!(
                "{} attacks {} for {damage} damage.",
                self.enemy.name,
                character.name()
            ),
        );
        if !self.check_end(character)? {
            self.phase = BattlePhase::PlayerTurn;
        }
        Ok(())
    }

    /// Play one round: the player's action, then the enemy's reply if the
    /// battle is still going.
    pub fn play_round(
        &mut self,
        character: &mut Character,
        action: &CombatAction,
        items: &ItemCatalog,
        chance: &mut impl Chance,
    ) -> GameResult<()> {
        self.player_turn(character, action, items, chance)?;
        if self.phase == BattlePhase::EnemyTurn {
            self.enemy_turn(character)?;
        }
        Ok(())
    }

    /// Fight until the battle ends, asking the controller for each action.
    pub fn run(
        &mut self,
        character: &mut Character,
        items: &ItemCatalog,
        controller: &mut impl BattleController,
        chance: &mut impl Chance,
    ) -> GameResult<BattleResult> {
        if self.phase == BattlePhase::NotStarted {
            self.start(character)?;
        }
        loop {
            match self.phase {
                BattlePhase::PlayerTurn => {
                    let action = controller.choose_action(self, character);
                    self.player_turn(character, &action, items, chance)?;
                }
                BattlePhase::EnemyTurn => self.enemy_turn(character)?,
                BattlePhase::Ended(_) => break,
                BattlePhase::NotStarted => return Err(GameError::CombatNotActive),
            }
        }
        self.result.clone().ok_or(GameError::CombatNotActive)
    }

    fn damage_enemy(&mut self, damage: i32) {
        if damage <= 0 {
            return;
        }
        self.enemy.health = self.enemy.health.saturating_sub(damage).max(0);
        tracing::debug!(enemy = %self.enemy.name, damage, health = self.enemy.health, "enemy hit");
    }

    fn record(&mut self, actor: Combatant, description: String) {
        tracing::debug!(turn = self.turn, ?actor, %description, "combat event");
        self.log.push(CombatEvent {
            turn: self.turn,
            actor,
            description,
        });
    }

    /// End the battle if either side is down. Returns true if it ended.
    fn check_end(&mut self, character: &mut Character) -> GameResult<bool> {
        if self.enemy.is_defeated() {
            self.finish(character, BattleOutcome::Victory)?;
            Ok(true)
        } else if character.is_dead() {
            self.finish(character, BattleOutcome::Defeat)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn finish(&mut self, character: &mut Character, outcome: BattleOutcome) -> GameResult<()> {
        let (rewards, levels_gained) = match outcome {
            BattleOutcome::Victory => {
                let rewards = victory_rewards(&self.enemy);
                let levels = gain_experience(character, rewards.xp)?;
                character.gold = character.gold.saturating_add(rewards.gold);
                (rewards, levels)
            }
            BattleOutcome::Defeat | BattleOutcome::Escaped => (Rewards::default(), 0),
        };
        self.phase = BattlePhase::Ended(outcome);
        self.result = Some(BattleResult {
            outcome,
            rewards,
            levels_gained,
            turns: self.turn,
        });
        tracing::info!(enemy = %self.enemy.name, %outcome, turns = self.turn, "battle ended");
        Ok(())
    }
}

/// Returns true if the character is able to start a battle.
pub fn can_fight(character: &Character) -> bool {
    !character.is_dead()
}

/// Run a whole battle against `enemy`.
pub fn start_battle(
    character: &mut Character,
    enemy: Enemy,
    items: &ItemCatalog,
    controller: &mut impl BattleController,
    chance: &mut impl Chance,
) -> GameResult<BattleResult> {
    Battle::new(enemy).run(character, items, controller, chance)
}
