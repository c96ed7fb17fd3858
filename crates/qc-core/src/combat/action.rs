//! Combat actions, damage, and event logging.

use crate::catalog::ItemId;

/// Chance that an escape attempt succeeds.
pub const ESCAPE_CHANCE: f64 = 0.5;

/// An action the player can take on their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatAction {
    /// A basic strength-based attack.
    Attack,
    /// The class special ability.
    Special,
    /// Use a consumable from the inventory.
    UseItem(ItemId),
    /// Try to run away.
    Flee,
}

impl CombatAction {
    /// Parse a battle command such as `attack`, `special`, `use health_potion`
    /// or `flee`.
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split_whitespace();
        let cmd = parts.next()?.to_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return None;
        }
        match (cmd.as_str(), arg) {
            ("attack" | "a", None) => Some(Self::Attack),
            ("special" | "s", None) => Some(Self::Special),
            ("flee" | "run" | "f", None) => Some(Self::Flee),
            ("use", Some(item)) => Some(Self::UseItem(item.to_string())),
            _ => None,
        }
    }
}

impl std::fmt::Display for CombatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::Special => write!(f, "Special ability"),
            Self::UseItem(item) => write!(f, "Use {item}"),
            Self::Flee => write!(f, "Flee"),
        }
    }
}

/// Who acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combatant {
    /// The player's character.
    Player,
    /// The enemy.
    Enemy,
}

/// A recorded combat event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatEvent {
    /// Which turn this happened in (1-based, player on odd turns).
    pub turn: u32,
    /// Who acted.
    pub actor: Combatant,
    /// A narrative description of what happened.
    pub description: String,
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[turn {}] {}", self.turn, self.description)
    }
}

/// Basic attack damage: attacker strength minus a quarter of the defender's,
/// never less than 1.
pub fn calculate_damage(attacker_strength: i32, defender_strength: i32) -> i32 {
    attacker_strength
        .saturating_sub(defender_strength.div_euclid(4))
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn damage_formula() {
        assert_eq!(calculate_damage(15, 8), 13);
        assert_eq!(calculate_damage(8, 15), 5);
        assert_eq!(calculate_damage(25, 15), 22);
    }

    #[test]
    fn damage_floor_is_one() {
        assert_eq!(calculate_damage(2, 200), 1);
        assert_eq!(calculate_damage(0, 0), 1);
    }

    #[test]
    fn parse_actions() {
        assert_eq!(CombatAction::parse("attack"), Some(CombatAction::Attack));
        assert_eq!(CombatAction::parse("A"), Some(CombatAction::Attack));
        assert_eq!(CombatAction::parse("special"), Some(CombatAction::Special));
        assert_eq!(CombatAction::parse("run"), Some(CombatAction::Flee));
        assert_eq!(
            CombatAction::parse("use health_potion"),
            Some(CombatAction::UseItem("health_potion".to_string()))
        );
        assert_eq!(CombatAction::parse("use"), None);
        assert_eq!(CombatAction::parse("attack twice"), None);
        assert_eq!(CombatAction::parse("dance"), None);
        assert_eq!(CombatAction::parse(""), None);
    }

    #[test]
    fn display() {
        assert_eq!(CombatAction::Attack.to_string(), "Attack");
        assert_eq!(
            CombatAction::UseItem("elixir".to_string()).to_string(),
            "Use elixir"
        );
        let event = CombatEvent {
            turn: 3,
            actor: Combatant::Enemy,
            description: "Goblin hits for 5".to_string(),
        };
        assert_eq!(event.to_string(), "[turn 3] Goblin hits for 5");
    }

    proptest! {
        #[test]
        fn damage_always_positive(attacker in -50i32..500, defender in -50i32..500) {
            prop_assert!(calculate_damage(attacker, defender) >= 1);
        }
    }
}
