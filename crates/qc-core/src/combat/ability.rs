//! Class special abilities.
//!
//! Each class maps to exactly one ability. Resolving an ability is pure: it
//! reads the combatants and returns the effect, which the battle then
//! applies.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use crate::chance::Chance;
use crate::character::Character;

/// Success probability of the rogue's critical strike.
pub const CRITICAL_STRIKE_CHANCE: f64 = 0.5;

/// Health restored by the cleric's heal.
pub const CLERIC_HEAL_AMOUNT: u32 = 30;

/// A class-specific battle ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialAbility {
    /// Warrior: twice strength, always hits.
    PowerStrike,
    /// Mage: twice magic, always hits.
    Fireball,
    /// Rogue: three times strength, half the time.
    CriticalStrike,
    /// Cleric: restores health, deals no damage.
    Heal,
}

/// The outcome of using an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityEffect {
    /// Damage dealt to the enemy, never negative.
    Damage(i32),
    /// Health the user tries to restore (clamped when applied).
    Heal(u32),
    /// Nothing happened.
    Missed,
}

impl SpecialAbility {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::PowerStrike => "Power Strike",
            Self::Fireball => "Fireball",
            Self::CriticalStrike => "Critical Strike",
            Self::Heal => "Heal",
        }
    }

    /// Work out what the ability does this turn.
    pub fn resolve(self, user: &Character, _target: &Enemy, chance: &mut impl Chance) -> AbilityEffect {
        match self {
            Self::PowerStrike => AbilityEffect::Damage((2 * user.strength).max(0)),
            Self::Fireball => AbilityEffect::Damage((2 * user.magic).max(0)),
            Self::CriticalStrike => {
                if chance.succeeds(CRITICAL_STRIKE_CHANCE) {
                    AbilityEffect::Damage((3 * user.strength).max(0))
                } else {
                    AbilityEffect::Missed
                }
            }
            Self::Heal => AbilityEffect::Heal(CLERIC_HEAL_AMOUNT),
        }
    }
}

impl std::fmt::Display for SpecialAbility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance::FixedChance;
    use crate::character::CharacterClass;
    use crate::combat::enemy::EnemyKind;

    fn resolve(class: CharacterClass, chance: &mut FixedChance) -> AbilityEffect {
        let user = Character::new("Hero", class);
        let goblin = EnemyKind::Goblin.spawn();
        class.special_ability().resolve(&user, &goblin, chance)
    }

    #[test]
    fn warrior_power_strike() {
        assert_eq!(
            resolve(CharacterClass::Warrior, &mut FixedChance::never()),
            AbilityEffect::Damage(30)
        );
    }

    #[test]
    fn mage_fireball() {
        assert_eq!(
            resolve(CharacterClass::Mage, &mut FixedChance::never()),
            AbilityEffect::Damage(40)
        );
    }

    #[test]
    fn rogue_critical_strike() {
        assert_eq!(
            resolve(CharacterClass::Rogue, &mut FixedChance::always()),
            AbilityEffect::Damage(36)
        );
        assert_eq!(
            resolve(CharacterClass::Rogue, &mut FixedChance::never()),
            AbilityEffect::Missed
        );
    }

    #[test]
    fn negative_stats_deal_no_damage() {
        let mut user = Character::new("Aria", CharacterClass::Mage);
        user.magic = -10;
        let goblin = EnemyKind::Goblin.spawn();
        assert_eq!(
            SpecialAbility::Fireball.resolve(&user, &goblin, &mut FixedChance::never()),
            AbilityEffect::Damage(0)
        );
        user.strength = -4;
        assert_eq!(
            SpecialAbility::CriticalStrike.resolve(&user, &goblin, &mut FixedChance::always()),
            AbilityEffect::Damage(0)
        );
    }

    #[test]
    fn cleric_heal() {
        assert_eq!(
            resolve(CharacterClass::Cleric, &mut FixedChance::never()),
            AbilityEffect::Heal(30)
        );
    }

    #[test]
    fn names() {
        assert_eq!(SpecialAbility::PowerStrike.to_string(), "Power Strike");
        assert_eq!(CharacterClass::Mage.special_ability().name(), "Fireball");
    }
}
