//! Stat effects: signed deltas applied to a character.
//!
//! Items carry an [`Effect`] such as `health:20` or `strength:5`. Health is
//! clamped to `[0, max_health]`; strength and magic are floored at zero; gold
//! is checked so it can never go negative.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::{GameError, GameResult};

/// A stat that effects can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Current health.
    Health,
    /// Strength.
    Strength,
    /// Magic.
    Magic,
    /// Gold.
    Gold,
}

impl Stat {
    /// Parse a stat name, failing with `InvalidStat` if unrecognized.
    pub fn parse(name: &str) -> GameResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "health" => Ok(Self::Health),
            "strength" => Ok(Self::Strength),
            "magic" => Ok(Self::Magic),
            "gold" => Ok(Self::Gold),
            _ => Err(GameError::InvalidStat(name.to_string())),
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Health => write!(f, "health"),
            Self::Strength => write!(f, "strength"),
            Self::Magic => write!(f, "magic"),
            Self::Gold => write!(f, "gold"),
        }
    }
}

/// A signed change to one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// The stat to change.
    pub stat: Stat,
    /// Signed magnitude.
    pub amount: i32,
}

impl Effect {
    /// Create an effect.
    pub fn new(stat: Stat, amount: i32) -> Self {
        Self { stat, amount }
    }

    /// The effect that undoes this one.
    pub fn inverse(self) -> Self {
        Self {
            stat: self.stat,
            amount: -self.amount,
        }
    }
}

impl std::str::FromStr for Effect {
    type Err = GameError;

    /// Parse `stat_name:signed_int`, e.g. `health:20` or `strength:-2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stat, amount) = s
            .split_once(':')
            .ok_or_else(|| GameError::InvalidEffect(s.to_string()))?;
        let amount = amount
            .trim()
            .parse::<i32>()
            .map_err(|_| GameError::InvalidEffect(s.to_string()))?;
        Ok(Self::new(Stat::parse(stat)?, amount))
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.stat, self.amount)
    }
}

/// Check that an effect could be applied without failing.
pub fn check_effect(character: &Character, effect: Effect) -> GameResult<()> {
    if effect.stat == Stat::Gold && effect.amount < 0 {
        let needed = effect.amount.unsigned_abs();
        if character.gold < needed {
            return Err(GameError::InsufficientResources {
                needed,
                available: character.gold,
            });
        }
    }
    Ok(())
}

/// Apply a signed delta to a stat. Returns the stat's new value.
pub fn apply_effect(character: &mut Character, stat: Stat, amount: i32) -> GameResult<i64> {
    let effect = Effect::new(stat, amount);
    check_effect(character, effect)?;
    let value = match stat {
        Stat::Health => {
            character.health = character
                .health
                .saturating_add(amount)
                .clamp(0, character.max_health);
            i64::from(character.health)
        }
        Stat::Strength => {
            character.strength = character.strength.saturating_add(amount).max(0);
            i64::from(character.strength)
        }
        Stat::Magic => {
            character.magic = character.magic.saturating_add(amount).max(0);
            i64::from(character.magic)
        }
        Stat::Gold => i64::from(add_gold(character, i64::from(amount))?),
    };
    tracing::debug!(%effect, value, "effect applied");
    Ok(value)
}

/// Apply a delta to a stat given by name.
pub fn apply_named_effect(
    character: &mut Character,
    stat_name: &str,
    amount: i32,
) -> GameResult<i64> {
    apply_effect(character, Stat::parse(stat_name)?, amount)
}

/// Add (or, with a negative delta, spend) gold. Returns the new total.
///
/// Fails with `InsufficientResources` and leaves gold untouched if the
/// result would be negative.
pub fn add_gold(character: &mut Character, delta: i64) -> GameResult<u32> {
    let total = i64::from(character.gold) + delta;
    if total < 0 {
        return Err(GameError::InsufficientResources {
            needed: u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX),
            available: character.gold,
        });
    }
    character.gold = u32::try_from(total).unwrap_or(u32::MAX);
    Ok(character.gold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;

    fn mage() -> Character {
        Character::new("Aria", CharacterClass::Mage)
    }

    #[test]
    fn stat_parse() {
        assert_eq!(Stat::parse("health"), Ok(Stat::Health));
        assert_eq!(Stat::parse("Strength"), Ok(Stat::Strength));
        assert_eq!(
            Stat::parse("luck"),
            Err(GameError::InvalidStat("luck".to_string()))
        );
    }

    #[test]
    fn effect_parse_and_display() {
        let e: Effect = "health:20".parse().unwrap();
        assert_eq!(e, Effect::new(Stat::Health, 20));
        assert_eq!(e.to_string(), "health:20");

        let e: Effect = "strength:-3".parse().unwrap();
        assert_eq!(e.amount, -3);
        assert_eq!(e.inverse(), Effect::new(Stat::Strength, 3));
    }

    #[test]
    fn effect_parse_errors() {
        assert!(matches!(
            "health".parse::<Effect>(),
            Err(GameError::InvalidEffect(_))
        ));
        assert!(matches!(
            "health:lots".parse::<Effect>(),
            Err(GameError::InvalidEffect(_))
        ));
        assert!(matches!(
            "charisma:4".parse::<Effect>(),
            Err(GameError::InvalidStat(_))
        ));
    }

    #[test]
    fn health_clamped_to_max() {
        let mut c = mage();
        c.health = 70;
        assert_eq!(apply_effect(&mut c, Stat::Health, 50).unwrap(), 80);
        assert_eq!(c.health, 80);
    }

    #[test]
    fn health_clamped_to_zero() {
        let mut c = mage();
        assert_eq!(apply_effect(&mut c, Stat::Health, -500).unwrap(), 0);
        assert!(c.is_dead());
    }

    #[test]
    fn strength_and_magic_add() {
        let mut c = mage();
        apply_effect(&mut c, Stat::Strength, 5).unwrap();
        apply_effect(&mut c, Stat::Magic, -3).unwrap();
        assert_eq!(c.strength, 13);
        assert_eq!(c.magic, 17);
    }

    #[test]
    fn strength_and_magic_floored_at_zero() {
        let mut c = mage();
        assert_eq!(apply_effect(&mut c, Stat::Magic, -30).unwrap(), 0);
        assert_eq!(apply_effect(&mut c, Stat::Strength, -100).unwrap(), 0);
        assert_eq!(c.magic, 0);
        assert_eq!(c.strength, 0);
    }

    #[test]
    fn gold_cannot_go_negative() {
        let mut c = mage();
        assert_eq!(
            apply_effect(&mut c, Stat::Gold, -150),
            Err(GameError::InsufficientResources {
                needed: 150,
                available: 100
            })
        );
        assert_eq!(c.gold, 100);
        assert_eq!(apply_effect(&mut c, Stat::Gold, -100).unwrap(), 0);
    }

    #[test]
    fn named_effect_rejects_unknown_stat() {
        let mut c = mage();
        let before = c.clone();
        assert_eq!(
            apply_named_effect(&mut c, "wisdom", 3),
            Err(GameError::InvalidStat("wisdom".to_string()))
        );
        assert_eq!(c, before);
    }

    #[test]
    fn add_gold_returns_total() {
        let mut c = mage();
        assert_eq!(add_gold(&mut c, 25).unwrap(), 125);
        assert_eq!(add_gold(&mut c, -125).unwrap(), 0);
        assert!(add_gold(&mut c, -1).is_err());
        assert_eq!(c.gold, 0);
    }
}
