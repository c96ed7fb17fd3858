//! The four playable classes and their starting stats.

use serde::{Deserialize, Serialize};

use crate::combat::ability::SpecialAbility;
use crate::error::GameError;

/// Starting stats granted by a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    /// Starting (and maximum) health.
    pub health: i32,
    /// Starting strength.
    pub strength: i32,
    /// Starting magic.
    pub magic: i32,
}

/// A playable character class. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    /// High health and strength.
    Warrior,
    /// Fragile, strong magic.
    Mage,
    /// Balanced, gambles on critical strikes.
    Rogue,
    /// Sturdy healer.
    Cleric,
}

impl CharacterClass {
    /// All classes, in menu order.
    pub const ALL: [Self; 4] = [Self::Warrior, Self::Mage, Self::Rogue, Self::Cleric];

    /// Parse a class name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "warrior" => Some(Self::Warrior),
            "mage" => Some(Self::Mage),
            "rogue" => Some(Self::Rogue),
            "cleric" => Some(Self::Cleric),
            _ => None,
        }
    }

    /// Starting stats for this class.
    pub fn base_stats(self) -> BaseStats {
        let (health, strength, magic) = match self {
            Self::Warrior => (120, 15, 5),
            Self::Mage => (80, 8, 20),
            Self::Rogue => (90, 12, 10),
            Self::Cleric => (100, 10, 15),
        };
        BaseStats {
            health,
            strength,
            magic,
        }
    }

    /// The special ability this class uses in battle.
    pub fn special_ability(self) -> SpecialAbility {
        match self {
            Self::Warrior => SpecialAbility::PowerStrike,
            Self::Mage => SpecialAbility::Fireball,
            Self::Rogue => SpecialAbility::CriticalStrike,
            Self::Cleric => SpecialAbility::Heal,
        }
    }
}

impl std::str::FromStr for CharacterClass {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GameError::InvalidCharacterClass(s.to_string()))
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warrior => write!(f, "Warrior"),
            Self::Mage => write!(f, "Mage"),
            Self::Rogue => write!(f, "Rogue"),
            Self::Cleric => write!(f, "Cleric"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(CharacterClass::parse("warrior"), Some(CharacterClass::Warrior));
        assert_eq!(CharacterClass::parse("MAGE"), Some(CharacterClass::Mage));
        assert_eq!(CharacterClass::parse(" Rogue "), Some(CharacterClass::Rogue));
        assert_eq!(CharacterClass::parse("Cleric"), Some(CharacterClass::Cleric));
        assert_eq!(CharacterClass::parse("Bard"), None);
    }

    #[test]
    fn from_str_error() {
        let err = "Necromancer".parse::<CharacterClass>().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidCharacterClass("Necromancer".to_string())
        );
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for class in CharacterClass::ALL {
            assert_eq!(CharacterClass::parse(&class.to_string()), Some(class));
        }
    }

    #[test]
    fn base_stats_per_class() {
        assert_eq!(
            CharacterClass::Warrior.base_stats(),
            BaseStats {
                health: 120,
                strength: 15,
                magic: 5
            }
        );
        assert_eq!(CharacterClass::Mage.base_stats().magic, 20);
        assert_eq!(CharacterClass::Rogue.base_stats().health, 90);
        assert_eq!(CharacterClass::Cleric.base_stats().strength, 10);
    }
}
