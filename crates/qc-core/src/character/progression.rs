//! Experience, level-up cascade, healing, and revival.

use super::Character;
use crate::error::{GameError, GameResult};

/// Max health gained per level.
pub const LEVEL_UP_HEALTH: i32 = 10;
/// Strength gained per level.
pub const LEVEL_UP_STRENGTH: i32 = 2;
/// Magic gained per level.
pub const LEVEL_UP_MAGIC: i32 = 2;

/// Experience needed to advance from `level` to the next one.
pub fn xp_threshold(level: u32) -> u32 {
    level.saturating_mul(100)
}

/// Grant experience, leveling up as many times as the total allows.
///
/// Each level-up spends the current threshold, raises max health, strength
/// and magic, and fully heals. The next threshold is computed from the new
/// level. Returns the number of levels gained.
pub fn gain_experience(character: &mut Character, amount: u32) -> GameResult<u32> {
    if character.is_dead() {
        return Err(GameError::CharacterDead(character.name().to_string()));
    }

    character.experience = character.experience.saturating_add(amount);
    let mut gained = 0;
    while character.experience >= xp_threshold(character.level) {
        character.experience -= xp_threshold(character.level);
        character.level += 1;
        character.max_health += LEVEL_UP_HEALTH;
        character.strength += LEVEL_UP_STRENGTH;
        character.magic += LEVEL_UP_MAGIC;
        character.health = character.max_health;
        gained += 1;
        tracing::info!(name = character.name(), level = character.level, "level up");
    }
    Ok(gained)
}

/// Heal a living character. Returns the health actually restored.
pub fn heal_character(character: &mut Character, amount: u32) -> GameResult<u32> {
    if character.is_dead() {
        return Err(GameError::CharacterDead(character.name().to_string()));
    }
    let missing = (character.max_health - character.health).max(0) as u32;
    let healed = amount.min(missing);
    character.health += healed as i32;
    Ok(healed)
}

/// Bring a dead character back at half of max health (rounded down).
///
/// Returns false and changes nothing if the character is alive.
pub fn revive_character(character: &mut Character) -> bool {
    if !character.is_dead() {
        return false;
    }
    character.health = character.max_health / 2;
    tracing::info!(name = character.name(), health = character.health, "revived");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use proptest::prelude::*;

    fn warrior() -> Character {
        Character::new("Hero", CharacterClass::Warrior)
    }

    #[test]
    fn threshold_scales_with_level() {
        assert_eq!(xp_threshold(1), 100);
        assert_eq!(xp_threshold(2), 200);
        assert_eq!(xp_threshold(7), 700);
    }

    #[test]
    fn gain_below_threshold() {
        let mut c = warrior();
        assert_eq!(gain_experience(&mut c, 99).unwrap(), 0);
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 99);
    }

    #[test]
    fn single_level_up() {
        let mut c = warrior();
        c.health = 50;
        assert_eq!(gain_experience(&mut c, 100).unwrap(), 1);
        assert_eq!(c.level, 2);
        assert_eq!(c.experience, 0);
        assert_eq!(c.max_health, 130);
        assert_eq!(c.health, 130);
        assert_eq!(c.strength, 17);
        assert_eq!(c.magic, 7);
    }

    #[test]
    fn cascade_uses_updated_threshold() {
        // 250 = 100 (to level 2) + 150 left, short of the 200 needed for level 3.
        let mut c = warrior();
        assert_eq!(gain_experience(&mut c, 250).unwrap(), 1);
        assert_eq!(c.level, 2);
        assert_eq!(c.experience, 150);
    }

    #[test]
    fn cascade_multiple_levels() {
        // 100 + 200 + 300 = 600 reaches level 4 exactly.
        let mut c = warrior();
        assert_eq!(gain_experience(&mut c, 650).unwrap(), 3);
        assert_eq!(c.level, 4);
        assert_eq!(c.experience, 50);
        assert_eq!(c.max_health, 150);
        assert_eq!(c.strength, 21);
    }

    #[test]
    fn dead_cannot_gain_experience() {
        let mut c = warrior();
        c.health = 0;
        assert_eq!(
            gain_experience(&mut c, 10),
            Err(GameError::CharacterDead("Hero".to_string()))
        );
        assert_eq!(c.experience, 0);
    }

    #[test]
    fn heal_at_full_health() {
        let mut c = warrior();
        assert_eq!(heal_character(&mut c, 25).unwrap(), 0);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn heal_partial_and_clamped() {
        let mut c = warrior();
        c.health = 100;
        assert_eq!(heal_character(&mut c, 5).unwrap(), 5);
        assert_eq!(c.health, 105);
        assert_eq!(heal_character(&mut c, 50).unwrap(), 15);
        assert_eq!(c.health, 120);
    }

    #[test]
    fn heal_dead_fails() {
        let mut c = warrior();
        c.health = 0;
        assert!(matches!(
            heal_character(&mut c, 10),
            Err(GameError::CharacterDead(_))
        ));
        assert_eq!(c.health, 0);
    }

    #[test]
    fn revive_living_is_noop() {
        let mut c = warrior();
        c.health = 7;
        assert!(!revive_character(&mut c));
        assert_eq!(c.health, 7);
    }

    #[test]
    fn revive_dead_rounds_down() {
        let mut c = Character::new("Sly", CharacterClass::Rogue);
        c.max_health = 91;
        c.health = 0;
        assert!(revive_character(&mut c));
        assert_eq!(c.health, 45);
    }

    proptest! {
        #[test]
        fn level_never_decreases_and_experience_stays_below_threshold(
            grants in proptest::collection::vec(0u32..2_000, 1..10)
        ) {
            let mut c = warrior();
            for xp in grants {
                let before = c.level;
                let gained = gain_experience(&mut c, xp).unwrap();
                prop_assert_eq!(c.level, before + gained);
                prop_assert!(c.experience < xp_threshold(c.level));
                prop_assert!(c.health <= c.max_health);
            }
        }

        #[test]
        fn heal_never_exceeds_max(start in 1i32..=120, amount in 0u32..500) {
            let mut c = warrior();
            c.health = start;
            let healed = heal_character(&mut c, amount).unwrap();
            prop_assert!(c.health <= c.max_health);
            prop_assert_eq!(c.health, start + healed as i32);
        }
    }
}
