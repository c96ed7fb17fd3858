//! Enemy templates and encounter selection.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// The enemy templates the game knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Weak early-game foe.
    Goblin,
    /// Mid-game brute.
    Orc,
    /// Late-game boss.
    Dragon,
}

impl EnemyKind {
    /// Parse an enemy type name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "goblin" => Some(Self::Goblin),
            "orc" => Some(Self::Orc),
            "dragon" => Some(Self::Dragon),
            _ => None,
        }
    }

    /// The enemy a character of this level runs into while exploring.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=2 => Self::Goblin,
            3..=5 => Self::Orc,
            _ => Self::Dragon,
        }
    }

    /// A fresh enemy at full health.
    pub fn spawn(self) -> Enemy {
        let (name, health, strength, magic, xp_reward, gold_reward) = match self {
            Self::Goblin => ("Goblin", 50, 8, 2, 25, 10),
            Self::Orc => ("Orc", 80, 12, 5, 50, 25),
            Self::Dragon => ("Dragon", 200, 25, 15, 200, 100),
        };
        Enemy {
            name: name.to_string(),
            health,
            max_health: health,
            strength,
            magic,
            xp_reward,
            gold_reward,
        }
    }
}

/// An opponent. Created per encounter and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Display name.
    pub name: String,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Attack power.
    pub strength: i32,
    /// Magic power.
    pub magic: i32,
    /// Experience granted when defeated.
    pub xp_reward: u32,
    /// Gold granted when defeated.
    pub gold_reward: u32,
}

impl Enemy {
    /// Returns true once health has dropped to zero.
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// Experience and gold won from a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rewards {
    /// Experience.
    pub xp: u32,
    /// Gold.
    pub gold: u32,
}

/// Create an enemy from a type name, failing with `InvalidTarget` if unknown.
pub fn create_enemy(kind: &str) -> GameResult<Enemy> {
    EnemyKind::parse(kind)
        .map(EnemyKind::spawn)
        .ok_or_else(|| GameError::InvalidTarget(kind.to_string()))
}

/// What defeating this enemy is worth.
pub fn victory_rewards(enemy: &Enemy) -> Rewards {
    Rewards {
        xp: enemy.xp_reward,
        gold: enemy.gold_reward,
    }
}
