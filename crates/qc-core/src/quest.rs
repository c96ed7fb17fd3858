//! Quest graph: accepting, completing, and abandoning quests.
//!
//! Per character, each quest is `Unseen`, `Active`, or `Completed`.
//! Accepting moves `Unseen -> Active`, completing moves `Active -> Completed`
//! and pays out the rewards, abandoning moves `Active -> Unseen`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Quest, QuestCatalog, QuestId};
use crate::character::{Character, gain_experience};
use crate::error::{GameError, GameResult};

/// A character's progress on one quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    /// Never accepted, or abandoned.
    Unseen,
    /// In progress.
    Active,
    /// Finished.
    Completed,
}

impl std::fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unseen => write!(f, "unseen"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// What completing a quest paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuestReward {
    /// Experience granted.
    pub xp: u32,
    /// Gold granted.
    pub gold: u32,
    /// Levels gained from the experience.
    pub levels_gained: u32,
}

/// Where a character stands on a quest.
pub fn quest_status(character: &Character, quest_id: &str) -> QuestStatus {
    if character.completed_quests.iter().any(|q| q == quest_id) {
        QuestStatus::Completed
    } else if character.active_quests.iter().any(|q| q == quest_id) {
        QuestStatus::Active
    } else {
        QuestStatus::Unseen
    }
}

fn prerequisite_met(character: &Character, quest: &Quest) -> bool {
    quest
        .prerequisite
        .as_ref()
        .is_none_or(|p| character.completed_quests.contains(p))
}

/// Run every check that `accept_quest` performs, without mutating.
fn check_accept<'a>(
    character: &Character,
    quest_id: &str,
    quests: &'a QuestCatalog,
) -> GameResult<&'a Quest> {
    let quest = quests.quest(quest_id)?;
    if character.level < quest.required_level {
        return Err(GameError::InsufficientLevel {
            quest: quest_id.to_string(),
            required: quest.required_level,
            current: character.level,
        });
    }
    if !prerequisite_met(character, quest) {
        return Err(GameError::QuestRequirementsNotMet {
            quest: quest_id.to_string(),
            prerequisite: quest.prerequisite.clone().unwrap_or_default(),
        });
    }
    match quest_status(character, quest_id) {
        QuestStatus::Completed => Err(GameError::QuestAlreadyCompleted(quest_id.to_string())),
        QuestStatus::Active => Err(GameError::QuestAlreadyActive(quest_id.to_string())),
        QuestStatus::Unseen => Ok(quest),
    }
}

/// Start a quest.
pub fn accept_quest(character: &mut Character, quest_id: &str, quests: &QuestCatalog) -> GameResult<()> {
    check_accept(character, quest_id, quests)?;
    character.active_quests.push(quest_id.to_string());
    tracing::info!(quest = quest_id, "quest accepted");
    Ok(())
}

/// Returns true if `accept_quest` would succeed.
pub fn can_accept_quest(character: &Character, quest_id: &str, quests: &QuestCatalog) -> bool {
    check_accept(character, quest_id, quests).is_ok()
}

/// Finish an active quest and collect its rewards.
///
/// Reward experience goes through [`gain_experience`], so it can trigger
/// level-ups.
pub fn complete_quest(
    character: &mut Character,
    quest_id: &str,
    quests: &QuestCatalog,
) -> GameResult<QuestReward> {
    let quest = quests.quest(quest_id)?;
    let pos = character
        .active_quests
        .iter()
        .position(|q| q == quest_id)
        .ok_or_else(|| GameError::QuestNotActive(quest_id.to_string()))?;
    if character.is_dead() {
        return Err(GameError::CharacterDead(character.name().to_string()));
    }

    character.active_quests.remove(pos);
    character.completed_quests.push(quest_id.to_string());
    let levels_gained = gain_experience(character, quest.reward_xp)?;
    character.gold = character.gold.saturating_add(quest.reward_gold);

    tracing::info!(
        quest = quest_id,
        xp = quest.reward_xp,
        gold = quest.reward_gold,
        "quest completed"
    );
    Ok(QuestReward {
        xp: quest.reward_xp,
        gold: quest.reward_gold,
        levels_gained,
    })
}

/// Drop an active quest. It can be accepted again later.
pub fn abandon_quest(character: &mut Character, quest_id: &str) -> GameResult<()> {
    let pos = character
        .active_quests
        .iter()
        .position(|q| q == quest_id)
        .ok_or_else(|| GameError::QuestNotActive(quest_id.to_string()))?;
    character.active_quests.remove(pos);
    tracing::info!(quest = quest_id, "quest abandoned");
    Ok(())
}

/// Definitions of the character's active quests. Unknown ids are skipped.
pub fn active_quests<'a>(character: &Character, quests: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .active_quests
        .iter()
        .filter_map(|id| quests.get(id))
        .collect()
}

/// Definitions of the character's completed quests. Unknown ids are skipped.
pub fn completed_quests<'a>(character: &Character, quests: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .completed_quests
        .iter()
        .filter_map(|id| quests.get(id))
        .collect()
}

/// Quests the character could accept right now.
pub fn available_quests<'a>(character: &Character, quests: &'a QuestCatalog) -> Vec<&'a Quest> {
    quests
        .iter()
        .filter(|q| q.required_level <= character.level)
        .filter(|q| prerequisite_met(character, q))
        .filter(|q| quest_status(character, &q.id) == QuestStatus::Unseen)
        .collect()
}

/// The quest and all of its prerequisites, root first.
///
/// Fails with `QuestNotFound` if any link is missing and with
/// `CorruptedData` if the chain loops back on itself.
pub fn prerequisite_chain(quest_id: &str, quests: &QuestCatalog) -> GameResult<Vec<QuestId>> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = quests.quest(quest_id)?;
    loop {
        if !seen.insert(current.id.as_str()) {
            return Err(GameError::CorruptedData(format!(
                "prerequisite cycle through quest '{}'",
                current.id
            )));
        }
        chain.push(current.id.clone());
        match &current.prerequisite {
            Some(prereq) => current = quests.quest(prereq)?,
            None => break,
        }
    }
    chain.reverse();
    Ok(chain)
}

/// Share of catalog quests completed, as a percentage.
pub fn completion_percentage(character: &Character, quests: &QuestCatalog) -> f64 {
    if quests.is_empty() {
        return 0.0;
    }
    let done = character
        .completed_quests
        .iter()
        .filter(|id| quests.contains(id))
        .count();
    done as f64 / quests.len() as f64 * 100.0
}

/// Total rewards from every completed quest in the catalog.
pub fn total_rewards_earned(character: &Character, quests: &QuestCatalog) -> QuestReward {
    completed_quests(character, quests)
        .into_iter()
        .fold(QuestReward::default(), |acc, q| QuestReward {
            xp: acc.xp.saturating_add(q.reward_xp),
            gold: acc.gold.saturating_add(q.reward_gold),
            levels_gained: 0,
        })
}

/// Quests whose required level falls within `min..=max`.
pub fn quests_by_level(quests: &QuestCatalog, min: u32, max: u32) -> Vec<&Quest> {
    quests
        .iter()
        .filter(|q| (min..=max).contains(&q.required_level))
        .collect()
}
