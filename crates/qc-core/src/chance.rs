//! Injectable randomness for escape attempts and critical strikes.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// A source of yes/no outcomes with a given success probability.
pub trait Chance {
    /// Returns true with the given probability (clamped to 0.0-1.0).
    fn succeeds(&mut self, probability: f64) -> bool;
}

impl Chance for StdRng {
    fn succeeds(&mut self, probability: f64) -> bool {
        self.random_bool(probability.clamp(0.0, 1.0))
    }
}

/// Predetermined outcomes, ignoring the probability.
///
/// Plays back a script, then repeats the fallback outcome once the script
/// runs out.
#[derive(Debug, Clone)]
pub struct FixedChance {
    script: VecDeque<bool>,
    fallback: bool,
}

impl FixedChance {
    /// Every roll succeeds.
    pub fn always() -> Self {
        Self {
            script: VecDeque::new(),
            fallback: true,
        }
    }

    /// Every roll fails.
    pub fn never() -> Self {
        Self {
            script: VecDeque::new(),
            fallback: false,
        }
    }

    /// Play back `outcomes` in order, then fail.
    pub fn sequence(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            script: outcomes.into_iter().collect(),
            fallback: false,
        }
    }
}

impl Chance for FixedChance {
    fn succeeds(&mut self, _probability: f64) -> bool {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
