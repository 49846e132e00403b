//! Exploration strategy of Q-learning.
use crate::QTable;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy explorer.
///
/// With probability `eps` a uniformly random action is taken, otherwise the
/// action with the largest value. If `decay_rate` is set, `eps` decays after
/// every episode as `eps_min + (eps_max - eps_min) * exp(-decay_rate * episode)`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    pub eps: f64,
    pub eps_max: f64,
    pub eps_min: f64,
    pub decay_rate: Option<f64>,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer with a fixed epsilon.
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            eps_max: 1.0,
            eps_min: 0.01,
            decay_rate: None,
        }
    }

    /// Constructs epsilon-greedy explorer that explores with `eps` during the
    /// first episode and then decays at `decay_rate`.
    pub fn with_decay(eps: f64, decay_rate: f64) -> Self {
        Self {
            decay_rate: Some(decay_rate),
            ..Self::new(eps)
        }
    }

    /// Set the epsilon value at the start of decay.
    pub fn eps_max(mut self, v: f64) -> Self {
        self.eps_max = v;
        self
    }

    /// Set the lower bound of decay.
    pub fn eps_min(mut self, v: f64) -> Self {
        self.eps_min = v;
        self
    }

    /// Takes an action in `state`.
    pub fn action(&self, q_table: &QTable, state: usize, rng: &mut impl Rng) -> usize {
        if rng.gen::<f64>() < self.eps {
            rng.gen_range(0..q_table.n_actions())
        } else {
            q_table.argmax(state)
        }
    }

    /// Updates epsilon after episode `episode` (0-based) has finished.
    pub fn on_episode_end(&mut self, episode: usize) {
        if let Some(rate) = self.decay_rate {
            self.eps = self.eps_min + (self.eps_max - self.eps_min) * (-rate * episode as f64).exp();
        }
    }
}
