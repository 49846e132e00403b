//! Configuration of Q-learning agent.
use super::EpsilonGreedy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`QLearning`](super::QLearning) agent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct QLearningConfig {
    /// Learning rate.
    pub alpha: f64,

    /// Discount factor.
    pub gamma: f64,

    /// Exploration during training.
    pub explorer: EpsilonGreedy,

    /// The number of states of the environment.
    pub n_states: usize,

    /// The number of actions of the environment.
    pub n_actions: usize,

    /// Seed of the random number generator of exploration.
    pub seed: u64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.6,
            explorer: EpsilonGreedy::new(0.1),
            n_states: 0,
            n_actions: 0,
            seed: 42,
        }
    }
}

impl QLearningConfig {
    /// Sets the learning rate.
    pub fn alpha(mut self, v: f64) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the explorer.
    pub fn explorer(mut self, v: EpsilonGreedy) -> Self {
        self.explorer = v;
        self
    }

    /// Sets a fixed exploration rate, replacing the explorer.
    pub fn eps(mut self, v: f64) -> Self {
        self.explorer = EpsilonGreedy::new(v);
        self
    }

    /// Sets the number of states.
    pub fn n_states(mut self, v: usize) -> Self {
        self.n_states = v;
        self
    }

    /// Sets the number of actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Constructs [`QLearningConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`QLearningConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_q_learning_config() -> Result<()> {
        let config = QLearningConfig::default()
            .alpha(0.3)
            .gamma(0.9)
            .explorer(EpsilonGreedy::with_decay(0.5, 0.001))
            .n_states(800)
            .n_actions(6);

        let dir = TempDir::new("q_learning_config")?;
        let path = dir.path().join("q_learning_config.yaml");

        config.save(&path)?;
        let config_ = QLearningConfig::load(&path)?;
        assert_eq!(config, config_);
        assert_eq!(config_.explorer.decay_rate, Some(0.001));
        Ok(())
    }
}
