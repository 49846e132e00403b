//! Random search over the hyperparameters of Q-learning.
//!
//! Every trial trains a fresh agent in a fresh environment, so trials share no
//! state. Only the driver, [`random_search`], compares trials and keeps the
//! table of the best one.
use anyhow::Result;
use log::info;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};
use taxi_rl_agent::{QLearning, QLearningConfig, QTable};
use taxi_rl_core::{
    record::{AggregateRecorder, NullRecorder},
    Configurable, Env, TabularEnv, Trainer, TrainerConfig,
};
use taxi_rl_env::{TaxiEnv, TaxiEnvConfig};

/// Hyperparameters sampled for a trial.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct Hyperparams {
    /// Learning rate.
    pub alpha: f64,

    /// Discount factor.
    pub gamma: f64,

    /// Exploration rate.
    pub eps: f64,
}

/// Ranges of the hyperparameters, inclusive on both ends.
///
/// `alpha` is sampled log-uniformly, the others uniformly.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SearchSpace {
    pub alpha: (f64, f64),
    pub gamma: (f64, f64),
    pub eps: (f64, f64),
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self {
            alpha: (0.1, 0.5),
            gamma: (0.7, 0.99),
            eps: (0.1, 1.0),
        }
    }
}

impl SearchSpace {
    /// Samples hyperparameters.
    pub fn sample(&self, rng: &mut impl Rng) -> Hyperparams {
        let (lo, hi) = (self.alpha.0.ln(), self.alpha.1.ln());
        Hyperparams {
            alpha: rng.gen_range(lo..=hi).exp(),
            gamma: rng.gen_range(self.gamma.0..=self.gamma.1),
            eps: rng.gen_range(self.eps.0..=self.eps.1),
        }
    }
}

/// Configuration of [`random_search`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SearchConfig {
    /// The environment every trial is trained in.
    pub env_config: TaxiEnvConfig,

    /// Ranges of the hyperparameters.
    pub space: SearchSpace,

    /// The number of trials.
    pub n_trials: usize,

    /// The number of training episodes of a trial.
    pub n_episodes: usize,

    /// Seed of the sampler. Trial `i` seeds its environment and agent with `seed + i`.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            env_config: TaxiEnvConfig::default(),
            space: SearchSpace::default(),
            n_trials: 100,
            n_episodes: 2000,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Sets the number of trials.
    pub fn n_trials(mut self, v: usize) -> Self {
        self.n_trials = v;
        self
    }

    /// Sets the number of training episodes of a trial.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.n_episodes = v;
        self
    }

    /// Sets the search space.
    pub fn space(mut self, v: SearchSpace) -> Self {
        self.space = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }
}

/// Outcome of a trial.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Trial {
    /// 0-based trial number.
    pub number: usize,

    /// Sampled hyperparameters.
    pub params: Hyperparams,

    /// Average return over the final 100 training episodes.
    pub average_return: f32,
}

/// Trials of a search together with the table of the best one.
pub struct SearchResult {
    /// Every trial in order.
    pub trials: Vec<Trial>,

    /// Number of the best trial, `None` if no trial ran.
    pub best: Option<usize>,

    /// Table learned in the best trial.
    pub best_q_table: Option<QTable>,
}

impl SearchResult {
    /// The best trial.
    pub fn best_trial(&self) -> Option<&Trial> {
        self.best.map(|ix| &self.trials[ix])
    }

    /// Saves the trials as YAML.
    pub fn save_trials(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self.trials)?.as_bytes())?;
        Ok(())
    }

    /// Loads trials saved with [`SearchResult::save_trials`].
    pub fn load_trials(path: impl AsRef<Path>) -> Result<Vec<Trial>> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        Ok(serde_yaml::from_reader(rdr)?)
    }
}

/// Trains an agent with the given hyperparameters for `n_episodes` episodes.
///
/// Returns the average return of the final 100 episodes and the learned table.
pub fn run_trial(
    env_config: &TaxiEnvConfig,
    params: &Hyperparams,
    n_episodes: usize,
    seed: u64,
) -> Result<(f32, QTable)> {
    let env = TaxiEnv::build(env_config, seed as i64)?;
    let agent_config = QLearningConfig::default()
        .alpha(params.alpha)
        .gamma(params.gamma)
        .eps(params.eps)
        .n_states(env.n_states())
        .n_actions(env.n_actions())
        .seed(seed);
    let mut agent = QLearning::<TaxiEnv>::build(agent_config);
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(NullRecorder::new());
    let mut trainer = Trainer::build(TrainerConfig::default().max_episodes(n_episodes));

    let report = trainer.train(env, &mut agent, &mut recorder)?;

    Ok((report.average_return(), agent.into_q_table()))
}

/// Runs independent trials with sampled hyperparameters and keeps the best table.
///
/// A trial is better than the best so far only if its average return is strictly larger.
pub fn random_search(config: &SearchConfig) -> Result<SearchResult> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut result = SearchResult {
        trials: Vec::with_capacity(config.n_trials),
        best: None,
        best_q_table: None,
    };
    let mut best_return = f32::NEG_INFINITY;

    for number in 0..config.n_trials {
        let params = config.space.sample(&mut rng);
        let seed = config.seed.wrapping_add(number as u64);
        let (average_return, q_table) =
            run_trial(&config.env_config, &params, config.n_episodes, seed)?;
        info!(
            "Trial {}: alpha = {:.4}, gamma = {:.4}, eps = {:.4}, average return = {:.3}",
            number, params.alpha, params.gamma, params.eps, average_return
        );

        if average_return > best_return {
            best_return = average_return;
            result.best = Some(number);
            result.best_q_table = Some(q_table);
        }
        result.trials.push(Trial {
            number,
            params,
            average_return,
        });
    }

    if let Some(best) = result.best_trial() {
        info!("Best trial: {:?}", best);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_sample_stays_in_range() {
        let space = SearchSpace::default();
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..1000 {
            let p = space.sample(&mut rng);
            assert!(p.alpha >= 0.1 - 1e-12 && p.alpha <= 0.5 + 1e-12);
            assert!(p.gamma >= 0.7 && p.gamma <= 0.99);
            assert!(p.eps >= 0.1 && p.eps <= 1.0);
        }
    }

    #[test]
    fn test_random_search_keeps_best() -> Result<()> {
        let config = SearchConfig::default().n_trials(3).n_episodes(20);
        let result = random_search(&config)?;

        assert_eq!(result.trials.len(), 3);
        let best = result.best_trial().unwrap();
        assert!(result
            .trials
            .iter()
            .all(|t| t.average_return <= best.average_return));
        assert_eq!(result.best_q_table.as_ref().unwrap().shape(), (800, 6));

        // The same seed reproduces the search
        let again = random_search(&config)?;
        assert_eq!(again.trials, result.trials);

        let dir = TempDir::new("search")?;
        let path = dir.path().join("trials.yaml");
        result.save_trials(&path)?;
        assert_eq!(SearchResult::load_trials(&path)?, result.trials);
        Ok(())
    }

    #[test]
    fn test_no_trials() -> Result<()> {
        let result = random_search(&SearchConfig::default().n_trials(0))?;
        assert!(result.trials.is_empty());
        assert!(result.best_trial().is_none());
        assert!(result.best_q_table.is_none());
        Ok(())
    }
}
