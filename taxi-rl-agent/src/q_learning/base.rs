//! Tabular Q-learning agent.
use super::{EpsilonGreedy, QLearningConfig};
use crate::QTable;
use anyhow::Result;
use log::info;
use rand::{rngs::SmallRng, SeedableRng};
use std::{fs, marker::PhantomData, path::Path};
use taxi_rl_core::{Agent, Configurable, Env, Policy, Transition};

/// File name of the table in the directory given to [`Agent::save_params`].
pub const Q_TABLE_FILE: &str = "q_table.bin";

/// Tabular Q-learning agent.
///
/// Observations and actions of the environment are used as indices of the
/// [`QTable`]. Every transition `(s, a, r, s')` updates
///
/// ```text
/// Q(s, a) += alpha * (r + gamma * max_a' Q(s', a') - Q(s, a))
/// ```
///
/// Terminal transitions are not treated specially: the bootstrap term is kept.
///
/// In training mode, actions are taken by [`EpsilonGreedy`]. In evaluation mode,
/// the agent is greedy.
pub struct QLearning<E> {
    q_table: QTable,
    alpha: f64,
    gamma: f64,
    explorer: EpsilonGreedy,
    train: bool,
    n_opts: usize,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E> QLearning<E>
where
    E: Env,
    E::Obs: Into<usize>,
    E::Act: From<usize> + Into<usize>,
{
    /// The learned table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Hands over the learned table.
    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    /// Replaces the table, e.g. with a trained one.
    pub fn with_q_table(mut self, q_table: QTable) -> Self {
        self.q_table = q_table;
        self
    }

    /// Current exploration rate.
    pub fn eps(&self) -> f64 {
        self.explorer.eps
    }

    /// The number of updates so far.
    pub fn n_opts(&self) -> usize {
        self.n_opts
    }
}

impl<E> Configurable<E> for QLearning<E>
where
    E: Env,
    E::Obs: Into<usize>,
    E::Act: From<usize> + Into<usize>,
{
    type Config = QLearningConfig;

    /// Constructs Q-learning agent with a zero-initialized table.
    fn build(config: Self::Config) -> Self {
        Self {
            q_table: QTable::new(config.n_states, config.n_actions),
            alpha: config.alpha,
            gamma: config.gamma,
            explorer: config.explorer,
            train: true,
            n_opts: 0,
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        }
    }
}

impl<E> Policy<E> for QLearning<E>
where
    E: Env,
    E::Obs: Into<usize>,
    E::Act: From<usize> + Into<usize>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let state: usize = obs.clone().into();
        let a = if self.train {
            self.explorer.action(&self.q_table, state, &mut self.rng)
        } else {
            self.q_table.argmax(state)
        };
        a.into()
    }
}

impl<E> Agent<E> for QLearning<E>
where
    E: Env,
    E::Obs: Into<usize>,
    E::Act: From<usize> + Into<usize>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt(&mut self, transition: &Transition<E>) {
        let s: usize = transition.obs.clone().into();
        let a: usize = transition.act.clone().into();
        let s_next: usize = transition.next_obs.clone().into();

        let target = transition.reward as f64 + self.gamma * self.q_table.max(s_next);
        let q = self.q_table.get(s, a);
        self.q_table.set(s, a, q + self.alpha * (target - q));
        self.n_opts += 1;
    }

    fn on_episode_end(&mut self, episode: usize) {
        self.explorer.on_episode_end(episode);
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        self.q_table.save(path.join(Q_TABLE_FILE))?;
        info!("Saved Q-table in {:?}", path);
        Ok(())
    }

    /// Loads the table, checking that its shape matches the configuration.
    fn load_params(&mut self, path: &Path) -> Result<()> {
        let (n_states, n_actions) = self.q_table.shape();
        self.q_table = QTable::load_with_shape(path.join(Q_TABLE_FILE), n_states, n_actions)?;
        info!("Loaded Q-table from {:?}", path);
        Ok(())
    }
}
