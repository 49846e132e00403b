//! Greedy policy over a frozen table.
use crate::QTable;
use anyhow::Result;
use taxi_rl_core::{DefaultEvaluator, Env, Evaluator, Policy};

/// Takes the action with the largest value, the first one on ties.
///
/// The table is borrowed and never modified.
pub struct GreedyPolicy<'a> {
    q_table: &'a QTable,
}

impl<'a> GreedyPolicy<'a> {
    /// Constructs a greedy policy on `q_table`.
    pub fn new(q_table: &'a QTable) -> Self {
        Self { q_table }
    }
}

impl<'a, E> Policy<E> for GreedyPolicy<'a>
where
    E: Env,
    E::Obs: Into<usize>,
    E::Act: From<usize>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        self.q_table.argmax(obs.clone().into()).into()
    }
}

/// Mean return of the greedy policy on `q_table` over `n_episodes` episodes,
/// each cut at `max_steps` steps.
pub fn evaluate_greedy<E>(env: E, q_table: &QTable, n_episodes: usize, max_steps: usize) -> Result<f32>
where
    E: Env,
    E::Obs: Into<usize>,
    E::Act: From<usize>,
{
    let mut evaluator = DefaultEvaluator::from_env(env, n_episodes).max_steps(max_steps);
    let record = evaluator.evaluate(&mut GreedyPolicy::new(q_table))?;
    Ok(record.get_scalar("episode_return")?)
}
