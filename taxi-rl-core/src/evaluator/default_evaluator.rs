//! Default implementation of the [`Evaluator`] trait.
//!
//! This module provides a simple evaluator that runs a fixed number of episodes
//! and calculates the average return across all episodes.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// A default implementation of the [`Evaluator`] trait.
///
/// This evaluator runs a specified number of episodes, each one cut at
/// `max_steps` environment steps, and reports:
///
/// * `"episode_return"` - the mean of cumulative rewards over the episodes
/// * `"episode_steps"` - the mean episode length
/// * `"success_rate"` - the fraction of episodes which terminated
///   (rather than hitting the step cap)
///
/// Episode `ix` starts with [`Env::reset_with_index`]`(ix)`, so that repeated
/// evaluations of the same policy see the same initial states.
///
/// # Examples
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<TaxiEnv>::new(&env_config, 42, 100)?;
/// let record = evaluator.evaluate(&mut GreedyPolicy::new(&q_table))?;
/// println!("Average return: {}", record.get_scalar("episode_return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The maximum number of environment steps in an episode.
    max_steps: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f32;
        let mut steps_total = 0usize;
        let mut n_success = 0usize;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;

            for _ in 0..self.max_steps {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act);
                r_total += step.reward;
                steps_total += 1;
                if step.is_terminated {
                    n_success += 1;
                }
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }
        }

        let n = self.n_episodes.max(1) as f32;
        let record = Record::from_slice(&[
            ("episode_return", RecordValue::Scalar(r_total / n)),
            ("episode_steps", RecordValue::Scalar(steps_total as f32 / n)),
            ("success_rate", RecordValue::Scalar(n_success as f32 / n)),
        ]);
        info!(
            "Evaluated {} episodes: mean return = {:.3}, success rate = {:.3}",
            self.n_episodes,
            r_total / n,
            n_success as f32 / n
        );

        Ok(record)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`] with an environment built from `config`.
    ///
    /// The step cap defaults to 200.
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self::from_env(E::build(config, seed)?, n_episodes))
    }

    /// Constructs a new [`DefaultEvaluator`] with an existing environment.
    pub fn from_env(env: E, n_episodes: usize) -> Self {
        Self {
            n_episodes,
            max_steps: 200,
            env,
        }
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Returns a reference to the environment.
    pub fn env(&self) -> &E {
        &self.env
    }
}
