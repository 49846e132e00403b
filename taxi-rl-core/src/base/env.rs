//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment, typically an MDP.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performes an environment step.
    ///
    /// Calling this method after a step with [`Step::is_terminated`] is undefined;
    /// the caller must reset the environment first.
    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized;

    /// Starts a new episode and returns its initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as a random seed,
    /// which is useful when evaluation of a trained agent. Actually, this method is called
    /// in [`DefaultEvaluator`] for evaluation.
    ///
    /// [`DefaultEvaluator`]: crate::DefaultEvaluator
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs>;
}

/// An environment with finite, enumerable state and action spaces.
///
/// Tabular learners index their tables with the observations and actions
/// of such an environment.
pub trait TabularEnv: Env {
    /// The number of distinct observations.
    fn n_states(&self) -> usize;

    /// The number of distinct actions.
    fn n_actions(&self) -> usize;
}
