//! Agent.
use super::{Env, Policy, Transition};
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy on an environment.
///
/// Unlike replay-based learners, an [`Agent`] here learns online: the
/// [`Trainer`](crate::Trainer) hands it every transition as soon as the
/// environment emits it.
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs an optimization step with a single transition.
    fn opt(&mut self, transition: &Transition<E>);

    /// Called by the trainer after episode `episode` (0-based) has finished.
    ///
    /// Does nothing in the default implementation.
    fn on_episode_end(&mut self, _episode: usize) {}

    /// Save the parameters of the agent in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Load the parameters of the agent from the given directory.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
