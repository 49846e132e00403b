//! Evaluate [`Policy`].
use crate::{record::Record, Env, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate [`Policy`].
pub trait Evaluator<E: Env> {
    /// Evaluate [`Policy`].
    ///
    /// The caller of this method needs to handle the internal state of `policy`,
    /// like training/evaluation mode of an [`Agent`](crate::Agent).
    ///
    /// The returned record contains at least `"episode_return"`, which
    /// [`Trainer`](crate::Trainer) uses to select the best model.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>;
}
