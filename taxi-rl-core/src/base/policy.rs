//! Policies and agents built from YAML configuration.
use super::Env;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{fs::File, io::BufReader, path::Path};

/// Chooses an action for each observation of `E`.
///
/// `sample` takes `&mut self` so that stochastic policies can advance their
/// random generator. A policy evaluated on a tabular environment is expected
/// to be greedy on its action values: an [`Agent`](super::Agent) in eval mode
/// returns the first action with the largest value, and a frozen policy such
/// as one borrowing a learned table must leave that table untouched.
pub trait Policy<E: Env> {
    /// Samples an action given an observation.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;
}

/// An object built from a serializable configuration.
///
/// Agent configurations are stored as YAML next to the trained parameters,
/// so the same file can rebuild the agent with [`build_from_path`](Configurable::build_from_path).
pub trait Configurable<E: Env> {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    fn build(config: Self::Config) -> Self;

    /// Builds the object from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or does not parse as `Self::Config`;
    /// the error names the offending path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let config = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse configuration in {:?}", path))?;
        Ok(Self::build(config))
    }
}
