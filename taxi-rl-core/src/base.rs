//! Core functionalities.
mod agent;
mod env;
mod policy;
mod step;
pub use agent::Agent;
pub use env::{Env, TabularEnv};
pub use policy::{Configurable, Policy};
use std::fmt::Debug;
pub use step::{Info, Step, Transition};

/// An observation of an environment.
pub trait Obs: Clone + Debug {}

/// An action of an environment.
pub trait Act: Clone + Debug {}
