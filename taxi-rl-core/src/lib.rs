#![warn(missing_docs)]
//! Core components of taxi-rl.
//!
//! This crate defines the seams between environments and learners:
//!
//! * [`Env`] is an MDP which emits a [`Step`] for every action it receives.
//!   [`TabularEnv`] adds the sizes of finite state and action spaces.
//! * [`Policy`] maps observations to actions. [`Agent`] is a trainable policy
//!   which learns online from [`Transition`]s.
//! * [`Trainer`] runs the episodic training loop and returns a [`TrainReport`].
//! * [`Evaluator`] measures a policy without training it.
//!   [`DefaultEvaluator`] averages episode returns.
//! * [`record`] provides [`Record`](record::Record) and recorders for logging
//!   metrics during training and evaluation.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Agent, Configurable, Env, Info, Obs, Policy, Step, TabularEnv, Transition};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{TrainReport, Trainer, TrainerConfig};
