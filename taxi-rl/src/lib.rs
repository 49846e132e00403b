//! Tabular Q-learning on a one-way-street taxi grid world.
//!
//! taxi-rl consists of the following crates:
//!
//! * [`taxi_rl_core`] provides the traits shared by environments and agents,
//!   the episodic [`Trainer`](taxi_rl_core::Trainer), evaluators and recorders.
//! * [`taxi_rl_env`] is the taxi grid world.
//! * [`taxi_rl_agent`] has the Q-learning agent and the greedy policy over a
//!   learned table.
//!
//! This crate re-exports them and adds [`search`], a random search over the
//! hyperparameters of Q-learning. Runnable programs are under `examples/`:
//!
//! * `train_taxi` trains an agent and saves its table.
//! * `eval_taxi` evaluates a saved table, optionally printing an episode.
//! * `search_taxi` runs a hyperparameter search and saves the best table.
pub mod search;
pub use taxi_rl_agent;
pub use taxi_rl_core;
pub use taxi_rl_env;
