//! Tabular agents for taxi-rl.
//!
//! [`QLearning`] learns a [`QTable`] online with epsilon-greedy exploration.
//! A trained table is evaluated with [`GreedyPolicy`], which never modifies it.
mod greedy;
pub mod q_learning;
mod q_table;
pub use greedy::{evaluate_greedy, GreedyPolicy};
pub use q_learning::{EpsilonGreedy, QLearning, QLearningConfig};
pub use q_table::{QTable, QTableError};
