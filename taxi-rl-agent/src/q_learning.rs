//! Q-learning agent.
mod base;
mod config;
mod explorer;
pub use base::{QLearning, Q_TABLE_FILE};
pub use config::QLearningConfig;
pub use explorer::EpsilonGreedy;
