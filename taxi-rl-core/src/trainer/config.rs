//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
///
/// All intervals are counted in finished episodes.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of training episodes.
    pub max_episodes: usize,

    /// The maximum number of environment steps in an episode.
    pub max_steps_per_episode: usize,

    /// The number of final episodes averaged into
    /// [`TrainReport::average_return`](super::TrainReport::average_return).
    pub return_window: usize,

    /// Interval of flushing records.
    pub flush_record_interval: usize,

    /// Interval of evaluation. `0` disables evaluation.
    pub eval_interval: usize,

    /// Interval of saving the agent.
    pub save_interval: usize,

    /// Where to save the trained agent.
    pub model_dir: Option<String>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_episodes: 0,
            max_steps_per_episode: 200,
            return_window: 100,
            flush_record_interval: usize::MAX,
            eval_interval: 0,
            save_interval: usize::MAX,
            model_dir: None,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of training episodes.
    pub fn max_episodes(mut self, v: usize) -> Self {
        self.max_episodes = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps_per_episode(mut self, v: usize) -> Self {
        self.max_steps_per_episode = v;
        self
    }

    /// Sets the number of final episodes averaged into the average return.
    pub fn return_window(mut self, v: usize) -> Self {
        self.return_window = v;
        self
    }

    /// Sets the interval of flushing records in episodes.
    pub fn flush_record_interval(mut self, v: usize) -> Self {
        self.flush_record_interval = v;
        self
    }

    /// Sets the interval of evaluation in episodes.
    pub fn eval_interval(mut self, v: usize) -> Self {
        self.eval_interval = v;
        self
    }

    /// Sets the interval of saving in episodes.
    pub fn save_interval(mut self, v: usize) -> Self {
        self.save_interval = v;
        self
    }

    /// Sets the directory where the agent is saved.
    pub fn model_dir(mut self, model_dir: impl Into<String>) -> Self {
        self.model_dir = Some(model_dir.into());
        self
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
