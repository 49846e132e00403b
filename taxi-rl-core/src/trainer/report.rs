//! Learning statistics of a training run.
use crate::record::{Record, RecordValue};

/// Per-episode statistics collected by [`Trainer`](super::Trainer).
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    episode_returns: Vec<f32>,
    episode_steps: Vec<usize>,
    episode_success: Vec<bool>,
    return_window: usize,
}

impl TrainReport {
    /// Creates an empty report averaging the final `return_window` episodes.
    pub fn new(return_window: usize) -> Self {
        Self {
            episode_returns: vec![],
            episode_steps: vec![],
            episode_success: vec![],
            return_window,
        }
    }

    pub(crate) fn push(&mut self, episode_return: f32, steps: usize, success: bool) {
        self.episode_returns.push(episode_return);
        self.episode_steps.push(steps);
        self.episode_success.push(success);
    }

    /// The number of finished episodes.
    pub fn len(&self) -> usize {
        self.episode_returns.len()
    }

    /// Returns `true` if no episode has been recorded.
    pub fn is_empty(&self) -> bool {
        self.episode_returns.is_empty()
    }

    fn window_start(&self) -> usize {
        self.len().saturating_sub(self.return_window)
    }

    /// Mean return of the final `return_window` episodes, or of all
    /// episodes if there are fewer. `NaN` for an empty report.
    pub fn average_return(&self) -> f32 {
        let tail = &self.episode_returns[self.window_start()..];
        tail.iter().sum::<f32>() / tail.len() as f32
    }

    /// Fraction of successful episodes in the same window as
    /// [`TrainReport::average_return`].
    pub fn success_rate(&self) -> f32 {
        let tail = &self.episode_success[self.window_start()..];
        tail.iter().filter(|&&s| s).count() as f32 / tail.len() as f32
    }

    /// Cumulative reward of every episode.
    pub fn episode_returns(&self) -> &[f32] {
        &self.episode_returns
    }

    /// Number of environment steps of every episode.
    pub fn episode_steps(&self) -> &[usize] {
        &self.episode_steps
    }

    /// Whether every episode ended with a terminal step.
    pub fn episode_success(&self) -> &[bool] {
        &self.episode_success
    }

    /// Converts the per-episode statistics into a record of arrays for
    /// metrics and plotting consumers.
    pub fn to_record(&self) -> Record {
        Record::from_slice(&[
            (
                "episode_return",
                RecordValue::Array1(self.episode_returns.clone()),
            ),
            (
                "episode_steps",
                RecordValue::Array1(self.episode_steps.iter().map(|&s| s as f32).collect()),
            ),
            (
                "episode_success",
                RecordValue::Array1(
                    self.episode_success
                        .iter()
                        .map(|&s| if s { 1.0 } else { 0.0 })
                        .collect(),
                ),
            ),
            ("average_return", RecordValue::Scalar(self.average_return())),
        ])
    }
}
