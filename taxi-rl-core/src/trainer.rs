//! Train [`Agent`].
mod config;
mod report;
use crate::{
    record::{AggregateRecorder, Record, RecordValue::Scalar},
    Agent, DefaultEvaluator, Env, Evaluator, Transition,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::{debug, info, warn};
pub use report::TrainReport;
use std::path::{Path, PathBuf};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the episodic training loop.
///
/// # Training loop
///
/// 0. Given an agent implementing [`Agent`] and a recorder implementing
///    [`AggregateRecorder`], the agent is set to training mode.
/// 1. For `episode` in `0..max_episodes`:
///     1. Reset [`Env`].
///     2. Up to `max_steps_per_episode` times: sample an action from the agent,
///        apply it to the environment, and hand the resulting [`Transition`] to
///        [`Agent::opt`]. Stop early when the step terminates or truncates the episode.
///     3. Call [`Agent::on_episode_end`] and store the episode return, length and
///        success flag in the recorder and in the [`TrainReport`].
///     4. With `n = episode + 1`:
///         * If `n % eval_interval == 0`, evaluate the agent in evaluation mode and
///           store the result. If the evaluated return is the best so far, save the
///           agent in `(model_dir)/best`.
///         * If `n % save_interval == 0`, save the agent in `(model_dir)/(n)`.
///         * If `n % flush_record_interval == 0`, flush the recorder.
///
/// The best return is tracked for the current run only; the trainer keeps no
/// state across calls of [`Trainer::train`].
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|"Step&lt;E: Env&gt;"|C[Transition]
///     C -->|Agent::opt|A
/// ```
pub struct Trainer {
    /// The number of training episodes.
    max_episodes: usize,

    /// The maximum number of environment steps in an episode.
    max_steps_per_episode: usize,

    /// The number of final episodes averaged into the average return.
    return_window: usize,

    /// Interval of flushing records in episodes.
    flush_records_interval: usize,

    /// Interval of evaluation in episodes.
    eval_interval: usize,

    /// Interval of saving the model in episodes.
    save_interval: usize,

    /// Where to save the trained model.
    model_dir: Option<String>,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            max_episodes: config.max_episodes,
            max_steps_per_episode: config.max_steps_per_episode,
            return_window: config.return_window,
            flush_records_interval: config.flush_record_interval,
            eval_interval: config.eval_interval,
            save_interval: config.save_interval,
            model_dir: config.model_dir,
        }
    }

    fn save_model<E: Env, A: Agent<E>>(agent: &A, model_dir: &Path) {
        match agent.save_params(model_dir) {
            Ok(()) => info!("Saved the model in {:?}.", model_dir),
            Err(e) => warn!("Failed to save model in {:?}: {}", model_dir, e),
        }
    }

    fn model_subdir(&self, name: impl AsRef<Path>) -> Option<PathBuf> {
        self.model_dir
            .as_ref()
            .map(|dir| Path::new(dir).join(name.as_ref()))
    }

    /// Runs one episode and returns `(return, steps, success)`.
    fn run_episode<E, A>(&self, env: &mut E, agent: &mut A) -> Result<(f32, usize, bool)>
    where
        E: Env,
        A: Agent<E>,
    {
        let mut obs = env.reset()?;
        let mut r_total = 0f32;
        let mut n_steps = 0;
        let mut success = false;

        for _ in 0..self.max_steps_per_episode {
            let act = agent.sample(&obs);
            let (step, _) = env.step(&act);
            agent.opt(&Transition::new(obs, &step));

            r_total += step.reward;
            n_steps += 1;
            success |= step.is_terminated;
            let is_done = step.is_done();
            obs = step.obs;

            if is_done {
                break;
            }
        }

        Ok((r_total, n_steps, success))
    }

    /// Train the agent without evaluation.
    ///
    /// `eval_interval` is ignored.
    pub fn train<E, A>(
        &mut self,
        env: E,
        agent: &mut A,
        recorder: &mut Box<dyn AggregateRecorder>,
    ) -> Result<TrainReport>
    where
        E: Env,
        A: Agent<E>,
    {
        self.run::<E, A, DefaultEvaluator<E>>(env, agent, recorder, None)
    }

    /// Train the agent, evaluating it every `eval_interval` episodes.
    pub fn train_with_eval<E, A, D>(
        &mut self,
        env: E,
        agent: &mut A,
        recorder: &mut Box<dyn AggregateRecorder>,
        evaluator: &mut D,
    ) -> Result<TrainReport>
    where
        E: Env,
        A: Agent<E>,
        D: Evaluator<E>,
    {
        self.run(env, agent, recorder, Some(evaluator))
    }

    fn run<E, A, D>(
        &mut self,
        mut env: E,
        agent: &mut A,
        recorder: &mut Box<dyn AggregateRecorder>,
        mut evaluator: Option<&mut D>,
    ) -> Result<TrainReport>
    where
        E: Env,
        A: Agent<E>,
        D: Evaluator<E>,
    {
        let mut report = TrainReport::new(self.return_window);
        let mut max_eval_reward = f32::MIN;
        agent.train();
        info!("Starts training for {} episodes", self.max_episodes);

        for episode in 0..self.max_episodes {
            let (r_total, n_steps, success) = self.run_episode(&mut env, agent)?;
            agent.on_episode_end(episode);
            report.push(r_total, n_steps, success);
            debug!(
                "Episode {}: return = {}, steps = {}, success = {}",
                episode, r_total, n_steps, success
            );

            let n = episode + 1;
            let mut record = Record::from_slice(&[
                ("episode_return", Scalar(r_total)),
                ("episode_steps", Scalar(n_steps as f32)),
                ("success", Scalar(if success { 1.0 } else { 0.0 })),
            ]);

            if let Some(evaluator) = evaluator.as_mut() {
                if self.eval_interval > 0 && n % self.eval_interval == 0 {
                    info!("Starts evaluation of the trained model");
                    agent.eval();
                    let eval_record = evaluator.evaluate(agent)?;
                    agent.train();
                    let eval_reward = eval_record.get_scalar("episode_return")?;
                    record.insert("eval_reward", Scalar(eval_reward));

                    // Save the best model up to the current iteration
                    if eval_reward > max_eval_reward {
                        max_eval_reward = eval_reward;
                        if let Some(dir) = self.model_subdir("best") {
                            Self::save_model::<E, A>(agent, &dir);
                        }
                    }
                }
            }

            if self.save_interval > 0 && n % self.save_interval == 0 {
                if let Some(dir) = self.model_subdir(n.to_string()) {
                    Self::save_model::<E, A>(agent, &dir);
                }
            }

            recorder.store(record);

            if self.flush_records_interval > 0 && n % self.flush_records_interval == 0 {
                recorder.flush(n as _);
            }
        }

        info!(
            "Finished training: average return of the last {} episodes = {}",
            self.return_window.min(report.len()),
            report.average_return()
        );

        Ok(report)
    }
}
