//! Utilities for interaction of agents and environments.
use crate::{
    record::{RecordValue, Recorder},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// Run episodes with a policy and recorder, returning the return of every episode.
///
/// For every environment step, the record emitted by [`Env::step`] is written to
/// `recorder` with `"episode"`, `"step"` and `"reward"` added, so that the run can
/// be replayed by a visualization tool. Each episode is cut at `max_steps` steps.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    max_steps: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::new();

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset_with_index(episode)?;
        let mut r_total = 0.0;

        for count_step in 0..max_steps {
            let act = policy.sample(&prev_obs);
            let (step, mut record) = env.step(&act);
            r_total += step.reward;

            record.insert("reward", RecordValue::Scalar(step.reward));
            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            recorder.write(record);

            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
        }

        info!("Episode {}, return = {}", episode, r_total);
        rs.push(r_total);
    }

    Ok(rs)
}
