//! Environment step.
use super::Env;

/// Additional information to `Obs` and `Act`.
pub trait Info {}

impl Info for () {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits [`Step`] object at every interaction steps.
/// This object is combined with the previous observation into a [`Transition`].
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated.
    pub is_truncated: bool,

    /// Information defined by user.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

/// A transition `(o_t, a_t, o_t+1, r_t)`, the unit of experience consumed by
/// [`Agent::opt`](crate::Agent::opt).
pub struct Transition<E: Env> {
    /// Observation before the action.
    pub obs: E::Obs,

    /// Action.
    pub act: E::Act,

    /// Observation after the action.
    pub next_obs: E::Obs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode terminated with this transition.
    pub is_terminated: bool,
}

impl<E: Env> Transition<E> {
    /// Creates a transition from the observation preceding `step`.
    pub fn new(obs: E::Obs, step: &Step<E>) -> Self {
        Self {
            obs,
            act: step.act.clone(),
            next_obs: step.obs.clone(),
            reward: step.reward,
            is_terminated: step.is_terminated,
        }
    }
}
