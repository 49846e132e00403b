//! Observation for [`TaxiEnv`](crate::TaxiEnv).
use taxi_rl_core::Obs;

/// Encoded state index of [`TaxiEnv`](crate::TaxiEnv), see [`StateCodec`](crate::StateCodec).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaxiObs(pub usize);

impl TaxiObs {
    /// The state index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Obs for TaxiObs {}

impl From<TaxiObs> for usize {
    fn from(obs: TaxiObs) -> Self {
        obs.0
    }
}
