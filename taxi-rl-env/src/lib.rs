#![warn(missing_docs)]
//! A taxi grid world with one-way streets.
//!
//! The city is a square grid where every third row and column is a street
//! and the cells in between are blocks. Streets are one-way and alternate
//! their direction every block. A taxi has to pick up a passenger waiting at
//! one of the pickup locations and bring them to any dropoff location.
//!
//! Here is an example of running an episode with a random policy.
//!
//! ```no_run
//! use anyhow::Result;
//! use rand::{rngs::SmallRng, Rng, SeedableRng};
//! use taxi_rl_core::{Env as _, Policy};
//! use taxi_rl_env::{TaxiAct, TaxiEnv, TaxiEnvConfig, TaxiObs};
//!
//! struct RandomPolicy(SmallRng);
//!
//! impl Policy<TaxiEnv> for RandomPolicy {
//!     fn sample(&mut self, _: &TaxiObs) -> TaxiAct {
//!         self.0.gen_range(0..TaxiAct::N).into()
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let mut env = TaxiEnv::build(&TaxiEnvConfig::default(), 42)?;
//!     let mut policy = RandomPolicy(SmallRng::seed_from_u64(42));
//!     let mut obs = env.reset()?;
//!
//!     for _ in 0..200 {
//!         let (step, _) = env.step(&policy.sample(&obs));
//!         println!("{}\n", env.snapshot());
//!         if step.is_done() {
//!             break;
//!         }
//!         obs = step.obs;
//!     }
//!
//!     Ok(())
//! }
//! ```
mod act;
mod codec;
mod env;
pub mod grid;
mod obs;
pub use act::TaxiAct;
pub use codec::{StateCodec, TaxiState};
pub use env::{TaxiEnv, TaxiEnvConfig, TaxiInfo, TaxiSnapshot};
pub use grid::{GridSpec, GridSpecError};
pub use obs::TaxiObs;
