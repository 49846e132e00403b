//! The taxi grid world.
mod config;
mod snapshot;
use crate::{
    codec::{StateCodec, TaxiState},
    grid::{street_direction, Cell, GridSpec},
    TaxiAct, TaxiObs,
};
use anyhow::Result;
pub use config::TaxiEnvConfig;
use log::debug;
use rand::{rngs::SmallRng, Rng, SeedableRng};
pub use snapshot::TaxiSnapshot;
use taxi_rl_core::{
    record::{
        Record,
        RecordValue::{self, Scalar},
    },
    Env, Info, Step, TabularEnv,
};

/// Reward of every step before modifiers.
const STEP_REWARD: f32 = -1.0;

/// Penalty for moving against the direction of a one-way street.
const WRONG_WAY_PENALTY: f32 = 5.0;

/// Penalty for standing on a dropoff cell without the passenger.
const DEAD_DROP_PENALTY: f32 = 5.0;

const PICKUP_REWARD: f32 = 15.0;
const DROPOFF_REWARD: f32 = 30.0;
const ILLEGAL_ACTION_REWARD: f32 = -15.0;

/// Information in the [`Step`] of [`TaxiEnv`]. It carries nothing.
#[derive(Clone, Debug, Default)]
pub struct TaxiInfo;

impl Info for TaxiInfo {}

/// A taxi driving on one-way streets between city blocks.
///
/// An episode starts with the taxi on a random free cell and a passenger
/// waiting at a random pickup location. It terminates when the passenger is
/// dropped off at any dropoff location. The observation is the state index
/// given by [`StateCodec`].
///
/// Rewards of a step:
///
/// * Every step costs 1.
/// * Moving onto a street cell against its direction costs 5 more, unless the
///   taxi starts the move from a pickup or dropoff cell. The penalty applies
///   even if the move is blocked by an obstacle or the grid boundary.
/// * Ending a step on a dropoff cell without the passenger costs 5 more.
/// * A successful pickup is rewarded 15 and a successful dropoff 30. Any other
///   pickup or dropoff is rewarded -15. These replace the rewards above.
pub struct TaxiEnv {
    grid: GridSpec,
    codec: StateCodec,
    free_cells: Vec<Cell>,
    state: TaxiState,
    last_action: Option<TaxiAct>,
    done: bool,
    seed: u64,
    rng: SmallRng,
    record_state: bool,
}

impl TaxiEnv {
    /// Static layout of the grid.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Codec of the observations.
    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }

    /// Current state of the episode.
    pub fn state(&self) -> TaxiState {
        self.state
    }

    /// Returns `true` once the passenger has been delivered.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// A read-only view for renderers.
    pub fn snapshot(&self) -> TaxiSnapshot<'_> {
        TaxiSnapshot {
            grid: &self.grid,
            state: self.state,
            last_action: self.last_action,
            done: self.done,
        }
    }

    /// Starts an episode in the given state and returns its observation.
    ///
    /// # Panics
    ///
    /// Panics if the state is out of range of the grid or the pickups.
    pub fn set_state(&mut self, state: TaxiState) -> TaxiObs {
        let obs = TaxiObs(self.codec.encode(&state));
        self.state = state;
        self.last_action = None;
        self.done = false;
        obs
    }

    fn obs(&self) -> TaxiObs {
        TaxiObs(self.codec.encode(&self.state))
    }

    /// Cell the action heads for, staying in place at the boundary and for
    /// pickup or dropoff.
    fn candidate_cell(&self, act: TaxiAct) -> Cell {
        let (row, col) = self.state.cell();
        let last = self.grid.size() - 1;
        match act {
            TaxiAct::Down if row < last => (row + 1, col),
            TaxiAct::Up if row > 0 => (row - 1, col),
            TaxiAct::Right if col < last => (row, col + 1),
            TaxiAct::Left if col > 0 => (row, col - 1),
            _ => (row, col),
        }
    }

    fn state_record(&self) -> Record {
        Record::from_slice(&[
            ("taxi_row", Scalar(self.state.row as f32)),
            ("taxi_col", Scalar(self.state.col as f32)),
            ("passenger_idx", Scalar(self.state.passenger_idx as f32)),
            ("in_taxi", Scalar(self.state.in_taxi as u8 as f32)),
            (
                "last_action",
                RecordValue::String(self.last_action.map_or("none", |a| a.name()).to_string()),
            ),
        ])
    }
}

impl Env for TaxiEnv {
    type Config = TaxiEnvConfig;
    type Obs = TaxiObs;
    type Act = TaxiAct;
    type Info = TaxiInfo;

    /// Builds the environment and starts the first episode.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let grid = config.grid_spec()?;
        debug!("Builds taxi environment: {}", grid);

        let seed = seed as u64;
        let mut env = Self {
            codec: StateCodec::new(grid.size(), grid.pickups().len()),
            free_cells: grid.free_cells(),
            grid,
            state: TaxiState::new(0, 0, 0, false),
            last_action: None,
            done: false,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            record_state: config.record_state,
        };
        env.reset()?;

        Ok(env)
    }

    fn step(&mut self, act: &Self::Act) -> (Step<Self>, Record) {
        let act = *act;
        let current = self.state.cell();
        let mut reward = STEP_REWARD;

        let candidate = self.candidate_cell(act);
        let on_location = self.grid.is_pickup(current) || self.grid.is_dropoff(current);
        if let (Some(street), Some(heading)) =
            (street_direction(candidate.0, candidate.1), act.direction())
        {
            if street != heading && !on_location {
                reward -= WRONG_WAY_PENALTY;
            }
        }

        if !self.grid.is_obstacle(candidate) {
            self.state.row = candidate.0;
            self.state.col = candidate.1;
        }
        let cell = self.state.cell();

        if self.grid.is_dropoff(cell) && !self.state.in_taxi {
            reward -= DEAD_DROP_PENALTY;
        }

        match act {
            TaxiAct::Pickup => {
                let passenger = self.grid.pickups()[self.state.passenger_idx];
                if !self.state.in_taxi && cell == passenger {
                    self.state.in_taxi = true;
                    reward = PICKUP_REWARD;
                } else {
                    reward = ILLEGAL_ACTION_REWARD;
                }
            }
            TaxiAct::Dropoff => {
                if self.state.in_taxi && self.grid.is_dropoff(cell) {
                    self.state.in_taxi = false;
                    self.done = true;
                    reward = DROPOFF_REWARD;
                } else {
                    reward = ILLEGAL_ACTION_REWARD;
                }
            }
            _ => {}
        }

        self.last_action = Some(act);

        let record = if self.record_state {
            self.state_record()
        } else {
            Record::empty()
        };
        let step = Step::new(self.obs(), act, reward, self.done, false, TaxiInfo);

        (step, record)
    }

    /// Places the taxi on a random free cell and the passenger at a random pickup.
    fn reset(&mut self) -> Result<Self::Obs> {
        let (row, col) = self.free_cells[self.rng.gen_range(0..self.free_cells.len())];
        let passenger_idx = self.rng.gen_range(0..self.grid.pickups().len());
        Ok(self.set_state(TaxiState::new(row, col, passenger_idx, false)))
    }

    /// Reseeds the random generator with `seed + ix` and resets.
    ///
    /// The same index always gives the same initial state.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng = SmallRng::seed_from_u64(self.seed.wrapping_add(ix as u64));
        self.reset()
    }
}

impl TabularEnv for TaxiEnv {
    fn n_states(&self) -> usize {
        self.codec.n_states()
    }

    fn n_actions(&self) -> usize {
        TaxiAct::N
    }
}
