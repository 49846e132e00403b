//! Bijection between taxi states and observation indices.
use serde::{Deserialize, Serialize};

/// Dynamic state of an episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxiState {
    /// Row of the taxi.
    pub row: usize,

    /// Column of the taxi.
    pub col: usize,

    /// Index of the passenger's pickup location.
    pub passenger_idx: usize,

    /// Whether the passenger has been picked up.
    pub in_taxi: bool,
}

impl TaxiState {
    /// Creates a state.
    pub fn new(row: usize, col: usize, passenger_idx: usize, in_taxi: bool) -> Self {
        Self {
            row,
            col,
            passenger_idx,
            in_taxi,
        }
    }

    /// Cell of the taxi.
    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Encodes a [`TaxiState`] as an integer in `0..n_states()` and back.
///
/// The index is `((row * N + col) * P + passenger_idx) * 2 + in_taxi`
/// for a grid of side `N` with `P` pickup locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateCodec {
    grid_size: usize,
    n_pickups: usize,
}

impl StateCodec {
    /// Creates a codec for a grid of side `grid_size` with `n_pickups` pickup locations.
    pub fn new(grid_size: usize, n_pickups: usize) -> Self {
        Self {
            grid_size,
            n_pickups,
        }
    }

    /// The number of distinct states, `N * N * P * 2`.
    pub fn n_states(&self) -> usize {
        self.grid_size * self.grid_size * self.n_pickups * 2
    }

    /// Encodes a state.
    ///
    /// # Panics
    ///
    /// Panics if a component of the state is out of range.
    pub fn encode(&self, state: &TaxiState) -> usize {
        assert!(
            state.row < self.grid_size && state.col < self.grid_size,
            "Taxi position ({}, {}) is outside of the {}x{} grid",
            state.row,
            state.col,
            self.grid_size,
            self.grid_size
        );
        assert!(
            state.passenger_idx < self.n_pickups,
            "Passenger index {} is out of range for {} pickups",
            state.passenger_idx,
            self.n_pickups
        );

        let cell = state.row * self.grid_size + state.col;
        (cell * self.n_pickups + state.passenger_idx) * 2 + state.in_taxi as usize
    }

    /// Decodes an index produced by [`StateCodec::encode`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.n_states()`.
    pub fn decode(&self, index: usize) -> TaxiState {
        assert!(
            index < self.n_states(),
            "State index {} is out of range for {} states",
            index,
            self.n_states()
        );

        let in_taxi = index % 2 == 1;
        let index = index / 2;
        let passenger_idx = index % self.n_pickups;
        let cell = index / self.n_pickups;

        TaxiState {
            row: cell / self.grid_size,
            col: cell % self.grid_size,
            passenger_idx,
            in_taxi,
        }
    }
}
