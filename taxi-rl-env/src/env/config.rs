//! Configuration of [`TaxiEnv`](super::TaxiEnv).
use crate::grid::{Cell, GridSpec, GridSpecError};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`TaxiEnv`](super::TaxiEnv).
///
/// The default is the 10x10 city with four pickups and four dropoffs around
/// the central block.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TaxiEnvConfig {
    /// Side length of the grid.
    pub grid_size: usize,

    /// Pickup locations, addressed by passenger index.
    pub pickups: Vec<Cell>,

    /// Dropoff locations.
    pub dropoffs: Vec<Cell>,

    /// Obstacle cells. If `None`, every city block cell except the pickups and
    /// dropoffs is an obstacle.
    #[serde(default)]
    pub obstacles: Option<Vec<Cell>>,

    /// If `true`, the record of every step carries the state of the episode.
    #[serde(default)]
    pub record_state: bool,
}

impl Default for TaxiEnvConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            pickups: vec![(1, 1), (8, 7), (4, 2), (2, 8)],
            dropoffs: vec![(5, 5), (5, 4), (4, 5), (4, 4)],
            obstacles: None,
            record_state: false,
        }
    }
}

impl TaxiEnvConfig {
    /// Sets the side length of the grid.
    pub fn grid_size(mut self, v: usize) -> Self {
        self.grid_size = v;
        self
    }

    /// Sets the pickup locations.
    pub fn pickups(mut self, v: Vec<Cell>) -> Self {
        self.pickups = v;
        self
    }

    /// Sets the dropoff locations.
    pub fn dropoffs(mut self, v: Vec<Cell>) -> Self {
        self.dropoffs = v;
        self
    }

    /// Sets explicit obstacles instead of the city blocks.
    pub fn obstacles(mut self, v: Vec<Cell>) -> Self {
        self.obstacles = Some(v);
        self
    }

    /// Sets whether the state is recorded at every step.
    pub fn record_state(mut self, v: bool) -> Self {
        self.record_state = v;
        self
    }

    /// Validates the configuration and builds the grid layout.
    pub fn grid_spec(&self) -> Result<GridSpec, GridSpecError> {
        match &self.obstacles {
            Some(obstacles) => GridSpec::new(
                self.grid_size,
                obstacles.clone(),
                self.pickups.clone(),
                self.dropoffs.clone(),
            ),
            None => GridSpec::city(self.grid_size, self.pickups.clone(), self.dropoffs.clone()),
        }
    }

    /// Constructs [`TaxiEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TaxiEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
