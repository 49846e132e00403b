//! Action for [`TaxiEnv`](crate::TaxiEnv).
use crate::grid::StreetDirection;
use std::fmt;
use taxi_rl_core::Act;

/// One of the six actions of the taxi.
///
/// The integer encoding is `0: Down, 1: Up, 2: Right, 3: Left, 4: Pickup, 5: Dropoff`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaxiAct {
    /// Move to `row + 1`.
    Down,

    /// Move to `row - 1`.
    Up,

    /// Move to `col + 1`.
    Right,

    /// Move to `col - 1`.
    Left,

    /// Pick up the passenger.
    Pickup,

    /// Drop off the passenger.
    Dropoff,
}

impl TaxiAct {
    /// All actions in the order of their integer encoding.
    pub const ALL: [TaxiAct; 6] = [
        TaxiAct::Down,
        TaxiAct::Up,
        TaxiAct::Right,
        TaxiAct::Left,
        TaxiAct::Pickup,
        TaxiAct::Dropoff,
    ];

    /// The number of actions.
    pub const N: usize = 6;

    /// Heading of a movement action, `None` for pickup and dropoff.
    pub fn direction(&self) -> Option<StreetDirection> {
        match self {
            Self::Down => Some(StreetDirection::Down),
            Self::Up => Some(StreetDirection::Up),
            Self::Right => Some(StreetDirection::Right),
            Self::Left => Some(StreetDirection::Left),
            Self::Pickup | Self::Dropoff => None,
        }
    }

    /// Lower-case name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::Right => "right",
            Self::Left => "left",
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        }
    }
}

impl Act for TaxiAct {}

impl From<usize> for TaxiAct {
    /// # Panics
    ///
    /// Panics if `ix >= 6`.
    fn from(ix: usize) -> Self {
        Self::ALL[ix]
    }
}

impl From<TaxiAct> for usize {
    fn from(act: TaxiAct) -> Self {
        act as usize
    }
}

impl fmt::Display for TaxiAct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
