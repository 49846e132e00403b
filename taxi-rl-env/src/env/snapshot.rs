//! Read-only view of an episode for renderers.
use crate::{
    codec::TaxiState,
    grid::{street_direction, GridSpec},
    TaxiAct,
};
use std::fmt;

/// The state of an episode together with the static layout.
///
/// Renderers read this without touching the environment. The [`fmt::Display`]
/// implementation draws an ASCII frame:
///
/// | char | cell |
/// |---|---|
/// | `T` / `t` | taxi with / without the passenger |
/// | `P` | waiting passenger |
/// | `o` | other pickup location |
/// | `D` | dropoff location |
/// | `#` | obstacle |
/// | `^ v < >` | one-way street |
/// | `+` | intersection |
/// | `.` | anything else |
#[derive(Clone, Copy, Debug)]
pub struct TaxiSnapshot<'a> {
    /// Static layout.
    pub grid: &'a GridSpec,

    /// Taxi position, passenger index and in-taxi flag.
    pub state: TaxiState,

    /// The action of the latest step, `None` right after reset.
    pub last_action: Option<TaxiAct>,

    /// Whether the passenger has been delivered.
    pub done: bool,
}

impl<'a> TaxiSnapshot<'a> {
    /// Cell of the waiting passenger, `None` once picked up or delivered.
    pub fn passenger_cell(&self) -> Option<(usize, usize)> {
        if self.state.in_taxi || self.done {
            None
        } else {
            Some(self.grid.pickups()[self.state.passenger_idx])
        }
    }

    fn cell_char(&self, cell: (usize, usize)) -> char {
        let (row, col) = cell;
        if cell == self.state.cell() {
            if self.state.in_taxi {
                'T'
            } else {
                't'
            }
        } else if Some(cell) == self.passenger_cell() {
            'P'
        } else if self.grid.is_dropoff(cell) {
            'D'
        } else if self.grid.is_pickup(cell) {
            'o'
        } else if self.grid.is_obstacle(cell) {
            '#'
        } else if let Some(street) = street_direction(row, col) {
            street.arrow()
        } else if row % 3 == 0 && col % 3 == 0 {
            '+'
        } else {
            '.'
        }
    }
}

impl<'a> fmt::Display for TaxiSnapshot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.grid.size();
        let border = format!("+{}+", "-".repeat(n));

        writeln!(f, "{}", border)?;
        for row in 0..n {
            let line: String = (0..n).map(|col| self.cell_char((row, col))).collect();
            writeln!(f, "|{}|", line)?;
        }
        writeln!(f, "{}", border)?;

        match self.last_action {
            Some(act) => write!(f, "last action: {}", act),
            None => write!(f, "last action: -"),
        }
    }
}
