//! Static description of the city grid.
//!
//! The city is an `N x N` grid of cells addressed by `(row, col)`. Every third
//! row and column is a street; everything else is a block. Horizontal and
//! vertical streets are one-way, alternating their direction every block.
use std::fmt;
use thiserror::Error;

/// A cell of the grid, `(row, col)`.
pub type Cell = (usize, usize);

/// Mandated travel direction of a street cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreetDirection {
    /// Towards row 0.
    Up,

    /// Towards row `N - 1`.
    Down,

    /// Towards column 0.
    Left,

    /// Towards column `N - 1`.
    Right,
}

impl StreetDirection {
    /// An arrow for text rendering.
    pub fn arrow(&self) -> char {
        match self {
            Self::Up => '^',
            Self::Down => 'v',
            Self::Left => '<',
            Self::Right => '>',
        }
    }
}

/// Returns the one-way direction of the street at `(row, col)`.
///
/// A cell with `row % 3 == 0` and `col % 3 != 0` is on a horizontal street,
/// running right on even street rows (`(row / 3) % 2 == 0`) and left otherwise.
/// A cell with `col % 3 == 0` and `row % 3 != 0` is on a vertical street,
/// running up on even street columns and down otherwise. Intersections and
/// block interiors have no direction.
pub fn street_direction(row: usize, col: usize) -> Option<StreetDirection> {
    if row % 3 == 0 && col % 3 != 0 {
        if (row / 3) % 2 == 0 {
            Some(StreetDirection::Right)
        } else {
            Some(StreetDirection::Left)
        }
    } else if col % 3 == 0 && row % 3 != 0 {
        if (col / 3) % 2 == 0 {
            Some(StreetDirection::Up)
        } else {
            Some(StreetDirection::Down)
        }
    } else {
        None
    }
}

/// Every cell of an `n x n` grid which is not on a street, in row-major order.
pub fn generate_city_blocks(n: usize) -> Vec<Cell> {
    (0..n)
        .flat_map(|row| (0..n).map(move |col| (row, col)))
        .filter(|&(row, col)| row % 3 != 0 && col % 3 != 0)
        .collect()
}

/// Drops the cells in `exclude` from `obstacles`, keeping the order.
pub fn remove_obstacles(obstacles: &[Cell], exclude: &[Cell]) -> Vec<Cell> {
    obstacles
        .iter()
        .filter(|cell| !exclude.contains(cell))
        .copied()
        .collect()
}

/// Invalid grid configurations.
#[derive(Error, Debug, PartialEq)]
pub enum GridSpecError {
    /// The grid has no cells.
    #[error("Grid size must be positive")]
    ZeroSize,

    /// No pickup location was given.
    #[error("At least one pickup location is required")]
    NoPickups,

    /// No dropoff location was given.
    #[error("At least one dropoff location is required")]
    NoDropoffs,

    /// A cell lies outside of the grid.
    #[error("Cell {cell:?} of {kind} is outside of the {size}x{size} grid")]
    OutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Which list the cell came from.
        kind: &'static str,
        /// Grid side length.
        size: usize,
    },

    /// A cell is used for more than one purpose.
    #[error("Cell {cell:?} is listed as both {first} and {second}")]
    Overlap {
        /// The offending cell.
        cell: Cell,
        /// The first role of the cell.
        first: &'static str,
        /// The second role of the cell.
        second: &'static str,
    },

    /// Every cell is an obstacle, pickup or dropoff, so there is nowhere to start.
    #[error("No free cell is left for the taxi to start from")]
    NoFreeCell,
}

/// Kind of a cell in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellKind {
    Free,
    Obstacle,
    Pickup,
    Dropoff,
}

impl CellKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Free => "free cells",
            Self::Obstacle => "obstacles",
            Self::Pickup => "pickups",
            Self::Dropoff => "dropoffs",
        }
    }
}

/// Immutable layout of the grid world.
///
/// Obstacles, pickups and dropoffs are disjoint and lie inside the grid.
/// Pickups and dropoffs keep the order they were given in; the passenger
/// index of an episode addresses [`GridSpec::pickups`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    size: usize,
    obstacles: Vec<Cell>,
    pickups: Vec<Cell>,
    dropoffs: Vec<Cell>,
    kinds: Vec<CellKind>,
}

impl GridSpec {
    /// Builds a layout, validating it.
    pub fn new(
        size: usize,
        obstacles: Vec<Cell>,
        pickups: Vec<Cell>,
        dropoffs: Vec<Cell>,
    ) -> Result<Self, GridSpecError> {
        if size == 0 {
            return Err(GridSpecError::ZeroSize);
        }
        if pickups.is_empty() {
            return Err(GridSpecError::NoPickups);
        }
        if dropoffs.is_empty() {
            return Err(GridSpecError::NoDropoffs);
        }

        let mut kinds = vec![CellKind::Free; size * size];
        let lists = [
            (CellKind::Obstacle, &obstacles),
            (CellKind::Pickup, &pickups),
            (CellKind::Dropoff, &dropoffs),
        ];
        for (kind, cells) in lists {
            for &cell in cells.iter() {
                let (row, col) = cell;
                if row >= size || col >= size {
                    return Err(GridSpecError::OutOfBounds {
                        cell,
                        kind: kind.name(),
                        size,
                    });
                }
                let slot = &mut kinds[row * size + col];
                if *slot != CellKind::Free && *slot != kind {
                    return Err(GridSpecError::Overlap {
                        cell,
                        first: slot.name(),
                        second: kind.name(),
                    });
                }
                *slot = kind;
            }
        }

        if !kinds.contains(&CellKind::Free) {
            return Err(GridSpecError::NoFreeCell);
        }

        Ok(Self {
            size,
            obstacles,
            pickups,
            dropoffs,
            kinds,
        })
    }

    /// City-block layout: every block cell is an obstacle except the pickup and
    /// dropoff locations.
    pub fn city(size: usize, pickups: Vec<Cell>, dropoffs: Vec<Cell>) -> Result<Self, GridSpecError> {
        let locations = [pickups.as_slice(), dropoffs.as_slice()].concat();
        let obstacles = remove_obstacles(&generate_city_blocks(size), &locations);
        Self::new(size, obstacles, pickups, dropoffs)
    }

    fn kind(&self, (row, col): Cell) -> CellKind {
        if row < self.size && col < self.size {
            self.kinds[row * self.size + col]
        } else {
            CellKind::Free
        }
    }

    /// Grid side length `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Obstacle cells in the order they were given.
    pub fn obstacles(&self) -> &[Cell] {
        &self.obstacles
    }

    /// Pickup cells, addressed by passenger index.
    pub fn pickups(&self) -> &[Cell] {
        &self.pickups
    }

    /// Dropoff cells.
    pub fn dropoffs(&self) -> &[Cell] {
        &self.dropoffs
    }

    /// Returns `true` if `cell` is an obstacle.
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.kind(cell) == CellKind::Obstacle
    }

    /// Returns `true` if `cell` is a pickup location.
    pub fn is_pickup(&self, cell: Cell) -> bool {
        self.kind(cell) == CellKind::Pickup
    }

    /// Returns `true` if `cell` is a dropoff location.
    pub fn is_dropoff(&self, cell: Cell) -> bool {
        self.kind(cell) == CellKind::Dropoff
    }

    /// Cells which are neither obstacles, pickups nor dropoffs, in row-major order.
    pub fn free_cells(&self) -> Vec<Cell> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .filter(|&cell| self.kind(cell) == CellKind::Free)
            .collect()
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} grid, {} obstacles, pickups {:?}, dropoffs {:?}",
            self.size,
            self.size,
            self.obstacles.len(),
            self.pickups,
            self.dropoffs
        )
    }
}
