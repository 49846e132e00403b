//! Dense action-value table.
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors of loading and saving [`QTable`].
#[derive(Error, Debug)]
pub enum QTableError {
    /// No table exists at the given path.
    #[error("Q-table not found: {0:?}")]
    NotFound(PathBuf),

    /// The table has a different shape than expected.
    #[error("Q-table shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// `(n_states, n_actions)` expected by the caller.
        expected: (usize, usize),
        /// `(n_states, n_actions)` of the loaded table.
        found: (usize, usize),
    },

    /// The stored values do not fill the stored shape.
    #[error("Q-table of shape {shape:?} holds {len} values")]
    Corrupted {
        /// Stored `(n_states, n_actions)`.
        shape: (usize, usize),
        /// Stored number of values.
        len: usize,
    },

    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// (De)serialization failure.
    #[error(transparent)]
    Serialization(#[from] bincode::Error),
}

/// Action values indexed by `(state, action)`, stored row-major.
///
/// Indexing out of range panics.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct QTable {
    n_states: usize,
    n_actions: usize,
    values: Vec<f64>,
}

impl QTable {
    /// A zero-initialized table.
    pub fn new(n_states: usize, n_actions: usize) -> Self {
        Self {
            n_states,
            n_actions,
            values: vec![0.0; n_states * n_actions],
        }
    }

    /// The number of states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// `(n_states, n_actions)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_states, self.n_actions)
    }

    fn offset(&self, state: usize, action: usize) -> usize {
        assert!(
            state < self.n_states && action < self.n_actions,
            "Index ({}, {}) is out of range for a Q-table of shape ({}, {})",
            state,
            action,
            self.n_states,
            self.n_actions
        );
        state * self.n_actions + action
    }

    /// The value of `action` in `state`.
    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[self.offset(state, action)]
    }

    /// Sets the value of `action` in `state`.
    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        let ix = self.offset(state, action);
        self.values[ix] = value;
    }

    /// Values of all actions in `state`.
    pub fn row(&self, state: usize) -> &[f64] {
        let start = self.offset(state, 0);
        &self.values[start..start + self.n_actions]
    }

    /// The action with the largest value in `state`. Ties go to the first one.
    pub fn argmax(&self, state: usize) -> usize {
        let row = self.row(state);
        let mut best = 0;
        for (a, &v) in row.iter().enumerate().skip(1) {
            if v > row[best] {
                best = a;
            }
        }
        best
    }

    /// The largest value in `state`.
    pub fn max(&self, state: usize) -> f64 {
        self.row(state)[self.argmax(state)]
    }

    /// Saves the table in a binary file, preserving values bit-exactly.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), QTableError> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Loads a table saved with [`QTable::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QTableError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(QTableError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let table: Self = bincode::deserialize_from(BufReader::new(file))?;
        if table.values.len() != table.n_states * table.n_actions {
            return Err(QTableError::Corrupted {
                shape: table.shape(),
                len: table.values.len(),
            });
        }

        Ok(table)
    }

    /// Loads a table and checks that it has the given shape.
    pub fn load_with_shape(
        path: impl AsRef<Path>,
        n_states: usize,
        n_actions: usize,
    ) -> Result<Self, QTableError> {
        let table = Self::load(path)?;
        if table.shape() != (n_states, n_actions) {
            return Err(QTableError::ShapeMismatch {
                expected: (n_states, n_actions),
                found: table.shape(),
            });
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_argmax_takes_first_maximum() {
        let mut q = QTable::new(2, 4);
        assert_eq!(q.argmax(0), 0);

        q.set(0, 1, 2.5);
        q.set(0, 3, 2.5);
        assert_eq!(q.argmax(0), 1);
        assert_eq!(q.max(0), 2.5);

        q.set(1, 0, -3.0);
        q.set(1, 1, -1.0);
        q.set(1, 2, -1.0);
        q.set(1, 3, -2.0);
        assert_eq!(q.argmax(1), 1);
        assert_eq!(q.max(1), -1.0);
        assert_eq!(q.row(1), &[-3.0, -1.0, -1.0, -2.0]);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_state() {
        QTable::new(2, 4).get(2, 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_action() {
        let mut q = QTable::new(2, 4);
        q.set(0, 4, 1.0);
    }

    #[test]
    fn test_save_and_load() -> anyhow::Result<()> {
        let dir = TempDir::new("q_table")?;
        let path = dir.path().join("q_table.bin");

        let mut q = QTable::new(3, 2);
        q.set(0, 1, 0.1 + 0.2);
        q.set(2, 0, -1.0e-300);
        q.set(1, 1, f64::MAX);
        q.save(&path)?;

        let q_ = QTable::load(&path)?;
        assert_eq!(q_.shape(), (3, 2));
        assert_eq!(q_.get(0, 1).to_bits(), (0.1f64 + 0.2).to_bits());
        assert_eq!(q, q_);
        Ok(())
    }

    #[test]
    fn test_load_errors() -> anyhow::Result<()> {
        let dir = TempDir::new("q_table")?;
        let path = dir.path().join("missing.bin");
        assert!(matches!(QTable::load(&path), Err(QTableError::NotFound(_))));

        let path = dir.path().join("q_table.bin");
        QTable::new(3, 2).save(&path)?;
        assert!(matches!(
            QTable::load_with_shape(&path, 3, 6),
            Err(QTableError::ShapeMismatch {
                expected: (3, 6),
                found: (3, 2)
            })
        ));
        assert!(QTable::load_with_shape(&path, 3, 2).is_ok());

        std::fs::write(&path, b"garbage")?;
        assert!(matches!(
            QTable::load(&path),
            Err(QTableError::Serialization(_))
        ));
        Ok(())
    }
}
