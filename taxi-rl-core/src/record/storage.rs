//! Record storage and aggregation.
use super::{Record, RecordValue};
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// A storage system for records with aggregation capabilities.
///
/// Scalar values are aggregated with min, max, mean and median. For other
/// value types the most recent one is kept.
#[derive(Default)]
pub struct RecordStorage {
    data: Vec<Record>,
}

fn min(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::INFINITY, f32::min))
}

fn max(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::NEG_INFINITY, f32::max))
}

fn mean(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().sum::<f32>() / vs.len() as f32)
}

/// Sorts `vs` in place.
fn median(mut vs: Vec<f32>) -> RecordValue {
    vs.sort_by(|x, y| x.total_cmp(y));
    RecordValue::Scalar(vs[vs.len() / 2])
}

impl RecordStorage {
    /// Creates a new empty record storage.
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Stores a record in the storage.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    /// Returns `true` if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn get_keys(&self) -> HashSet<String, Xxh3Builder> {
        let mut keys = HashSet::<String, Xxh3Builder>::default();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }
        keys
    }

    /// The most recent value of `key`, if any.
    fn latest(&self, key: &str) -> Option<&RecordValue> {
        self.data.iter().rev().find_map(|record| record.get(key))
    }

    fn scalar(&self, key: &str) -> Record {
        let vs: Vec<f32> = self
            .data
            .iter()
            .filter_map(|record| match record.get(key) {
                Some(RecordValue::Scalar(v)) => Some(*v),
                _ => None,
            })
            .collect();

        if vs.len() == 1 {
            Record::from_slice(&[(key, RecordValue::Scalar(vs[0]))])
        } else {
            Record::from_slice(&[
                (format!("{}_min", key), min(&vs)),
                (format!("{}_max", key), max(&vs)),
                (format!("{}_mean", key), mean(&vs)),
                (format!("{}_median", key), median(vs)),
            ])
        }
    }

    /// Aggregates all stored records and clears the storage.
    pub fn aggregate(&mut self) -> Record {
        let mut record = Record::empty();

        for key in self.get_keys().iter() {
            match self.latest(key) {
                Some(RecordValue::Scalar(_)) => record.merge_inplace(self.scalar(key)),
                Some(value) => record.insert(key.clone(), value.clone()),
                None => {}
            }
        }

        self.data = vec![];

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_scalars_and_strings() {
        let mut storage = RecordStorage::new();
        storage.store(Record::from_slice(&[
            ("r", RecordValue::Scalar(-3.0)),
            ("tag", RecordValue::String("first".to_string())),
        ]));
        storage.store(Record::from_scalar("r", 1.0));
        storage.store(Record::from_slice(&[
            ("r", RecordValue::Scalar(5.0)),
            ("tag", RecordValue::String("last".to_string())),
        ]));
        storage.store(Record::from_scalar("once", 7.0));

        let record = storage.aggregate();
        assert_eq!(record.get_scalar("r_min").unwrap(), -3.0);
        assert_eq!(record.get_scalar("r_max").unwrap(), 5.0);
        assert_eq!(record.get_scalar("r_mean").unwrap(), 1.0);
        assert_eq!(record.get_scalar("r_median").unwrap(), 1.0);
        assert_eq!(record.get_scalar("once").unwrap(), 7.0);
        assert_eq!(
            record.get("tag"),
            Some(&RecordValue::String("last".to_string()))
        );
        assert!(storage.is_empty());
    }
}
