//! Base implementation of records for logging.
use crate::error::CoreError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, typically used for metrics like episode return.
    Scalar(f32),

    /// Local time at which an aggregate was flushed.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),

    /// A text value, useful for storing labels or descriptions.
    String(String),
}

/// A container for storing key-value pairs of various data types.
///
/// # Examples
///
/// ```rust
/// use taxi_rl_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("episode_return", -42.0);
/// record.insert("episode_steps", RecordValue::Scalar(58.0));
///
/// assert_eq!(record.get_scalar("episode_return").unwrap(), -42.0);
/// ```
#[derive(Debug, Clone)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges another record into this one in place.
    ///
    /// Values of `record` overwrite those with the same key.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    /// Gets a scalar value from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, CoreError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(CoreError::RecordValueTypeError("Scalar".to_string())),
            None => Err(CoreError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not an array.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, CoreError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(CoreError::RecordValueTypeError("Array1".to_string())),
            None => Err(CoreError::RecordKeyError(k.to_string())),
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_scalar_errors() {
        let record = Record::from_slice(&[
            ("a", RecordValue::Scalar(1.0)),
            ("b", RecordValue::String("x".to_string())),
        ]);
        assert_eq!(record.get_scalar("a").unwrap(), 1.0);
        assert!(matches!(
            record.get_scalar("b"),
            Err(CoreError::RecordValueTypeError(_))
        ));
        assert!(matches!(
            record.get_scalar("c"),
            Err(CoreError::RecordKeyError(_))
        ));
    }

    #[test]
    fn test_merge_overwrites() {
        let r1 = Record::from_scalar("loss", 1.0);
        let r2 = Record::from_slice(&[
            ("loss", RecordValue::Scalar(2.0)),
            ("steps", RecordValue::Scalar(3.0)),
        ]);
        let mut r = r1;
        r.merge_inplace(r2);
        assert_eq!(r.get_scalar("loss").unwrap(), 2.0);
        assert_eq!(r.get_scalar("steps").unwrap(), 3.0);
    }
}
