//! Types and traits for recording metrics during training and evaluation.
//!
//! * [`Record`] - a container of key-value pairs of various data types
//! * [`RecordValue`] - the types of values a [`Record`] can hold
//! * [`Recorder`] / [`AggregateRecorder`] - sinks for records
//! * [`RecordStorage`] - aggregation of scalar values over stored records
//! * [`BufferedRecorder`] - keeps records in memory and logs aggregates on flush
//! * [`NullRecorder`] - discards everything
//!
//! ```rust
//! use taxi_rl_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(1.0));
//! record.insert("episode_return", RecordValue::Scalar(-17.0));
//! record.insert("episode_steps", RecordValue::Scalar(12.0));
//! ```
//!
//! [`Trainer::train`](crate::Trainer::train) stores one record per episode
//! in an [`AggregateRecorder`] and flushes it periodically.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
