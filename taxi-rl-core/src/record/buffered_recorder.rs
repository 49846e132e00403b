use super::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};
use chrono::Local;
use log::info;

/// Buffered recorder.
///
/// Records given with [`Recorder::write`] are kept as they are, which is
/// used for recording sequences of observations and actions during evaluation
/// runs. Records given with [`AggregateRecorder::store`] are aggregated on
/// [`AggregateRecorder::flush`]; the aggregate is logged, stamped with the
/// step and the local time under `"step"` and `"datetime"`, and then kept in
/// the buffer as well.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
    storage: RecordStorage,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self {
            buf: Vec::default(),
            storage: RecordStorage::new(),
        }
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// The number of buffered records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record has been buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Recorder for BufferedRecorder {
    /// Write a [`Record`] to the buffer.
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }
}

impl AggregateRecorder for BufferedRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        if self.storage.is_empty() {
            return;
        }

        let mut record = self.storage.aggregate();
        let mut scalars = record
            .iter()
            .filter_map(|(k, v)| match v {
                RecordValue::Scalar(v) => Some(format!("{} = {:.3}", k, v)),
                _ => None,
            })
            .collect::<Vec<_>>();
        scalars.sort();
        info!("step {}: {}", step, scalars.join(", "));

        record.insert("step", RecordValue::Scalar(step as f32));
        record.insert("datetime", RecordValue::DateTime(Local::now()));
        self.buf.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_aggregates_stored_records() {
        let before = Local::now();
        let mut recorder = BufferedRecorder::new();
        for r in [1.0, 2.0, 6.0] {
            recorder.store(Record::from_scalar("episode_return", r));
        }
        recorder.flush(3);
        recorder.flush(3); // nothing stored since the last flush

        assert_eq!(recorder.len(), 1);
        let record = recorder.iter().next().unwrap();
        assert_eq!(record.get_scalar("episode_return_mean").unwrap(), 3.0);
        assert_eq!(record.get_scalar("episode_return_max").unwrap(), 6.0);
        assert_eq!(record.get_scalar("step").unwrap(), 3.0);
        match record.get("datetime") {
            Some(RecordValue::DateTime(t)) => assert!(*t >= before && *t <= Local::now()),
            v => panic!("Expect RecordValue::DateTime, got {:?}", v),
        }
    }

    #[test]
    fn test_written_records_are_not_stamped() {
        let mut recorder = BufferedRecorder::new();
        recorder.write(Record::from_scalar("reward", -1.0));

        let record = recorder.iter().next().unwrap();
        assert!(record.get("datetime").is_none());
        assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
    }
}
