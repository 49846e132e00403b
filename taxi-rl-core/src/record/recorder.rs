use super::Record;

/// Writes a record to an output destination with [`Recorder::write`].
pub trait Recorder {
    /// Write a record to the [`Recorder`].
    fn write(&mut self, record: Record);
}

/// Stores records and writes values aggregated from them on [`AggregateRecorder::flush`].
pub trait AggregateRecorder {
    /// Store the record.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records.
    ///
    /// `step` is the training progress at the time of flushing, the number of
    /// finished episodes in [`Trainer`](crate::Trainer).
    fn flush(&mut self, step: i64);
}
