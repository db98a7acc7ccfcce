use crate::events::SignalRecord;
use parking_lot::Mutex;
use std::sync::Arc;

pub mod jsonl;

pub trait RecordSink: Send + Sync {
    fn emit(&self, record: SignalRecord) -> anyhow::Result<()>;
}

/// No-op record sink (useful for demos and tests that only look at decisions).
#[derive(Clone, Debug, Default)]
pub struct NoopRecordSink;

impl RecordSink for NoopRecordSink {
    fn emit(&self, _record: SignalRecord) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryRecordSink {
    records: Mutex<Vec<SignalRecord>>,
}

impl MemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SignalRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl RecordSink for MemoryRecordSink {
    fn emit(&self, record: SignalRecord) -> anyhow::Result<()> {
        self.records.lock().push(record);
        Ok(())
    }
}

/// Fan-out sink for emitting to multiple record backends.
pub struct CompositeRecordSink {
    sinks: Vec<Arc<dyn RecordSink>>,
}

impl CompositeRecordSink {
    pub fn new(sinks: Vec<Arc<dyn RecordSink>>) -> Self {
        Self { sinks }
    }
}

impl RecordSink for CompositeRecordSink {
    fn emit(&self, record: SignalRecord) -> anyhow::Result<()> {
        for sink in &self.sinks {
            sink.emit(record.clone())?;
        }
        Ok(())
    }
}
