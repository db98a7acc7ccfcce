use crate::events::SignalRecord;
use crate::record::RecordSink;
use anyhow::Context;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one JSON object per record, newline-delimited.
pub struct JsonLinesRecordSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesRecordSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl JsonLinesRecordSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("create record file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> RecordSink for JsonLinesRecordSink<W> {
    fn emit(&self, record: SignalRecord) -> anyhow::Result<()> {
        let mut out = self.out.lock();
        serde_json::to_writer(&mut *out, &record).context("encode signal record")?;
        out.write_all(b"\n").context("write signal record")?;
        // Each line is on disk once emit returns.
        out.flush().context("flush signal record")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::sma_crossover::Action;
    use crate::types::Symbol;
    use std::time::SystemTime;

    #[test]
    fn writes_one_json_object_per_line() {
        let sink = JsonLinesRecordSink::new(Vec::new());
        for (step, ma) in [(1, None), (2, Some(101.5))] {
            sink.emit(SignalRecord {
                ts: SystemTime::UNIX_EPOCH,
                step,
                symbol: Symbol::new("IBM"),
                price: 101.0,
                moving_average: ma,
                action: Action::None,
            })
            .unwrap();
        }

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["step"], 2);
        assert_eq!(second["symbol"], "IBM");
        assert_eq!(second["moving_average"], 101.5);
        assert_eq!(second["action"], "None");

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(first["moving_average"].is_null());
    }
}
