//! Frame sinks: where emitted snapshots go.

use std::io::Write;

use harbor_core::state::FrameSnapshot;

use crate::error::AppError;

/// Receives every emitted frame.
pub trait FrameSink {
    fn emit(&mut self, snapshot: &FrameSnapshot) -> Result<(), AppError>;
}

/// One compact JSON object per line, flushed per frame.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn emit(&mut self, snapshot: &FrameSnapshot) -> Result<(), AppError> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects frames in memory.
impl FrameSink for Vec<FrameSnapshot> {
    fn emit(&mut self, snapshot: &FrameSnapshot) -> Result<(), AppError> {
        self.push(snapshot.clone());
        Ok(())
    }
}
