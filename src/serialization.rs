//! Reading and writing event streams.
//!
//! Events travel as NDJSON (one JSON object per line) or as a single JSON array.

use serde::Serialize;
use std::io::{BufRead, Write};

use crate::error::{Result, TransformError};
use crate::event::Event;

/// NDJSON (Newline Delimited JSON) reader
///
/// Yields one `Result<Event>` per non-blank line. A malformed line produces an
/// error carrying its line number; reading can continue past it.
pub struct NdjsonReader<R: BufRead> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> NdjsonReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far, blank lines included.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for NdjsonReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(e.into())),
            }

            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            let line = self.line;
            return Some(
                serde_json::from_str::<Event>(trimmed)
                    .map_err(|source| TransformError::JsonError { line, source }),
            );
        }
    }
}

/// Sink for transformed events.
pub trait EventWriter {
    fn write<T: Serialize>(&mut self, event: &T) -> Result<()>;

    /// Complete the output. Must be called once after the last write.
    fn finish(self) -> Result<()>;
}

/// NDJSON (Newline Delimited JSON) writer
///
/// Writes events as NDJSON, one JSON object per line.
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    /// Create a new NDJSON writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write multiple events
    pub fn write_all<T: Serialize>(&mut self, events: &[T]) -> Result<()> {
        for event in events {
            EventWriter::write(self, event)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> EventWriter for NdjsonWriter<W> {
    fn write<T: Serialize>(&mut self, event: &T) -> Result<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.flush()
    }
}

/// JSON array writer
///
/// Writes events as a JSON array.
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonArrayWriter<W> {
    /// Create a new JSON array writer and write the opening bracket
    pub fn new(mut writer: W) -> Result<Self> {
        write!(writer, "[")?;
        Ok(Self {
            writer,
            first: true,
        })
    }
}

impl<W: Write> EventWriter for JsonArrayWriter<W> {
    fn write<T: Serialize>(&mut self, event: &T) -> Result<()> {
        if !self.first {
            write!(self.writer, ",")?;
        }
        self.first = false;

        let json = serde_json::to_string(event)?;
        write!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Close the bracket and flush
    fn finish(mut self) -> Result<()> {
        writeln!(self.writer, "]")?;
        self.writer.flush()?;
        Ok(())
    }
}
