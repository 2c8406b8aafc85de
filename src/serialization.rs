//! Streaming record I/O.
//!
//! Records are written as NDJSON (one wire object per line) or as a JSON
//! array, and read back from NDJSON against a schema.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::error::RecordError;
use crate::record::Record;
use crate::schema::Schema;

/// Error type for serialization operations
#[derive(Debug)]
pub enum SerializationError {
    JsonError(serde_json::Error),
    IoError(std::io::Error),
    /// A line parsed as JSON but did not decode against the schema.
    Record {
        line: usize,
        error: RecordError,
    },
    /// A line was not valid JSON.
    Syntax {
        line: usize,
        error: serde_json::Error,
    },
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::JsonError(err)
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(err: std::io::Error) -> Self {
        SerializationError::IoError(err)
    }
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::JsonError(e) => write!(f, "JSON error: {}", e),
            SerializationError::IoError(e) => write!(f, "IO error: {}", e),
            SerializationError::Record { line, error } => write!(f, "line {}: {}", line, error),
            SerializationError::Syntax { line, error } => {
                write!(f, "line {}: invalid JSON: {}", line, error)
            }
        }
    }
}

impl std::error::Error for SerializationError {}

/// NDJSON (Newline Delimited JSON) writer
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    /// Create a new NDJSON writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single record (or any serializable value) as one line
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), SerializationError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write every record, one per line
    pub fn write_all<'a, T, I>(&mut self, records: I) -> Result<(), SerializationError>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), SerializationError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// JSON array writer
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonArrayWriter<W> {
    /// Create a new JSON array writer and write the opening bracket
    pub fn new(mut writer: W) -> Result<Self, SerializationError> {
        write!(writer, "[")?;
        Ok(Self {
            writer,
            first: true,
        })
    }

    /// Write one array element, adding the separating comma
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), SerializationError> {
        if !self.first {
            write!(self.writer, ",")?;
        }
        self.first = false;
        serde_json::to_writer(&mut self.writer, record)?;
        Ok(())
    }

    /// Close the bracket and flush
    pub fn finish(mut self) -> Result<W, SerializationError> {
        write!(self.writer, "]")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Iterator decoding NDJSON lines against a schema.
///
/// Blank lines are skipped. Errors carry the 1-based line number.
pub struct NdjsonReader<R: BufRead> {
    reader: R,
    schema: Arc<Schema>,
    line: usize,
    buf: String,
}

impl<R: BufRead> NdjsonReader<R> {
    /// Create a reader decoding every line as `schema`
    pub fn new(reader: R, schema: Arc<Schema>) -> Self {
        Self {
            reader,
            schema,
            line: 0,
            buf: String::new(),
        }
    }

    /// Line number of the most recently read line
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for NdjsonReader<R> {
    type Item = Result<Record, SerializationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(e.into())),
            }

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let line = self.line;
            let wire: JsonValue = match serde_json::from_str(text) {
                Ok(wire) => wire,
                Err(error) => return Some(Err(SerializationError::Syntax { line, error })),
            };

            return Some(
                Record::from_wire(self.schema.clone(), &wire)
                    .map_err(|error| SerializationError::Record { line, error }),
            );
        }
    }
}

/// Read every record from NDJSON input, stopping at the first error.
pub fn read_ndjson<R: BufRead>(
    reader: R,
    schema: Arc<Schema>,
) -> Result<Vec<Record>, SerializationError> {
    NdjsonReader::new(reader, schema).collect()
}
