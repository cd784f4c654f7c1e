//! Record emission to stdout or a file.
//!
//! Streaming mode writes and flushes each record as soon as it is produced
//! (appending when the destination is a file). Batch mode keeps records in
//! memory and writes them once, truncating the file, when input ends.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::OutputFormat;
use crate::error_handling::OutputError;
use crate::models::HostRecord;

use super::format::{format_json_array, format_json_line, format_text, format_text_batch};

enum Mode {
    Stream(Box<dyn Write + Send>),
    Batch {
        path: PathBuf,
        records: Vec<HostRecord>,
    },
}

/// Writes result records in the configured shape.
pub struct Emitter {
    mode: Mode,
    format: OutputFormat,
    enriched: bool,
    emitted: usize,
}

impl Emitter {
    /// Streams records to stdout.
    pub fn stdout(format: OutputFormat, enriched: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), format, enriched)
    }

    /// Streams records to an arbitrary writer.
    pub fn with_writer(writer: Box<dyn Write + Send>, format: OutputFormat, enriched: bool) -> Self {
        Self {
            mode: Mode::Stream(writer),
            format,
            enriched,
            emitted: 0,
        }
    }

    /// Streams records to `path`, appending to existing content.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Open` if the file cannot be opened or created.
    pub fn append_to(path: &Path, format: OutputFormat, enriched: bool) -> Result<Self, OutputError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| OutputError::Open {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::with_writer(
            Box::new(BufWriter::new(file)),
            format,
            enriched,
        ))
    }

    /// Collects records and writes them to `path` in [`Emitter::finish`].
    pub fn batch_to(path: &Path, format: OutputFormat, enriched: bool) -> Self {
        Self {
            mode: Mode::Batch {
                path: path.to_path_buf(),
                records: Vec::new(),
            },
            format,
            enriched,
            emitted: 0,
        }
    }

    /// Emits (or, in batch mode, buffers) one record.
    ///
    /// # Errors
    ///
    /// Returns an `OutputError` if serialization, writing or flushing fails.
    pub fn emit(&mut self, record: HostRecord) -> Result<(), OutputError> {
        match &mut self.mode {
            Mode::Stream(writer) => {
                let chunk = match self.format {
                    OutputFormat::Json => format_json_line(&record)?,
                    OutputFormat::Text => format_text(&record, self.enriched),
                };
                writer.write_all(chunk.as_bytes())?;
                writer.flush()?;
            }
            Mode::Batch { records, .. } => records.push(record),
        }
        self.emitted += 1;
        Ok(())
    }

    /// Completes emission and returns the number of records handled.
    ///
    /// Batch mode writes every buffered record here, replacing any existing
    /// file content. Streaming mode only flushes.
    ///
    /// # Errors
    ///
    /// Returns an `OutputError` if the final write fails.
    pub fn finish(self) -> Result<usize, OutputError> {
        match self.mode {
            Mode::Stream(mut writer) => writer.flush()?,
            Mode::Batch { path, records } => {
                let content = match self.format {
                    OutputFormat::Json => format_json_array(&records)?,
                    OutputFormat::Text => format_text_batch(&records, self.enriched),
                };
                std::fs::write(&path, content).map_err(|source| OutputError::WriteFile {
                    path: path.display().to_string(),
                    source,
                })?;
                debug!("Wrote {} record(s) to {}", records.len(), path.display());
            }
        }
        Ok(self.emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fingerprints, GeoRecord};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Writer that shares its buffer with the test.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Writer whose every write fails.
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn record(ip: &str, host: &str) -> HostRecord {
        HostRecord {
            ip: ip.to_string(),
            port: "443".to_string(),
            host: host.to_string(),
            fingerprints: Fingerprints::default(),
            geo: GeoRecord::default(),
        }
    }

    #[test]
    fn test_stream_text_writes_each_record() {
        let buf = SharedBuf::default();
        let mut emitter = Emitter::with_writer(Box::new(buf.clone()), OutputFormat::Text, false);
        emitter.emit(record("192.0.2.1", "a.example")).unwrap();
        assert_eq!(buf.contents(), "192.0.2.1:443 [a.example]\n");
        emitter.emit(record("192.0.2.2", "unknown")).unwrap();
        assert_eq!(emitter.finish().unwrap(), 2);
        assert_eq!(
            buf.contents(),
            "192.0.2.1:443 [a.example]\n192.0.2.2:443 [unknown]\n"
        );
    }

    #[test]
    fn test_stream_json_lines() {
        let buf = SharedBuf::default();
        let mut emitter = Emitter::with_writer(Box::new(buf.clone()), OutputFormat::Json, false);
        emitter.emit(record("192.0.2.1", "a.example")).unwrap();
        emitter.emit(record("192.0.2.2", "b.example")).unwrap();
        emitter.finish().unwrap();

        let contents = buf.contents();
        let parsed: Vec<HostRecord> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            parsed,
            vec![record("192.0.2.1", "a.example"), record("192.0.2.2", "b.example")]
        );
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut emitter = Emitter::with_writer(Box::new(FailingWriter), OutputFormat::Text, false);
        let err = emitter.emit(record("192.0.2.1", "a.example")).unwrap_err();
        assert!(matches!(err, OutputError::Write(_)));
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "earlier run\n").unwrap();

        let mut emitter = Emitter::append_to(&path, OutputFormat::Text, false).unwrap();
        emitter.emit(record("192.0.2.1", "a.example")).unwrap();
        emitter.finish().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "earlier run\n192.0.2.1:443 [a.example]\n"
        );
    }

    #[test]
    fn test_append_to_missing_directory_fails_to_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = Emitter::append_to(&path, OutputFormat::Json, false)
            .err()
            .expect("opening under a missing directory should fail");
        assert!(matches!(err, OutputError::Open { .. }));
    }

    #[test]
    fn test_batch_writes_once_at_finish() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale").unwrap();

        let mut emitter = Emitter::batch_to(&path, OutputFormat::Json, false);
        emitter.emit(record("192.0.2.1", "a.example")).unwrap();
        emitter.emit(record("192.0.2.2", "b.example")).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "stale",
            "nothing is written before finish"
        );

        assert_eq!(emitter.finish().unwrap(), 2);
        let parsed: Vec<HostRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].host, "b.example");
    }

    #[test]
    fn test_batch_write_failure_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let mut emitter = Emitter::batch_to(&path, OutputFormat::Json, false);
        emitter.emit(record("192.0.2.1", "a.example")).unwrap();
        let err = emitter.finish().unwrap_err();

        assert!(matches!(err, OutputError::WriteFile { .. }));
        assert!(err.to_string().starts_with("error writing file "));
        assert!(err.to_string().contains("out.json"));
    }

    #[test]
    fn test_batch_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut emitter = Emitter::batch_to(&path, OutputFormat::Text, false);
        emitter.emit(record("192.0.2.1", "a.example")).unwrap();
        emitter.finish().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "192.0.2.1:443 [a.example]\n"
        );
    }
}
