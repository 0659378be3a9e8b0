//! Streaming document writer.

use crate::args::OutputFormat;
use crate::error::ExportError;
use docgen_core::Document;
use docgen_generator::GenerateError;
use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for output writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from an export run.
#[derive(Debug, Clone, Default)]
pub struct ExportMetrics {
    /// Number of documents written.
    pub documents_written: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating documents.
    pub generation_duration: Duration,
    /// Time spent serializing and writing.
    pub write_duration: Duration,
}

impl ExportMetrics {
    /// Calculate documents per second.
    pub fn documents_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.documents_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.bytes_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Counts bytes passing through to the inner writer.
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writes a stream of generated documents in one output format.
pub struct DocumentWriter<W: Write> {
    writer: BufWriter<CountingWriter<W>>,
    format: OutputFormat,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        let counting = CountingWriter { inner, count: 0 };
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, counting),
            format,
        }
    }

    /// Generate and write every document from `documents`.
    ///
    /// Stops at the first generation error and returns it; output written
    /// up to that point is flushed but left incomplete.
    pub fn write_all<I>(mut self, documents: I) -> Result<ExportMetrics, ExportError>
    where
        I: IntoIterator<Item = Result<Document, GenerateError>>,
    {
        let start_time = Instant::now();
        let mut metrics = ExportMetrics::default();
        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        if self.format == OutputFormat::Array {
            self.writer.write_all(b"[")?;
        }

        let mut documents = documents.into_iter();
        loop {
            let gen_start = Instant::now();
            let next = documents.next();
            generation_time += gen_start.elapsed();

            let document = match next {
                None => break,
                Some(Ok(document)) => document,
                Some(Err(e)) => {
                    self.writer.flush()?;
                    return Err(e.into());
                }
            };

            let write_start = Instant::now();
            self.write_document(&document, metrics.documents_written == 0)?;
            write_time += write_start.elapsed();

            metrics.documents_written += 1;
            if metrics.documents_written % 10000 == 0 {
                debug!("Written {} documents", metrics.documents_written);
            }
        }

        if self.format == OutputFormat::Array {
            self.writer.write_all(b"]\n")?;
        }
        self.writer.flush()?;

        metrics.bytes_written = self.writer.get_ref().count;
        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;

        info!(
            "Export complete: {} documents, {} bytes in {:?} ({:.2} docs/sec)",
            metrics.documents_written,
            metrics.bytes_written,
            metrics.total_duration,
            metrics.documents_per_second()
        );

        Ok(metrics)
    }

    fn write_document(&mut self, document: &Document, first: bool) -> Result<(), ExportError> {
        match self.format {
            OutputFormat::Array => {
                if !first {
                    self.writer.write_all(b",")?;
                }
                serde_json::to_writer(&mut self.writer, document)?;
            }
            OutputFormat::Ndjson => {
                serde_json::to_writer(&mut self.writer, document)?;
                self.writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

/// Render documents into a string.
pub fn render_documents(documents: &[Document], format: OutputFormat) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    DocumentWriter::new(&mut buf, format).write_all(documents.iter().cloned().map(Ok))?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgen_core::{FieldMap, FieldRule, GeneratedValue};
    use docgen_generator::{DocumentGenerator, Registry, SynthesisError};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn documents() -> Vec<Document> {
        (1..=3)
            .map(|i| {
                Document::builder()
                    .field("id", GeneratedValue::Int64(i))
                    .field("game", GeneratedValue::from("cs2"))
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_metrics() {
        let metrics = ExportMetrics {
            documents_written: 1000,
            bytes_written: 100000,
            total_duration: Duration::from_secs(10),
            generation_duration: Duration::from_secs(2),
            write_duration: Duration::from_secs(8),
        };

        assert_eq!(metrics.documents_per_second(), 100.0);
        assert_eq!(metrics.bytes_per_second(), 10000.0);
        assert_eq!(ExportMetrics::default().documents_per_second(), 0.0);
    }

    #[test]
    fn test_render_array() {
        let rendered = render_documents(&documents(), OutputFormat::Array).unwrap();
        assert_eq!(
            rendered,
            "[{\"id\":1,\"game\":\"cs2\"},{\"id\":2,\"game\":\"cs2\"},{\"id\":3,\"game\":\"cs2\"}]\n"
        );

        let empty = render_documents(&[], OutputFormat::Array).unwrap();
        assert_eq!(empty, "[]\n");
    }

    #[test]
    fn test_render_ndjson() {
        let rendered = render_documents(&documents(), OutputFormat::Ndjson).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], r#"{"id":2,"game":"cs2"}"#);
    }

    #[test]
    fn test_render_keeps_non_ascii_text() {
        let document = Document::builder()
            .field("name", GeneratedValue::from("Åsa Ñúñez"))
            .build();
        let rendered = render_documents(&[document], OutputFormat::Ndjson).unwrap();
        assert_eq!(rendered, "{\"name\":\"Åsa Ñúñez\"}\n");
    }

    #[test]
    fn test_write_generated_batch_to_file() {
        let mut fields = FieldMap::new();
        fields.insert("game", FieldRule::new("game").with_option("option", "lol"));
        fields.insert("role", FieldRule::new("role"));
        fields.insert("trophies", FieldRule::new("trophies").with_option("amount", 2));
        let generator = DocumentGenerator::new(Arc::new(Registry::default()), fields).with_seed(42);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("players.ndjson");
        let file = std::fs::File::create(&path).unwrap();

        let metrics = DocumentWriter::new(file, OutputFormat::Ndjson)
            .write_all(generator.generate(5).unwrap())
            .unwrap();

        assert_eq!(metrics.documents_written, 5);
        assert_eq!(metrics.bytes_written, std::fs::metadata(&path).unwrap().len());

        let content = std::fs::read_to_string(&path).unwrap();
        for line in content.lines() {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(json["game"], "league_of_legends");
            assert_eq!(json["trophies"].as_array().unwrap().len(), 2);
        }
    }

    #[test]
    fn test_generation_error_aborts() {
        let failing = vec![
            Ok(documents().remove(0)),
            Err(GenerateError::Field {
                field: "role".to_string(),
                source: SynthesisError::MissingDependency {
                    tag: "role".to_string(),
                    depends_on: "game".to_string(),
                },
            }),
            Ok(documents().remove(1)),
        ];

        let mut buf = Vec::new();
        let err = DocumentWriter::new(&mut buf, OutputFormat::Ndjson)
            .write_all(failing)
            .unwrap_err();

        assert!(matches!(err, ExportError::Generate(GenerateError::Field { .. })));
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
