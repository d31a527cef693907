//! Output destinations for rewritten sources and companion schemas.

use crate::error::{TagError, TagResult};
use crate::schema::schema_path;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Receives the output of a generation run.
pub trait Sink {
    /// Rewritten source for `path`
    fn write_source(&mut self, path: &Path, text: &str) -> TagResult<()>;

    /// Companion schema for the source at `path`
    fn write_schema(&mut self, path: &Path, text: &str) -> TagResult<()>;
}

/// Writes sources in place and schemas to `<file>.ts`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSink;

impl Sink for FileSink {
    fn write_source(&mut self, path: &Path, text: &str) -> TagResult<()> {
        write_file(path, text)
    }

    fn write_schema(&mut self, path: &Path, text: &str) -> TagResult<()> {
        write_file(&schema_path(path), text)
    }
}

fn write_file(path: &Path, text: &str) -> TagResult<()> {
    fs::write(path, text).map_err(|source| TagError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote file");
    Ok(())
}

/// Reports output to a stream instead of touching files (dry run).
///
/// Each text is followed by a newline.
#[derive(Debug)]
pub struct ReportSink<W> {
    writer: W,
}

impl<W: Write> ReportSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn report(&mut self, path: &Path, text: &str) -> TagResult<()> {
        writeln!(self.writer, "{text}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| TagError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl<W: Write> Sink for ReportSink<W> {
    fn write_source(&mut self, path: &Path, text: &str) -> TagResult<()> {
        self.report(path, text)
    }

    fn write_schema(&mut self, path: &Path, text: &str) -> TagResult<()> {
        self.report(&schema_path(path), text)
    }
}
