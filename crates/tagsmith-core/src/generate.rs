//! The per-file and per-target generation pipeline.
//!
//! ```text
//! read → parse → walk ─┬─ edits? → apply → canonicalize → sink source
//!                      └─ structs & typescript? → render → sink schema
//! ```

use crate::compose::TagComposer;
use crate::config::Options;
use crate::edit::apply_edits;
use crate::error::{TagError, TagResult};
use crate::format::canonicalize;
use crate::naming::NameConverter;
use crate::schema::render_typescript;
use crate::sink::Sink;
use crate::syntax::parse_go;
use crate::target::discover_files;
use crate::walker::{StructDescriptor, Walker};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Output of processing one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutput {
    /// Rewritten source; `None` when no tag changed
    pub source: Option<String>,

    /// Companion TypeScript; `None` when not requested or no struct was found
    pub schema: Option<String>,

    /// Structs collected by the walk
    pub structs: Vec<StructDescriptor>,
}

impl FileOutput {
    pub fn modified(&self) -> bool {
        self.source.is_some()
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub modified: usize,
    pub schemas: usize,
}

/// Tag generator built once from validated options.
#[derive(Debug)]
pub struct Generator {
    converter: NameConverter,
    composer: TagComposer,
    types: BTreeSet<String>,
    typescript: bool,
}

impl Generator {
    /// Validate options and compile the tag template, if any.
    pub fn new(options: &Options) -> TagResult<Self> {
        options.validate()?;

        Ok(Self {
            converter: NameConverter::new(options.mapping.clone()),
            composer: TagComposer::from_options(options)?,
            types: options.types.clone(),
            typescript: options.typescript,
        })
    }

    /// Generate tags for in-memory source.
    ///
    /// Parse errors carry an empty path; [`Generator::process_file`] fills it in.
    pub fn process_source(&self, source: &str) -> TagResult<FileOutput> {
        let tree = parse_go(source)?;
        let walk = Walker::new(&self.converter, &self.composer, &self.types).walk(&tree, source)?;

        let rewritten = if walk.modified() {
            tracing::debug!(edits = walk.edits.len(), "applying tag edits");
            let edited = apply_edits(source, &walk.edits)?;
            Some(canonicalize(&edited)?)
        } else {
            tracing::debug!("no tag changes");
            None
        };

        let schema = if !self.typescript {
            None
        } else if walk.structs.is_empty() {
            tracing::debug!("no structs, skipping schema");
            None
        } else {
            Some(render_typescript(&walk.structs))
        };

        Ok(FileOutput {
            source: rewritten,
            schema,
            structs: walk.structs,
        })
    }

    /// Generate tags for one file and hand the results to `sink`.
    pub fn process_file(&self, path: &Path, sink: &mut dyn Sink) -> TagResult<FileOutput> {
        tracing::info!(path = %path.display(), "generating tags");

        let source = fs::read_to_string(path).map_err(|source| TagError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let output = self
            .process_source(&source)
            .map_err(|e| e.with_path(path))?;

        if let Some(text) = &output.source {
            sink.write_source(path, text)?;
        }
        if let Some(text) = &output.schema {
            sink.write_schema(path, text)?;
        }
        Ok(output)
    }

    /// Process every file named by `target`, stopping at the first error.
    pub fn run(&self, target: &Path, sink: &mut dyn Sink) -> TagResult<Summary> {
        let mut summary = Summary::default();

        for file in discover_files(target)? {
            let output = self.process_file(&file, sink)?;
            summary.files += 1;
            summary.modified += usize::from(output.modified());
            summary.schemas += usize::from(output.schema.is_some());
        }

        tracing::info!(
            files = summary.files,
            modified = summary.modified,
            "generation complete"
        );
        Ok(summary)
    }
}

/// Build a generator from `options` and run it over `options.target`.
pub fn run(options: &Options, sink: &mut dyn Sink) -> TagResult<Summary> {
    Generator::new(options)?.run(&options.target_or_cwd(), sink)
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
