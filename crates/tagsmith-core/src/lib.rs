//! tagsmith-core - Go struct tag generation
//!
//! This crate rewrites Go source files so that exported struct fields carry
//! serialization tags derived from their names:
//! - [`Options`] describe a run (tag keys or template, name overrides, type filter)
//! - [`Generator`] parses, walks and rewrites one file or a package directory
//! - [`Sink`] receives rewritten sources and companion TypeScript classes
//! - [`TagError`] for error handling
//!
//! ```rust
//! use tagsmith_core::{Generator, Options};
//!
//! let options = Options {
//!     tags: vec!["json".to_string()],
//!     ..Options::default()
//! };
//! let output = Generator::new(&options)?
//!     .process_source("package foo\n\ntype bar struct {\n\tID string\n}\n")?;
//!
//! assert_eq!(
//!     output.source.as_deref(),
//!     Some("package foo\n\ntype bar struct {\n\tID string `json:\"id\"`\n}\n")
//! );
//! # Ok::<(), tagsmith_core::TagError>(())
//! ```

mod compose;
mod config;
mod edit;
mod error;
mod generate;
mod sink;
mod syntax;
mod target;
mod walker;

pub mod format;
pub mod naming;
pub mod schema;
pub mod tabwriter;

pub use compose::{TAG_DELIMITER, TagComposer, TemplateComposer};
pub use config::Options;
pub use edit::{Edit, apply_edits};
pub use error::{TagError, TagResult};
pub use generate::{FileOutput, Generator, Summary, run};
pub use sink::{FileSink, ReportSink, Sink};
pub use syntax::parse_go;
pub use target::discover_files;
pub use walker::{FieldDescriptor, StructDescriptor, TagSlot, Walk, Walker};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        FileSink, Generator, Options, ReportSink, Sink, Summary, TagError, TagResult,
    };
}
