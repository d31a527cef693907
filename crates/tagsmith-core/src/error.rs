//! Error types for tag generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tag generation
pub type TagResult<T> = Result<T, TagError>;

/// Error type for tag generation.
///
/// Every variant is terminal for the file (or batch) being processed.
#[derive(Error, Debug)]
pub enum TagError {
    /// Target or source file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target directory holds no Go source files
    #[error("no Go source files in {}", .0.display())]
    NoSourceFiles(PathBuf),

    /// Source text is not valid Go
    #[error("syntax error in {} at {line}:{column}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    /// Tag template failed to render
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Options are inconsistent or unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// Rewritten source no longer parses
    #[error("rewritten source is invalid at {line}:{column}")]
    Reformat { line: usize, column: usize },

    /// Output file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Go grammar could not be loaded into the parser
    #[error("language error: {0}")]
    Language(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl TagError {
    /// Attach a file path to a parse error raised on in-memory source.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            TagError::Parse { line, column, .. } => TagError::Parse {
                path: path.into(),
                line,
                column,
            },
            other => other,
        }
    }
}

impl From<toml::de::Error> for TagError {
    fn from(err: toml::de::Error) -> Self {
        TagError::Config(err.to_string())
    }
}
