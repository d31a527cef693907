//! Generation options

use crate::error::{TagError, TagResult};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Options for one generation run over a file or a package directory.
///
/// Loaded from a `tagsmith.toml` file or assembled by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// File or directory to process; the current directory when empty
    pub target: PathBuf,

    /// Tag keys such as `json` or `yaml`, emitted in this order
    pub tags: Vec<String>,

    /// Template for the tag contents, used when `tags` is empty
    ///
    /// The converted field name is available as `name`.
    pub template: Option<String>,

    /// Explicit tag names keyed by Go field identifier
    pub mapping: BTreeMap<String, String>,

    /// Struct types to generate tags for; all structs when empty
    pub types: BTreeSet<String>,

    /// Report output instead of writing files
    pub dry_run: bool,

    /// Emit a TypeScript class listing next to each source file
    pub typescript: bool,
}

impl Options {
    /// Create options for a target with everything else defaulted
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Load options from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> TagResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TagError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> TagResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Target path, falling back to the current directory
    pub fn target_or_cwd(&self) -> PathBuf {
        if self.target.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            self.target.clone()
        }
    }

    /// Whether tags are composed from a template rather than tag keys
    pub fn uses_template(&self) -> bool {
        self.tags.is_empty() && self.template.is_some()
    }

    /// Check that the options can drive a run.
    ///
    /// Template syntax is checked separately when the composer is built.
    pub fn validate(&self) -> TagResult<()> {
        if self.tags.is_empty() && self.template.is_none() {
            return Err(TagError::Config(
                "either tags or a template must be given".to_string(),
            ));
        }

        for tag in &self.tags {
            if tag.is_empty() {
                return Err(TagError::Config("tag key cannot be empty".to_string()));
            }
            if tag
                .chars()
                .any(|c| c.is_whitespace() || c == '"' || c == ':' || c == '`')
            {
                return Err(TagError::Config(format!("invalid tag key: {tag:?}")));
            }
        }

        if let Some(template) = &self.template
            && self.tags.is_empty()
            && template.trim().is_empty()
        {
            return Err(TagError::Config("template cannot be empty".to_string()));
        }

        if self.types.iter().any(|t| t.is_empty()) {
            return Err(TagError::Config("type name cannot be empty".to_string()));
        }

        if self.mapping.keys().any(|k| k.is_empty()) {
            return Err(TagError::Config("mapping key cannot be empty".to_string()));
        }

        Ok(())
    }
}
