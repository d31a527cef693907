//! Planned text edits and their application.
//!
//! The walker never touches the source; it plans [`Edit`]s that are applied
//! here in a single pass. Either every edit lands or the caller gets an error
//! and the original text is untouched.

use crate::error::{TagError, TagResult};
use std::ops::Range;

/// Replace `range` of the source with `text`. An empty range inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    /// Replace a byte range
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Insert text at a byte offset
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            text: text.into(),
        }
    }
}

/// Apply edits to `source`, returning the new text.
///
/// Edits may be given in any order but must not overlap; two insertions at the
/// same offset keep their relative order.
pub fn apply_edits(source: &str, edits: &[Edit]) -> TagResult<String> {
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.range.start, e.range.end));

    let added: usize = edits.iter().map(|e| e.text.len()).sum();
    let mut result = String::with_capacity(source.len() + added);
    let mut cursor = 0;

    for edit in ordered {
        let Range { start, end } = edit.range;
        if start < cursor {
            return Err(TagError::Internal(format!(
                "overlapping edits at byte {start}"
            )));
        }
        if start > end || end > source.len() {
            return Err(TagError::Internal(format!(
                "edit range {start}..{end} outside source of {} bytes",
                source.len()
            )));
        }
        let (Some(kept), Some(_)) = (source.get(cursor..start), source.get(start..end)) else {
            return Err(TagError::Internal(format!(
                "edit range {start}..{end} splits a character"
            )));
        };

        result.push_str(kept);
        result.push_str(&edit.text);
        cursor = end;
    }

    result.push_str(&source[cursor..]);
    Ok(result)
}
