//! Resolution of a target path to the Go files it names.

use crate::error::{TagError, TagResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a target to the source files to process.
///
/// A file is used as is. A directory yields its `*.go` files, without
/// descending into subdirectories, sorted by name. Like `go build`, it skips
/// `_test.go` files, names starting with `.` or `_`, and files whose leading
/// build constraint is `ignore`.
pub fn discover_files(target: &Path) -> TagResult<Vec<PathBuf>> {
    let io_error = |source| TagError::Io {
        path: target.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(target).map_err(io_error)?;
    if !metadata.is_dir() {
        return Ok(vec![target.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(target).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        if !path.is_file() || !is_go_source(&path) {
            continue;
        }
        if is_build_ignored(&path)? {
            tracing::debug!(path = %path.display(), "skipping build-ignored source");
            continue;
        }
        files.push(path);
    }

    if files.is_empty() {
        return Err(TagError::NoSourceFiles(target.to_path_buf()));
    }

    files.sort();
    tracing::debug!(target = %target.display(), files = files.len(), "discovered sources");
    Ok(files)
}

fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go")
        && !name.ends_with("_test.go")
        && !name.starts_with('.')
        && !name.starts_with('_')
}

/// Whether the constraint lines before the package clause reduce to `ignore`.
fn is_build_ignored(path: &Path) -> TagResult<bool> {
    let source = fs::read_to_string(path).map_err(|source| TagError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    for line in source.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        let Some(comment) = line.strip_prefix("//") else {
            break;
        };
        if let Some(expr) = comment.strip_prefix("go:build") {
            return Ok(expr.trim() == "ignore");
        }
        if let Some(expr) = comment.trim_start().strip_prefix("+build")
            && expr.trim() == "ignore"
        {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "package foo\n").unwrap();
    }

    #[test]
    fn discover_files___file_target___returned_as_is() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "notes.txt");
        let file = dir.path().join("notes.txt");

        let files = discover_files(&file).unwrap();

        assert_eq!(files, vec![file]);
    }

    #[test]
    fn discover_files___directory___sorted_go_sources_only() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "user.go");
        touch(dir.path(), "account.go");
        touch(dir.path(), "user_test.go");
        touch(dir.path(), ".hidden.go");
        touch(dir.path(), "README.md");
        touch(dir.path(), "_scratch.go");
        fs::write(
            dir.path().join("gen.go"),
            "// Code generator.\n\n//go:build ignore\n\npackage main\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("legacy.go"),
            "// +build ignore\n\npackage foo\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("linux.go"),
            "//go:build linux\n\npackage foo\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("nested.go")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), "deep.go");

        let files = discover_files(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join("account.go"),
                dir.path().join("linux.go"),
                dir.path().join("user.go"),
            ]
        );
    }

    #[test]
    fn is_build_ignored___constraint_after_package___not_applied() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("late.go");
        fs::write(&path, "package foo\n\n//go:build ignore\n").unwrap();

        assert!(!is_build_ignored(&path).unwrap());
    }

    #[test]
    fn discover_files___directory_without_sources___is_error() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main_test.go");

        let result = discover_files(dir.path());

        assert!(matches!(result, Err(TagError::NoSourceFiles(_))));
    }

    #[test]
    fn discover_files___missing_target___is_io_error() {
        let dir = TempDir::new().unwrap();

        let result = discover_files(&dir.path().join("missing"));

        assert!(matches!(result, Err(TagError::Io { .. })));
    }
}
