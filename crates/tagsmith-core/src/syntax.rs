//! Go source parsing with tree-sitter.

use crate::error::{TagError, TagResult};
use std::path::PathBuf;
use tree_sitter::{Node, Parser, Tree};

/// Parse Go source into a syntax tree.
///
/// A tree containing error or missing nodes is rejected with the 1-based
/// position of the first problem.
///
/// The grammar wants a terminator after the last declaration, so a file
/// without a final newline is parsed with one appended. Byte offsets of the
/// tree stay valid for `source`.
pub fn parse_go(source: &str) -> TagResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| TagError::Language(format!("failed to load Go grammar: {e}")))?;

    let terminated;
    let text = if source.is_empty() || source.ends_with('\n') {
        source
    } else {
        terminated = format!("{source}\n");
        terminated.as_str()
    };

    let tree = parser
        .parse(text, None)
        .ok_or_else(|| TagError::Internal("parser returned no tree".to_string()))?;

    if let Some((line, column)) = first_error(tree.root_node()) {
        return Err(TagError::Parse {
            path: PathBuf::new(),
            line,
            column,
        });
    }

    Ok(tree)
}

/// Position (1-based line and column) of the first error or missing node.
pub fn first_error(node: Node) -> Option<(usize, usize)> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row + 1, pos.column + 1));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(pos) = first_error(child) {
            return Some(pos);
        }
    }

    // has_error() with no erroring descendant found; report the node itself
    let pos = node.start_position();
    Some((pos.row + 1, pos.column + 1))
}

/// Source text covered by a node
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn parse_go___valid_source___returns_tree() {
        let tree = parse_go("package foo\n\ntype bar struct {\n\tID string\n}\n").unwrap();

        assert_eq!(tree.root_node().kind(), "source_file");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn parse_go___no_trailing_newline___accepted() {
        let source = "package foo\n\ntype bar struct {\n\tID string\n}";
        let tree = parse_go(source).unwrap();

        assert!(!tree.root_node().has_error());
        assert!(tree.root_node().end_byte() >= source.len());
    }

    #[test]
    fn parse_go___invalid_source___reports_position() {
        let result = parse_go("package foo\n\ntype bar struct {\n\tID string\n");

        assert!(matches!(result, Err(TagError::Parse { .. })));
    }

    #[test]
    fn parse_go___garbage_line___reports_its_line() {
        let result = parse_go("package foo\n\nfunc f() {\n\treturn )\n}\n");

        match result {
            Err(TagError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn node_text___returns_covered_slice() {
        let source = "package foo\n";
        let tree = parse_go(source).unwrap();
        let root = tree.root_node();
        let package = root.named_child(0).unwrap();

        assert_eq!(node_text(package, source), "package foo");
    }
}
