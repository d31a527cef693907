//! Canonical re-formatting of rewritten Go source.
//!
//! Tag edits change the width of field lines, so multi-line struct bodies
//! are re-aligned the way gofmt aligns them: one indentation step per field
//! and tabwriter columns for names, types, tags and trailing comments.
//!
//! This is not a gofmt pass. Only the column layout of struct fields is
//! touched. Type text is kept as written (`map[string] int` stays spaced),
//! code outside struct bodies is kept byte-for-byte, and body lines holding
//! several fields (`A int; B int`) or inline comments are left verbatim. The
//! only other change is a single trailing newline at end of file.

use crate::edit::{Edit, apply_edits};
use crate::error::{TagError, TagResult};
use crate::syntax::{node_text, parse_go};
use crate::tabwriter::align;
use std::collections::BTreeMap;
use std::ops::Range;
use tree_sitter::Node;

/// Re-parse and canonicalize rewritten source.
///
/// Fails with [`TagError::Reformat`] when the text is no longer valid Go.
pub fn canonicalize(source: &str) -> TagResult<String> {
    let tree = parse_go(source).map_err(|e| match e {
        TagError::Parse { line, column, .. } => TagError::Reformat { line, column },
        other => other,
    })?;

    let lines = LineIndex::new(source);
    let mut edits = Vec::new();
    collect_layout_edits(tree.root_node(), source, &lines, &mut edits);
    tracing::trace!(bodies = edits.len(), "re-laid struct bodies");

    let mut text = apply_edits(source, &edits)?;
    let content_len = text.trim_end().len();
    text.truncate(content_len);
    text.push_str(lines.newline);
    Ok(text)
}

fn collect_layout_edits(node: Node, source: &str, lines: &LineIndex, edits: &mut Vec<Edit>) {
    if node.kind() == "field_declaration_list" {
        BodyLayout::new(node, source, lines).plan(edits);
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_layout_edits(child, source, lines, edits);
    }
}

/// Byte ranges of the source lines, without line terminators.
struct LineIndex {
    ranges: Vec<Range<usize>>,
    len: usize,
    newline: &'static str,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut ranges = Vec::new();
        let mut start = 0;
        for line in source.split_inclusive('\n') {
            let content = line.trim_end_matches('\n').trim_end_matches('\r');
            ranges.push(start..start + content.len());
            start += line.len();
        }
        if source.is_empty() || source.ends_with('\n') {
            ranges.push(source.len()..source.len());
        }

        let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            ranges,
            len: source.len(),
            newline,
        }
    }

    fn line(&self, row: usize) -> Range<usize> {
        self.ranges
            .get(row)
            .cloned()
            .unwrap_or(self.len..self.len)
    }
}

/// One line of a struct body as seen by the aligner.
enum BodyLine {
    Blank,
    Cells(Vec<String>),
}

/// Consecutive body lines that are re-laid out together.
struct Segment {
    first_row: usize,
    last_row: usize,
    lines: Vec<BodyLine>,
}

struct BodyLayout<'a> {
    source: &'a str,
    lines: &'a LineIndex,
    open_row: usize,
    close_row: usize,
    indent: String,
    items: BTreeMap<usize, Vec<Node<'a>>>,
}

impl<'a> BodyLayout<'a> {
    fn new(list: Node<'a>, source: &'a str, lines: &'a LineIndex) -> Self {
        let open_row = list.start_position().row;
        let close_row = list.end_position().row;

        let open_line = &source[lines.line(open_row)];
        let outer: String = open_line
            .chars()
            .take_while(|c| *c == '\t' || *c == ' ')
            .collect();

        let mut items: BTreeMap<usize, Vec<Node<'a>>> = BTreeMap::new();
        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            if matches!(child.kind(), "field_declaration" | "comment") {
                items
                    .entry(child.start_position().row)
                    .or_default()
                    .push(child);
            }
        }

        Self {
            source,
            lines,
            open_row,
            close_row,
            indent: format!("{outer}\t"),
            items,
        }
    }

    fn plan(&self, edits: &mut Vec<Edit>) {
        // Single-line bodies stay as written.
        if self.close_row <= self.open_row + 1 {
            return;
        }

        let mut segment: Option<Segment> = None;
        let mut row = self.open_row + 1;

        while row < self.close_row {
            let text = &self.source[self.lines.line(row)];

            match self.items.get(&row) {
                Some(nodes) => {
                    let last_row = nodes
                        .iter()
                        .map(|n| n.end_position().row)
                        .max()
                        .unwrap_or(row);
                    if last_row > row {
                        // Multi-line fields keep their layout and end the block.
                        self.flush(segment.take(), edits);
                        row = last_row + 1;
                        continue;
                    }

                    match self.row_cells(nodes, text) {
                        Some(cells) => {
                            let seg = segment.get_or_insert_with(|| Segment {
                                first_row: row,
                                last_row: row,
                                lines: Vec::new(),
                            });
                            seg.last_row = row;
                            seg.lines.push(BodyLine::Cells(cells));
                        }
                        None => self.flush(segment.take(), edits),
                    }
                }
                None if text.trim().is_empty() => {
                    if let Some(seg) = segment.as_mut()
                        && !matches!(seg.lines.last(), Some(BodyLine::Blank))
                    {
                        seg.lines.push(BodyLine::Blank);
                    }
                }
                None => self.flush(segment.take(), edits),
            }
            row += 1;
        }

        self.flush(segment, edits);
    }

    /// Cells for a single-line row, or `None` when the row must stay verbatim.
    fn row_cells(&self, nodes: &[Node<'a>], line: &str) -> Option<Vec<String>> {
        let cells = match nodes {
            [comment] if comment.kind() == "comment" => {
                vec![node_text(*comment, self.source).to_string()]
            }
            [field] if field.kind() == "field_declaration" => self.field_cells(*field, None)?,
            [field, comment]
                if field.kind() == "field_declaration"
                    && comment.kind() == "comment"
                    && comment.start_byte() >= field.end_byte() =>
            {
                self.field_cells(*field, Some(*comment))?
            }
            _ => return None,
        };

        // Anything on the line the cells do not account for (`;`, inline
        // comments) keeps the line verbatim.
        let covered: String = cells.concat().split_whitespace().collect();
        let actual: String = line.split_whitespace().collect();
        (covered == actual).then_some(cells)
    }

    /// gofmt cell layout of a struct field.
    ///
    /// Named fields: `names | type | tag | comment`. Embedded fields leave the
    /// type column empty so their tag lines up with the other tags.
    fn field_cells(&self, field: Node<'a>, comment: Option<Node<'a>>) -> Option<Vec<String>> {
        let type_node = field.child_by_field_name("type")?;
        let tag = field
            .child_by_field_name("tag")
            .map(|n| node_text(n, self.source).to_string());
        let comment = comment.map(|n| node_text(n, self.source).to_string());

        let mut cursor = field.walk();
        let names: Vec<&str> = field
            .children_by_field_name("name", &mut cursor)
            .map(|n| node_text(n, self.source))
            .collect();

        let mut cells = Vec::with_capacity(4);
        if names.is_empty() {
            // Keep a leading `*` of embedded pointers.
            cells.push(self.source[field.start_byte()..type_node.end_byte()].to_string());
            if tag.is_some() || comment.is_some() {
                cells.push(String::new());
            }
        } else {
            cells.push(names.join(", "));
            cells.push(node_text(type_node, self.source).to_string());
        }
        cells.extend(tag);
        cells.extend(comment);
        Some(cells)
    }

    fn flush(&self, segment: Option<Segment>, edits: &mut Vec<Edit>) {
        let Some(mut segment) = segment else {
            return;
        };
        while matches!(segment.lines.last(), Some(BodyLine::Blank)) {
            segment.lines.pop();
        }

        let rows: Vec<Vec<String>> = segment
            .lines
            .iter()
            .map(|line| match line {
                BodyLine::Blank => Vec::new(),
                BodyLine::Cells(cells) => cells.clone(),
            })
            .collect();

        let text = align(&rows)
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    line
                } else {
                    format!("{}{line}", self.indent)
                }
            })
            .collect::<Vec<_>>()
            .join(self.lines.newline);

        let range = self.lines.line(segment.first_row).start..self.lines.line(segment.last_row).end;
        if self.source[range.clone()] != text {
            edits.push(Edit::replace(range, text));
        }
    }
}
