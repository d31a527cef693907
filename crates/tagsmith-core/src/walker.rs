//! Struct discovery and field selection.
//!
//! The walker visits every node of a Go syntax tree and, for each struct type
//! declaration that passes the type filter, collects a [`StructDescriptor`]
//! and plans the tag [`Edit`]s for its eligible fields.
//!
//! A field is eligible when its declaration names exactly one identifier and
//! that identifier is exported:
//!
//! ```go
//! type RawRecord struct {
//!     gorm.Model        // embedded: skipped
//!     Lat, Lng float64  // grouped: skipped
//!     internal string   // unexported: skipped
//!     Rating   float64  // tagged
//! }
//! ```

use crate::compose::TagComposer;
use crate::edit::Edit;
use crate::error::TagResult;
use crate::naming::NameConverter;
use crate::syntax::node_text;
use std::collections::BTreeSet;
use std::ops::Range;
use tree_sitter::{Node, Tree};

/// An eligible struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Go identifier
    pub name: String,

    /// Name used in the tag
    pub converted_name: String,

    /// Literal source text of the field type, not resolved
    pub type_text: String,

    /// Where the field's tag lives in the source
    pub slot: TagSlot,

    /// Composed tag text, backticks included
    pub tag: String,
}

/// Location of a field's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSlot {
    /// The field already carries a tag literal
    Existing { range: Range<usize>, text: String },

    /// No tag yet; a new one goes right after the type
    Missing { insert_at: usize },
}

impl FieldDescriptor {
    /// Edit that writes the composed tag, or `None` when it is already there.
    ///
    /// Existing tags are overwritten, not merged.
    pub fn edit(&self) -> Option<Edit> {
        match &self.slot {
            TagSlot::Existing { text, .. } if *text == self.tag => None,
            TagSlot::Existing { range, .. } => {
                Some(Edit::replace(range.clone(), self.tag.clone()))
            }
            TagSlot::Missing { insert_at } => {
                Some(Edit::insert(*insert_at, format!(" {}", self.tag)))
            }
        }
    }
}

/// A struct type declaration with its eligible fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Result of walking one file.
#[derive(Debug, Clone, Default)]
pub struct Walk {
    /// Structs in encounter order
    pub structs: Vec<StructDescriptor>,

    /// Tag edits in source order
    pub edits: Vec<Edit>,
}

impl Walk {
    /// Whether any tag text changes
    pub fn modified(&self) -> bool {
        !self.edits.is_empty()
    }
}

/// Walks a syntax tree, selecting fields and composing their tags.
pub struct Walker<'a> {
    converter: &'a NameConverter,
    composer: &'a TagComposer,
    types: &'a BTreeSet<String>,
}

impl<'a> Walker<'a> {
    pub fn new(
        converter: &'a NameConverter,
        composer: &'a TagComposer,
        types: &'a BTreeSet<String>,
    ) -> Self {
        Self {
            converter,
            composer,
            types,
        }
    }

    /// Walk the whole tree.
    ///
    /// Stops at the first composition error; nothing has been applied to the
    /// source at that point.
    pub fn walk(&self, tree: &Tree, source: &str) -> TagResult<Walk> {
        let mut walk = Walk::default();
        self.visit_node(tree.root_node(), source, &mut walk)?;
        Ok(walk)
    }

    fn visit_node(&self, node: Node, source: &str, walk: &mut Walk) -> TagResult<()> {
        if matches!(node.kind(), "type_spec" | "type_alias") {
            self.visit_type(node, source, walk)?;
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit_node(child, source, walk)?;
        }
        Ok(())
    }

    fn visit_type(&self, node: Node, source: &str, walk: &mut Walk) -> TagResult<()> {
        let (Some(name_node), Some(type_node)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("type"),
        ) else {
            return Ok(());
        };
        if type_node.kind() != "struct_type" {
            return Ok(());
        }

        let name = node_text(name_node, source);
        if !self.should_generate(name) {
            tracing::debug!(struct_name = name, "skipping struct outside type filter");
            return Ok(());
        }

        let mut descriptor = StructDescriptor {
            name: name.to_string(),
            fields: Vec::new(),
        };

        if let Some(list) = field_list(type_node) {
            let mut cursor = list.walk();
            for field in list.named_children(&mut cursor) {
                if field.kind() != "field_declaration" {
                    continue;
                }
                if let Some(fd) = self.describe_field(field, source)? {
                    if let Some(edit) = fd.edit() {
                        walk.edits.push(edit);
                    }
                    descriptor.fields.push(fd);
                }
            }
        }

        tracing::debug!(
            struct_name = %descriptor.name,
            fields = descriptor.fields.len(),
            "collected struct"
        );
        walk.structs.push(descriptor);
        Ok(())
    }

    /// Describe a field declaration, or `None` when it is not eligible
    fn describe_field(&self, field: Node, source: &str) -> TagResult<Option<FieldDescriptor>> {
        let mut cursor = field.walk();
        let names: Vec<Node> = field.children_by_field_name("name", &mut cursor).collect();

        // Embedded fields declare no name; `A, B int` declares several.
        let [name_node] = names.as_slice() else {
            return Ok(None);
        };
        let name = node_text(*name_node, source);
        if !is_exported(name) {
            return Ok(None);
        }
        let Some(type_node) = field.child_by_field_name("type") else {
            return Ok(None);
        };

        let converted_name = self.converter.convert(name);
        let tag = self.composer.compose(&converted_name)?;

        let slot = match field.child_by_field_name("tag") {
            Some(tag_node) => TagSlot::Existing {
                range: tag_node.byte_range(),
                text: node_text(tag_node, source).to_string(),
            },
            None => TagSlot::Missing {
                insert_at: type_node.end_byte(),
            },
        };

        Ok(Some(FieldDescriptor {
            name: name.to_string(),
            converted_name,
            type_text: node_text(type_node, source).to_string(),
            slot,
            tag,
        }))
    }

    fn should_generate(&self, name: &str) -> bool {
        self.types.is_empty() || self.types.contains(name)
    }
}

/// The `field_declaration_list` body of a `struct_type` node
pub(crate) fn field_list(struct_type: Node) -> Option<Node> {
    let mut cursor = struct_type.walk();
    struct_type
        .named_children(&mut cursor)
        .find(|child| child.kind() == "field_declaration_list")
}

/// Go exports identifiers that start with an upper-case letter
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
