//! TypeScript class generation from collected structs.
//!
//! # Type Mappings
//!
//! | Go | TypeScript |
//! |----|------------|
//! | `int`, `int8`..`int64`, `uint`..`uint64`, `uintptr`, `byte`, `rune`, `float32`, `float64` | `number` |
//! | `time.Time` | `Date` |
//! | `bool` | `boolean` |
//! | `string` | `string` |
//! | anything else | `any` |
//!
//! The lookup is on the literal type text, so `*int` or `[]string` are `any`.

use crate::walker::StructDescriptor;
use std::fmt;
use std::path::{Path, PathBuf};

/// A TypeScript property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Number,
    Date,
    Boolean,
    String,
    Any,
}

impl SchemaType {
    /// Map the literal text of a Go type expression.
    pub fn from_go(type_text: &str) -> Self {
        match type_text.trim() {
            "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16"
            | "uint32" | "uint64" | "uintptr" | "byte" | "rune" | "float32" | "float64" => {
                Self::Number
            }
            "time.Time" => Self::Date,
            "bool" => Self::Boolean,
            "string" => Self::String,
            _ => Self::Any,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Date => "Date",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render one `export class` block per struct, in encounter order.
pub fn render_typescript(structs: &[StructDescriptor]) -> String {
    let mut code = String::new();

    for descriptor in structs {
        code.push_str(&format!("\nexport class {} {{\n", descriptor.name));
        for field in &descriptor.fields {
            code.push_str(&format!(
                "\t{}:{};\n",
                field.converted_name,
                SchemaType::from_go(&field.type_text)
            ));
        }
        code.push_str("}\n");
    }

    code
}

/// Companion schema path: the source path with `.ts` appended.
pub fn schema_path(source: &Path) -> PathBuf {
    let mut path = source.as_os_str().to_owned();
    path.push(".ts");
    PathBuf::from(path)
}
