//! Field name conversion for generated tags.
//!
//! Go field identifiers are exported `PascalCase` names; tag names default to
//! `lowerCamelCase` unless the caller supplies an explicit mapping.
//!
//! | Identifier | Words | Tag name |
//! |------------|-------|----------|
//! | `ExDivDate` | `Ex`, `Div`, `Date` | `exDivDate` |
//! | `ID` | `ID` | `id` |
//! | `PDFLoader` | `PDF`, `Loader` | `pdfLoader` |
//! | `GL11Version` | `GL`, `11`, `Version` | `gl11Version` |

use std::collections::BTreeMap;

/// Converts field identifiers to tag names, honouring explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct NameConverter {
    mapping: BTreeMap<String, String>,
}

impl NameConverter {
    /// Create a converter with the given identifier → name overrides
    pub fn new(mapping: BTreeMap<String, String>) -> Self {
        Self { mapping }
    }

    /// Tag name for a field identifier.
    ///
    /// Mapped identifiers are returned verbatim; everything else goes through
    /// [`to_lower_camel_case`].
    pub fn convert(&self, identifier: &str) -> String {
        match self.mapping.get(identifier) {
            Some(name) => name.clone(),
            None => to_lower_camel_case(identifier),
        }
    }
}

/// Convert an identifier to lowerCamelCase.
///
/// Only the first word is lowercased; later words keep their casing.
///
/// # Examples
///
/// ```
/// use tagsmith_core::naming::to_lower_camel_case;
///
/// assert_eq!(to_lower_camel_case("ExDivDate"), "exDivDate");
/// assert_eq!(to_lower_camel_case("ID"), "id");
/// assert_eq!(to_lower_camel_case("Name"), "name");
/// ```
pub fn to_lower_camel_case(identifier: &str) -> String {
    let mut words = split_words(identifier).into_iter();
    let Some(first) = words.next() else {
        return String::new();
    };

    let mut result = first.to_lowercase();
    for word in words {
        result.push_str(&word);
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Other
        }
    }
}

/// Split an identifier into words at character-class boundaries.
///
/// Runs of lower-case letters, upper-case letters, digits and other
/// characters form separate words, except that the last letter of an
/// upper-case run starts the following lower-case word.
///
/// # Examples
///
/// ```
/// use tagsmith_core::naming::split_words;
///
/// assert_eq!(split_words("ExDivDate"), vec!["Ex", "Div", "Date"]);
/// assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
/// assert_eq!(split_words("foo_bar"), vec!["foo", "_", "bar"]);
/// ```
pub fn split_words(identifier: &str) -> Vec<String> {
    let mut runs: Vec<Vec<char>> = Vec::new();
    let mut last_class = None;

    for c in identifier.chars() {
        let class = CharClass::of(c);
        match runs.last_mut() {
            Some(run) if last_class == Some(class) => run.push(c),
            _ => runs.push(vec![c]),
        }
        last_class = Some(class);
    }

    for i in 0..runs.len().saturating_sub(1) {
        let upper_then_lower = matches!(
            (runs[i].first(), runs[i + 1].first()),
            (Some(a), Some(b)) if a.is_uppercase() && b.is_lowercase()
        );
        if upper_then_lower && let Some(c) = runs[i].pop() {
            runs[i + 1].insert(0, c);
        }
    }

    runs.into_iter()
        .filter(|run| !run.is_empty())
        .map(|run| run.into_iter().collect())
        .collect()
}
