//! Tag text composition.
//!
//! A composed tag is the full Go raw string literal, backticks included, ready
//! to be written into the field's tag slot:
//!
//! ```text
//! tags = ["json", "yaml"], name = "exDivDate"
//!     → `json:"exDivDate" yaml:"exDivDate"`
//! template = db:"{{ name }}", name = "id"
//!     → `db:"id"`
//! ```

use crate::config::Options;
use crate::error::{TagError, TagResult};
use minijinja::{Environment, UndefinedBehavior, context};

/// Delimiter wrapped around every composed tag
pub const TAG_DELIMITER: char = '`';

/// Builds tag text for a converted field name.
#[derive(Debug)]
pub enum TagComposer {
    /// `key:"name"` pairs, one per tag key, in order
    Keys(Vec<String>),

    /// A template rendered with the converted name bound to `name`
    Template(TemplateComposer),
}

impl TagComposer {
    /// Build the composer selected by the options.
    ///
    /// Tag keys win over a template when both are present.
    pub fn from_options(options: &Options) -> TagResult<Self> {
        if !options.tags.is_empty() {
            return Ok(TagComposer::Keys(options.tags.clone()));
        }

        match &options.template {
            Some(source) => Ok(TagComposer::Template(TemplateComposer::new(source)?)),
            None => Err(TagError::Config(
                "either tags or a template must be given".to_string(),
            )),
        }
    }

    /// Compose the delimited tag text for a converted field name
    pub fn compose(&self, name: &str) -> TagResult<String> {
        let body = match self {
            TagComposer::Keys(keys) => keys
                .iter()
                .map(|key| format!("{key}:{}", quote(name)))
                .collect::<Vec<_>>()
                .join(" "),
            TagComposer::Template(template) => template.render(name)?,
        };

        Ok(format!("{TAG_DELIMITER}{body}{TAG_DELIMITER}"))
    }
}

/// Name of the tag template inside the composer's environment
const TAG_TEMPLATE: &str = "tag";

/// Renders tag bodies from a minijinja template.
pub struct TemplateComposer {
    env: Environment<'static>,
    source: String,
}

impl TemplateComposer {
    /// Compile a template source once.
    ///
    /// Undefined variables are errors at render time, so a typo such as
    /// `{{ nmae }}` fails the run instead of producing empty tags.
    pub fn new(source: &str) -> TagResult<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template_owned(TAG_TEMPLATE, source.to_string())
            .map_err(|e| TagError::Config(format!("invalid template: {e}")))?;

        Ok(Self {
            env,
            source: source.to_string(),
        })
    }

    /// Render the template for one field
    pub fn render(&self, name: &str) -> TagResult<String> {
        let template = self.env.get_template(TAG_TEMPLATE)?;
        Ok(template.render(context! { name => name })?)
    }
}

impl std::fmt::Debug for TemplateComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateComposer")
            .field("source", &self.source)
            .finish()
    }
}

/// Quote a tag value the way Go's `strconv.Quote` does.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{b}' => quoted.push_str("\\v"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
