//! Config file validation

use anyhow::{Context, Result};
use std::path::PathBuf;
use tagsmith_core::{Generator, Options};

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG: &str = "tagsmith.toml";

/// Summary lines describing validated options
pub fn summarize(options: &Options) -> Vec<String> {
    let mut lines = vec![format!("✓ Target: {}", options.target_or_cwd().display())];

    match &options.template {
        Some(template) if options.uses_template() => {
            lines.push(format!("✓ Template: {template}"));
        }
        _ => lines.push(format!("✓ Tags: {}", options.tags.join(", "))),
    }

    lines.push(format!("✓ Mappings: {}", options.mapping.len()));
    if options.types.is_empty() {
        lines.push("✓ Types: all".to_string());
    } else {
        let types: Vec<&str> = options.types.iter().map(String::as_str).collect();
        lines.push(format!("✓ Types: {}", types.join(", ")));
    }
    lines.push(format!(
        "✓ TypeScript: {}",
        if options.typescript { "yes" } else { "no" }
    ));
    lines
}

/// Check command implementation
pub fn run(config: Option<PathBuf>) -> Result<()> {
    let path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    println!("Checking config: {}", path.display());

    let options = Options::from_file(&path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    // Building a generator also compiles the template
    Generator::new(&options).context("Invalid configuration")?;

    for line in summarize(&options) {
        println!("{line}");
    }
    println!("\nConfiguration is valid!");

    Ok(())
}
