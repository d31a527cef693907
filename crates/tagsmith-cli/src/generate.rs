//! Generate command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tagsmith_core::{FileSink, Options, ReportSink};

/// Arguments of `tagsmith generate`.
///
/// Flags override values from the config file. Lists and maps given on the
/// command line replace the file's; boolean flags can only switch options on.
#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Go file or package directory (default: current directory)
    pub target: Option<PathBuf>,

    /// Tag keys to emit, in order (e.g. json,yaml)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Template for the tag contents; the field name is available as `name`
    #[arg(long)]
    pub template: Option<String>,

    /// Explicit tag names as FIELD=NAME pairs (e.g. ID=_id)
    #[arg(short, long = "map", value_delimiter = ',', value_parser = parse_mapping)]
    pub mapping: Vec<(String, String)>,

    /// Only generate tags for these struct types
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,

    /// Print the output instead of writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Also emit a TypeScript class file next to each source
    #[arg(long)]
    pub typescript: bool,

    /// Path to a tagsmith.toml config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Merge the config file, if any, with the command line flags
    pub fn into_options(self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => Options::default(),
        };

        if let Some(target) = self.target {
            options.target = target;
        }
        if !self.tags.is_empty() {
            options.tags = self.tags;
        }
        if self.template.is_some() {
            options.template = self.template;
        }
        if !self.mapping.is_empty() {
            options.mapping = self.mapping.into_iter().collect();
        }
        if !self.types.is_empty() {
            options.types = self.types.into_iter().collect();
        }
        options.dry_run |= self.dry_run;
        options.typescript |= self.typescript;

        Ok(options)
    }
}

/// Parse a `FIELD=NAME` mapping pair
fn parse_mapping(value: &str) -> Result<(String, String), String> {
    let (field, name) = value
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=NAME, got `{value}`"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{value}`"));
    }
    Ok((field.to_string(), name.trim().to_string()))
}

/// Generate command implementation
pub fn run(args: GenerateArgs) -> Result<()> {
    let options = args.into_options()?;
    let target = options.target_or_cwd();
    tracing::debug!(?options, "resolved options");

    let summary = if options.dry_run {
        let mut sink = ReportSink::new(std::io::stdout().lock());
        tagsmith_core::run(&options, &mut sink)
    } else {
        tagsmith_core::run(&options, &mut FileSink)
    }
    .with_context(|| format!("Failed to generate tags for {}", target.display()))?;

    if !options.dry_run {
        eprintln!(
            "✓ {} file(s) processed, {} updated",
            summary.files, summary.modified
        );
        if options.typescript {
            eprintln!("✓ {} TypeScript file(s) written", summary.schemas);
        }
    }

    Ok(())
}
