#![allow(non_snake_case)]

use super::*;
use crate::sink::ReportSink;
use std::collections::BTreeMap;
use tempfile::TempDir;

const BAR: &str = "package foo

type bar struct {
	ID      string
	Name    string
	private string
}
";

fn tag_options(tags: &[&str]) -> Options {
    Options {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Options::default()
    }
}

fn generate(options: &Options, source: &str) -> FileOutput {
    Generator::new(options)
        .unwrap()
        .process_source(source)
        .unwrap()
}

#[test]
fn process_source___exported_fields___tagged_and_aligned() {
    let output = generate(&tag_options(&["json", "yaml"]), BAR);

    assert_eq!(
        output.source.as_deref(),
        Some(
            "package foo

type bar struct {
	ID      string `json:\"id\" yaml:\"id\"`
	Name    string `json:\"name\" yaml:\"name\"`
	private string
}
"
        )
    );
}

#[test]
fn process_source___name_mapping___overrides_conversion() {
    let mut options = tag_options(&["json", "yaml"]);
    options.mapping = BTreeMap::from([
        ("ID".to_string(), "_id".to_string()),
        ("Name".to_string(), "title".to_string()),
    ]);

    let output = generate(&options, BAR);

    assert_eq!(
        output.source.as_deref(),
        Some(
            "package foo

type bar struct {
	ID      string `json:\"_id\" yaml:\"_id\"`
	Name    string `json:\"title\" yaml:\"title\"`
	private string
}
"
        )
    );
}

#[test]
fn process_source___type_filter___leaves_other_structs() {
    let mut options = tag_options(&["json"]);
    options.types = BTreeSet::from(["bar".to_string()]);
    let source = "package foo

type bar struct {
	ID string
}

type not struct {
	ID string
}
";

    let output = generate(&options, source);

    assert_eq!(
        output.source.as_deref(),
        Some(
            "package foo

type bar struct {
	ID string `json:\"id\"`
}

type not struct {
	ID string
}
"
        )
    );
}

#[test]
fn process_source___template___renders_tag_body() {
    let options = Options {
        template: Some(r#"foo:"{{ name }}" bar:"{{ name }}""#.to_string()),
        ..Options::default()
    };
    let source = "package foo

type bar struct {
	ID string
}
";

    let output = generate(&options, source);

    assert_eq!(
        output.source.as_deref(),
        Some(
            "package foo

type bar struct {
	ID string `foo:\"id\" bar:\"id\"`
}
"
        )
    );
}

#[test]
fn process_source___embedded_struct___untouched_and_names_split() {
    let source = "package model

import (
	\"dividend/config\"
	\"fmt\"
	\"log\"
	\"time\"

	\"github.com/jinzhu/gorm\"
	_ \"github.com/lib/pq\" //postgres driver
)

//RawRecord  from text file
type RawRecord struct {
	gorm.Model
	Rating         float64
	ExDivDate      time.Time
}";

    let output = generate(&tag_options(&["json", "yaml"]), source);

    assert_eq!(
        output.source.as_deref(),
        Some(
            "package model

import (
	\"dividend/config\"
	\"fmt\"
	\"log\"
	\"time\"

	\"github.com/jinzhu/gorm\"
	_ \"github.com/lib/pq\" //postgres driver
)

//RawRecord  from text file
type RawRecord struct {
	gorm.Model
	Rating    float64   `json:\"rating\" yaml:\"rating\"`
	ExDivDate time.Time `json:\"exDivDate\" yaml:\"exDivDate\"`
}
"
        )
    );
}

#[test]
fn process_source___second_run___reports_no_change() {
    let options = tag_options(&["json", "yaml"]);
    let first = generate(&options, BAR);

    let second = generate(&options, first.source.as_deref().unwrap());

    assert!(!second.modified());
    let tags = |output: &FileOutput| -> Vec<String> {
        output.structs[0].fields.iter().map(|f| f.tag.clone()).collect()
    };
    assert_eq!(tags(&second), tags(&first));
}

#[test]
fn process_source___no_structs___nothing_to_write() {
    let mut options = tag_options(&["json"]);
    options.typescript = true;

    let output = generate(&options, "package foo\n\nfunc main() {}\n");

    assert_eq!(output, FileOutput::default());
}

#[test]
fn process_source___typescript___rendered_even_without_changes() {
    let mut options = tag_options(&["json"]);
    options.typescript = true;
    let source = "package foo

type bar struct {
	ID    string  `json:\"id\"`
	Score float64 `json:\"score\"`
}
";

    let output = generate(&options, source);

    assert!(!output.modified());
    assert_eq!(
        output.schema.as_deref(),
        Some("\nexport class bar {\n\tid:string;\n\tscore:number;\n}\n")
    );
}

#[test]
fn process_source___no_trailing_newline___tagged() {
    let output = generate(
        &tag_options(&["json"]),
        "package foo\n\ntype bar struct {\n\tID string\n}",
    );

    assert_eq!(
        output.source.as_deref(),
        Some("package foo\n\ntype bar struct {\n\tID string `json:\"id\"`\n}\n")
    );
}

#[test]
fn process_source___invalid_source___is_parse_error() {
    let result = Generator::new(&tag_options(&["json"]))
        .unwrap()
        .process_source("package foo\n\ntype bar struct {\n");

    assert!(matches!(result, Err(TagError::Parse { .. })));
}

#[test]
fn generator_new___invalid_options___is_config_error() {
    let result = Generator::new(&Options::default());

    assert!(matches!(result, Err(TagError::Config(_))));
}

#[test]
fn process_file___parse_error___names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.go");
    fs::write(&path, "package foo\n\nfunc (\n").unwrap();
    let generator = Generator::new(&tag_options(&["json"])).unwrap();
    let mut sink = ReportSink::new(Vec::new());

    let result = generator.process_file(&path, &mut sink);

    match result {
        Err(TagError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn process_file___unchanged_file___not_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("done.go");
    fs::write(&path, "package foo\n\ntype bar struct {\n\tID string `json:\"id\"`\n}\n").unwrap();
    let generator = Generator::new(&tag_options(&["json"])).unwrap();
    let mut sink = ReportSink::new(Vec::new());

    let output = generator.process_file(&path, &mut sink).unwrap();

    assert!(!output.modified());
    assert!(sink.into_inner().is_empty());
}
