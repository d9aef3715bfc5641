//! Tests for configuration loading.

use scrollback::ScrollbackConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = config_file(
        r#"
[fetch]
page_size = 25
"#,
    );

    let config = ScrollbackConfig::from_file(file.path()).expect("config loads");

    assert_eq!(*config.fetch.page_size(), 25);
    assert!(!*config.fetch.include_threads());
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
fn test_full_file_overrides_everything() {
    let file = config_file(
        r#"
[fetch]
page_size = 10
include_threads = true

[logging]
level = "scrollback_fetch=debug"
json = true
"#,
    );

    let config = ScrollbackConfig::from_file(file.path()).expect("config loads");

    assert_eq!(*config.fetch.page_size(), 10);
    assert!(*config.fetch.include_threads());
    assert_eq!(config.logging.level, "scrollback_fetch=debug");
    assert!(config.logging.json);
}

#[test]
fn test_zero_page_size_is_rejected() {
    let file = config_file("[fetch]\npage_size = 0\n");

    let err = ScrollbackConfig::from_file(file.path()).expect_err("page size 0");
    assert!(err.to_string().contains("page_size"));
}

#[test]
fn test_oversized_page_is_rejected() {
    let file = config_file("[fetch]\npage_size = 101\n");

    assert!(ScrollbackConfig::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");

    let err = ScrollbackConfig::from_file(&missing).expect_err("no such file");
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = config_file("[fetch\npage_size = ");

    assert!(ScrollbackConfig::from_file(file.path()).is_err());
}
