use super::*;
use std::path::PathBuf;

#[test]
fn test_parse_minimal_config() {
    let config = Config::parse("{}").unwrap();
    assert!(!config.is_memory_db());
    assert_eq!(config.database.path, DEFAULT_DB_PATH);
    assert_eq!(config.version_table, "__db_version__");
    assert_eq!(config.script_encoding().unwrap(), ScriptEncoding::utf8());
    assert!(!config.drop_db_first);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
database:
  path: "./warehouse.duckdb"
version_table: meta.schema_history
script_encoding: latin1
drop_db_first: true
"#;
    let config = Config::parse(yaml).unwrap();
    assert_eq!(config.version_table, "meta.schema_history");
    assert_eq!(config.script_encoding().unwrap().name(), "windows-1252");
    assert!(config.drop_db_first);

    let root = PathBuf::from("/tmp/project");
    assert_eq!(
        config.database_path_absolute(&root),
        Some(root.join("./warehouse.duckdb"))
    );
}

#[test]
fn test_memory_db_has_no_path() {
    let config = Config::parse("database:\n  path: \":memory:\"").unwrap();
    assert!(config.is_memory_db());
    assert_eq!(config.database_path_absolute(Path::new("/tmp")), None);
}

#[test]
fn test_default_db_is_file_in_project_dir() {
    let config = Config::default();
    assert_eq!(
        config.database_path_absolute(Path::new("/tmp/project")),
        Some(PathBuf::from("/tmp/project/sdm.duckdb"))
    );
}

#[test]
fn test_unknown_field_rejected() {
    let result = Config::parse("database_host: localhost");
    assert!(matches!(result, Err(CoreError::YamlParse(_))));
}

#[test]
fn test_invalid_table_name_rejected() {
    let result = Config::parse("version_table: \"x; DROP TABLE y\"");
    assert!(result.is_err());
}

#[test]
fn test_unknown_encoding_rejected() {
    let result = Config::parse("script_encoding: ebcdic-klingon");
    assert!(matches!(result, Err(CoreError::UnknownEncoding { .. })));
}

#[test]
fn test_empty_database_path_rejected() {
    let result = Config::parse("database:\n  path: \"\"");
    assert!(matches!(result, Err(CoreError::ConfigInvalid { .. })));
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sdm.yaml"),
        "version_table: history\nscript_encoding: utf8\n",
    )
    .unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.version_table, "history");
}

#[test]
fn test_load_from_dir_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load_from_dir(dir.path());
    assert!(matches!(result, Err(CoreError::ConfigNotFound { path }) if path.ends_with("sdm.yml")));
}
