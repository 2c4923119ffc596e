use std::io::Write;
use std::process::{Command, Output};

use tempfile::{NamedTempFile, TempDir};

/// Config pointing at a port nothing listens on.
fn unreachable_config() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[api]
base_url = "http://127.0.0.1:9/api/v2/list_movies.json"
timeout_secs = 2
"#
    )
    .unwrap();
    file
}

fn yifi(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yifi"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("YIFI_CONFIG")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to run yifi")
}

#[test]
fn test_help_lists_flags() {
    let dir = TempDir::new().unwrap();
    let output = yifi(&dir, &["--help"]);

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--quality", "--categorize", "--multiprocess", "--csv", "--page"] {
        assert!(help.contains(flag), "missing {} in help", flag);
    }
}

#[test]
fn test_invalid_rating_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = yifi(&dir, &["--rating", "12"]);

    assert_eq!(output.status.code(), Some(2));
}

fn reported_failure(output: &Output) -> bool {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    stdout.contains("Fatal error") || stderr.contains("Fatal error")
}

#[test]
fn test_missing_config_file_reported_with_status_zero() {
    let dir = TempDir::new().unwrap();
    let output = yifi(&dir, &["--config", "does-not-exist.toml"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(reported_failure(&output));
}

#[test]
fn test_unreachable_catalog_reported_with_status_zero() {
    let dir = TempDir::new().unwrap();
    let config = unreachable_config();
    let config_path = config.path().to_str().unwrap();

    let output = yifi(&dir, &["--config", config_path, "--csv"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(reported_failure(&output));
    // CSV-only runs never create the output tree
    assert!(!dir.path().join("Rating").exists());
}

#[test]
fn test_output_directory_created_before_count() {
    let dir = TempDir::new().unwrap();
    let config = unreachable_config();
    let config_path = config.path().to_str().unwrap();

    let output = yifi(&dir, &["--config", config_path, "-c", "genre"]);

    assert!(reported_failure(&output));
    assert!(dir.path().join("Genre").is_dir());
}
