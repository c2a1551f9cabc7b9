//! Test utilities for askbot crate

use std::fs;
use tempfile::NamedTempFile;

/// Creates a temporary config file pointing at a test answer service.
///
/// # Panics
/// Panics if file writing fails.
pub fn create_temp_config_file(server_uri: &str) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let config_content = format!(
        r#"
service:
  endpoint: "{server_uri}"
chat:
  placeholder: "Thinking..."
"#,
    );
    fs::write(file.path(), config_content).unwrap();
    file
}
