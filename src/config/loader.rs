//! Configuration and mapping loaders with TOML parsing and environment
//! variable substitution
//!
//! Both loaders fail with a configuration error when the file does not
//! exist, so a misconfigured cron job dies before any network activity.

use super::schema::{BibsyncConfig, FieldMapping};
use crate::domain::errors::BibsyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BibsyncConfig
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File does not exist or cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use bibsync::config::load_config;
///
/// let config = load_config("bibsync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BibsyncConfig> {
    let path = path.as_ref();

    let contents = read_required_file(path, "Configuration")?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let config: BibsyncConfig = toml::from_str(&contents)
        .map_err(|e| BibsyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    // Validate configuration
    config.validate().map_err(|e| {
        BibsyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Loads the field-mapping table from a TOML file
///
/// The mapping file is a flat table of `target-field = "source-field"`
/// pairs. Non-string values are rejected, and an empty table is a
/// configuration error: with no mapped fields every upsert would carry only
/// the fixed configuration fields.
///
/// # Examples
///
/// ```no_run
/// use bibsync::config::load_mapping;
///
/// let mapping = load_mapping("mapping.toml").expect("Failed to load mapping");
/// ```
pub fn load_mapping(path: impl AsRef<Path>) -> Result<FieldMapping> {
    let path = path.as_ref();

    let contents = read_required_file(path, "Mapping")?;

    let table: toml::Table = toml::from_str(&contents)
        .map_err(|e| BibsyncError::Configuration(format!("Failed to parse mapping TOML: {e}")))?;

    let mut pairs = Vec::with_capacity(table.len());
    for (target, value) in table {
        match value {
            toml::Value::String(source) => pairs.push((target, source)),
            other => {
                return Err(BibsyncError::Configuration(format!(
                    "Mapping value for '{}' must be a string, got {}",
                    target,
                    other.type_str()
                )));
            }
        }
    }

    let mapping: FieldMapping = pairs.into_iter().collect();
    if mapping.is_empty() {
        return Err(BibsyncError::Configuration(format!(
            "Mapping file {} contains no field mappings",
            path.display()
        )));
    }

    Ok(mapping)
}

fn read_required_file(path: &Path, what: &str) -> Result<String> {
    if !path.exists() {
        return Err(BibsyncError::Configuration(format!(
            "{} file not found: {}",
            what,
            path.display()
        )));
    }

    fs::read_to_string(path).map_err(|e| {
        BibsyncError::Configuration(format!(
            "Failed to read {} file {}: {}",
            what.to_lowercase(),
            path.display(),
            e
        ))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("substitution pattern is valid");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BibsyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("BIBSYNC_TEST_VAR", "test_value");
        let input = "password = \"${BIBSYNC_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("BIBSYNC_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("BIBSYNC_MISSING_VAR");
        let input = "password = \"${BIBSYNC_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("BIBSYNC_COMMENTED_VAR");
        let input = "# password = \"${BIBSYNC_COMMENTED_VAR}\"\nuserid = \"x\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${BIBSYNC_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(BibsyncError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
bbuser = "feeduser"
bbpass = "feedpass"
userid = "apiuser"
password = "apipass"
datadir = "/var/lib/bibsync"
endpoint = "https://ils.example.org/api"
matchfield = "cardnumber"
branchcode = "MAIN"
categorycode = "B"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.bbuser, "feeduser");
        assert_eq!(config.endpoint, "https://ils.example.org/api");
        assert_eq!(config.loglevel, "info");
        assert!(config.logdir.is_none());
        assert!(config.bburl.starts_with("https://"));
    }

    #[test]
    fn test_load_config_invalid_values() {
        let toml_content = r#"
bbuser = "feeduser"
bbpass = "feedpass"
userid = "apiuser"
password = "apipass"
datadir = "/var/lib/bibsync"
endpoint = "not-a-url"
matchfield = "cardnumber"
branchcode = "MAIN"
categorycode = "B"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn test_load_mapping_missing_file() {
        let result = load_mapping("nonexistent-mapping.toml");
        assert!(matches!(result, Err(BibsyncError::Configuration(_))));
    }

    #[test]
    fn test_load_mapping_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"surname = \"inst\"\naddress1 = \"padr\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let mapping = load_mapping(temp_file.path()).unwrap();
        assert_eq!(mapping.len(), 2);
        let pairs: Vec<(&str, &str)> = mapping.iter().collect();
        assert_eq!(pairs, vec![("address1", "padr"), ("surname", "inst")]);
    }

    #[test]
    fn test_load_mapping_rejects_non_string_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"surname = 42\n").unwrap();
        temp_file.flush().unwrap();

        let err = load_mapping(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_load_mapping_rejects_empty_table() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"# no mappings here\n").unwrap();
        temp_file.flush().unwrap();

        let err = load_mapping(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("no field mappings"));
    }
}
