//! Strips product keys out of editor `settings.json` files

use crate::common::{contains_marker, PRODUCT_NAME};
use crate::outcome::OutcomeLog;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to read file: {0}")]
    Read(#[source] std::io::Error),
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("unable to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("top level value is not a JSON object")]
    NotAnObject,
    #[error("unable to write file: {0}")]
    Write(#[source] std::io::Error),
}

/// Removes every top level key containing `marker` from the JSON file at `path`.
///
/// The file is only rewritten when at least one key was removed. Missing files are skipped.
pub fn edit_json_settings<P: AsRef<Path>>(path: P, marker: &str, log: &mut OutcomeLog) {
    let path = path.as_ref();
    if !path.is_file() {
        log::debug!("No settings file at {}", path.display());
        return;
    }
    match strip_marker_keys(path, marker) {
        Ok(removed) if removed.is_empty() => log.record(
            format!("No {} settings found in {}", PRODUCT_NAME, path.display()),
            true,
        ),
        Ok(removed) => {
            log::debug!("Removed keys {:?} from {}", removed, path.display());
            log.record(
                format!("Cleaned {} settings from {}", PRODUCT_NAME, path.display()),
                true,
            )
        }
        Err(e) => log.record(
            format!("Failed to clean settings in {}: {}", path.display(), e),
            false,
        ),
    }
}

// Returns the keys that were removed
fn strip_marker_keys(path: &Path, marker: &str) -> Result<Vec<String>, SettingsError> {
    let contents = fs::read_to_string(path).map_err(SettingsError::Read)?;
    let value = serde_json::from_str::<Value>(&contents).map_err(SettingsError::Parse)?;
    let settings = match value {
        Value::Object(map) => map,
        _ => return Err(SettingsError::NotAnObject),
    };
    let (settings, removed) = remove_matching_keys(settings, marker);
    if !removed.is_empty() {
        let mut pretty = serde_json::to_string_pretty(&Value::Object(settings))
            .map_err(SettingsError::Serialize)?;
        pretty.push('\n');
        fs::write(path, pretty).map_err(SettingsError::Write)?;
    }
    Ok(removed)
}

// Remaining keys keep their original order
fn remove_matching_keys(
    settings: Map<String, Value>,
    marker: &str,
) -> (Map<String, Value>, Vec<String>) {
    let mut removed = vec![];
    let kept = settings
        .into_iter()
        .filter(|(k, _)| {
            if contains_marker(k, marker) {
                removed.push(k.clone());
                false
            } else {
                true
            }
        })
        .collect();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MARKER;

    fn write_settings(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn removes_marker_keys() {
        let (_dir, path) = write_settings(r#"{"augment.enabled": true, "other.setting": 1}"#);
        let mut log = OutcomeLog::new();

        edit_json_settings(&path, MARKER, &mut log);

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"other.setting": 1}));
        assert!(log.errors().is_empty());
        assert!(log.removed()[0].starts_with("Cleaned"));
    }

    #[test]
    fn match_is_case_insensitive_and_keeps_order() {
        let (_dir, path) = write_settings(
            r#"{"z.first": 1, "Augment.chat.userGuidelines": "x", "a.last": 2, "AUGMENT.advanced": {}}"#,
        );
        let mut log = OutcomeLog::new();

        edit_json_settings(&path, MARKER, &mut log);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\n  \"z.first\": 1,\n  \"a.last\": 2\n}\n");
    }

    #[test]
    fn untouched_when_nothing_matches() {
        let original = "{\"editor.fontSize\":14,   \"files.autoSave\": \"off\"}";
        let (_dir, path) = write_settings(original);
        let mut log = OutcomeLog::new();

        edit_json_settings(&path, MARKER, &mut log);

        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert!(log.errors().is_empty());
        assert!(log.removed()[0].starts_with("No Augment Code settings found"));
    }

    #[test]
    fn malformed_file_is_one_failure_and_untouched() {
        let original = "{ \"augment.enabled\": true, // comment\n";
        let (_dir, path) = write_settings(original);
        let mut log = OutcomeLog::new();

        edit_json_settings(&path, MARKER, &mut log);

        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert_eq!(log.errors().len(), 1);
        assert!(log.removed().is_empty());
    }

    #[test]
    fn non_object_is_a_failure() {
        let (_dir, path) = write_settings(r#"["augment.enabled"]"#);
        let mut log = OutcomeLog::new();

        edit_json_settings(&path, MARKER, &mut log);

        assert_eq!(log.errors().len(), 1);
        assert!(log.errors()[0].contains("not a JSON object"));
    }

    #[test]
    fn missing_file_records_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut log = OutcomeLog::new();

        edit_json_settings(&path, MARKER, &mut log);

        assert!(!path.exists());
        assert!(log.removed().is_empty());
        assert!(log.errors().is_empty());
    }
}
