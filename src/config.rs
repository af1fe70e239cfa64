use crate::common::{contains_marker, APP_DIRECTORY_NAME, MARKER};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use validator::{Validate, ValidationError};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CleanerConfig {
    /// Process name fragments to terminate before removing files
    #[validate(custom = "validate_process_names")]
    pub processes: Vec<String>,
    /// Wildcard patterns matched against entry names in editor extension directories
    #[validate(custom = "validate_extension_patterns")]
    pub extension_patterns: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        CleanerConfig {
            processes: vec!["augment".into(), "augmentcode".into(), "code".into()],
            extension_patterns: vec!["augment*".into(), "*augment*".into(), "augmentcode*".into()],
        }
    }
}

fn validate_process_names(names: &Vec<String>) -> Result<(), ValidationError> {
    if names.iter().any(|n| n.trim().is_empty()) {
        let mut e = ValidationError::new("empty_process_name");
        e.message = Some(Cow::from("process names must not be empty"));
        return Err(e);
    }
    Ok(())
}

/// Fewest non wildcard characters an extension pattern may contain
pub const MIN_PATTERN_LITERALS: usize = 4;

fn pattern_literals(pattern: &str) -> usize {
    pattern.chars().filter(|c| *c != '*' && *c != '?').count()
}

fn validate_extension_patterns(patterns: &Vec<String>) -> Result<(), ValidationError> {
    if patterns
        .iter()
        .any(|p| pattern_literals(p) < MIN_PATTERN_LITERALS)
    {
        let mut e = ValidationError::new("broad_extension_pattern");
        e.message = Some(Cow::from(format!(
            "extension patterns need at least {} non wildcard characters",
            MIN_PATTERN_LITERALS
        )));
        return Err(e);
    }
    Ok(())
}

impl CleanerConfig {
    /// Default location of the optional config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIRECTORY_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the config from `path`, or from [CleanerConfig::default_path] if that exists.
    ///
    /// Falls back to the built in defaults when no file is given or found.
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(p) => p,
                None => {
                    log::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        let config: CleanerConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Unable to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Process names which do not identify the product and may match unrelated programs
    pub fn broad_processes(&self) -> impl Iterator<Item = &str> {
        self.processes
            .iter()
            .map(String::as_str)
            .filter(|p| !contains_marker(p, MARKER))
    }
}
