//! Common constants and helper functions used across the cleaner

use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

pub const APP_NAME: &str = "Augment Code Cleaner";

pub const APP_DIRECTORY_NAME: &str = "augment-cleaner";

/// Human readable name of the product being removed
pub const PRODUCT_NAME: &str = "Augment Code";

/// Case-insensitive fragment identifying product related keys, extensions and processes
pub const MARKER: &str = "augment";

/// Whether `name` contains the marker, ignoring case
pub fn contains_marker(name: &str, marker: &str) -> bool {
    name.to_lowercase().contains(&marker.to_lowercase())
}

pub fn install_logger(debug: bool) -> anyhow::Result<()> {
    let filter = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = simplelog::ConfigBuilder::default()
        .set_target_level(LevelFilter::Debug)
        .build();
    TermLogger::init(filter, config, TerminalMode::Stderr, ColorChoice::Auto)?;
    if debug {
        log::warn!("Debug logging enabled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_match_ignores_case() {
        assert!(contains_marker("Augment.vscode-augment-0.1.0", MARKER));
        assert!(contains_marker("AUGMENTCODE", "Augment"));
        assert!(!contains_marker("ms-python.python", MARKER));
    }
}
