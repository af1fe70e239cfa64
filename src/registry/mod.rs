//! Windows registry cleanup.
//!
//! The key table is available everywhere, but registry access only exists in Windows builds.
//! On any other platform [remove_registry_entries] does nothing.

#[cfg(windows)]
mod windows;

use crate::outcome::OutcomeLog;
use crate::platform::Platform;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hive {
    CurrentUser,
    LocalMachine,
}

impl Display for Hive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Hive::CurrentUser => "HKEY_CURRENT_USER",
            Hive::LocalMachine => "HKEY_LOCAL_MACHINE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryAction {
    /// Delete the key and everything below it
    DeleteKey,
    /// Delete only the subkeys whose name contains the marker
    DeleteMatchingSubkeys,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryTarget {
    pub hive: Hive,
    pub path: &'static str,
    pub action: RegistryAction,
}

pub fn registry_targets() -> Vec<RegistryTarget> {
    vec![
        RegistryTarget {
            hive: Hive::CurrentUser,
            path: r"Software\Augment",
            action: RegistryAction::DeleteKey,
        },
        RegistryTarget {
            hive: Hive::LocalMachine,
            path: r"Software\Augment",
            action: RegistryAction::DeleteKey,
        },
        RegistryTarget {
            hive: Hive::CurrentUser,
            path: r"Software\Microsoft\Windows\CurrentVersion\Uninstall",
            action: RegistryAction::DeleteMatchingSubkeys,
        },
    ]
}

pub fn remove_registry_entries(platform: Platform, marker: &str, log: &mut OutcomeLog) {
    if platform != Platform::Windows {
        log::debug!("Skipping registry cleanup on {}", platform);
        return;
    }
    println!("\n🗂️ Cleaning Windows Registry...");
    clean_all(marker, log);
}

#[cfg(windows)]
fn clean_all(marker: &str, log: &mut OutcomeLog) {
    for target in registry_targets() {
        windows::clean(&target, marker, log);
    }
}

#[cfg(not(windows))]
fn clean_all(_marker: &str, _log: &mut OutcomeLog) {
    log::warn!(
        "Registry access is only available in Windows builds, skipping {} keys",
        registry_targets().len()
    );
}
