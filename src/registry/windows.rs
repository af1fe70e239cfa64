use crate::common::contains_marker;
use crate::outcome::OutcomeLog;
use crate::registry::{Hive, RegistryAction, RegistryTarget};
use std::io;
use std::io::ErrorKind;
use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_ALL_ACCESS};
use winreg::RegKey;

fn predef(hive: Hive) -> RegKey {
    match hive {
        Hive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
        Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
    }
}

pub(super) fn clean(target: &RegistryTarget, marker: &str, log: &mut OutcomeLog) {
    let root = predef(target.hive);
    let result = match target.action {
        RegistryAction::DeleteKey => delete_key(&root, target, log),
        RegistryAction::DeleteMatchingSubkeys => {
            delete_matching_subkeys(&root, target, marker, log)
        }
    };
    match result {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log.record(format!("Registry key not found: {}", target.path), true)
        }
        Err(e) => log.record(
            format!("Failed to clean registry key {}\\{}: {}", target.hive, target.path, e),
            false,
        ),
    }
}

fn delete_key(root: &RegKey, target: &RegistryTarget, log: &mut OutcomeLog) -> io::Result<()> {
    // Opening first distinguishes a missing key from one we lack access to
    root.open_subkey_with_flags(target.path, KEY_ALL_ACCESS)?;
    log::debug!("Deleting registry tree {}\\{}", target.hive, target.path);
    root.delete_subkey_all(target.path)?;
    log.record(format!("Removed registry key: {}", target.path), true);
    Ok(())
}

fn delete_matching_subkeys(
    root: &RegKey,
    target: &RegistryTarget,
    marker: &str,
    log: &mut OutcomeLog,
) -> io::Result<()> {
    let key = root.open_subkey_with_flags(target.path, KEY_ALL_ACCESS)?;
    // Collected up front, deleting while enumerating shifts the indexes
    let names = key
        .enum_keys()
        .collect::<io::Result<Vec<String>>>()?
        .into_iter()
        .filter(|name| contains_marker(name, marker))
        .collect::<Vec<_>>();
    for name in names {
        match key.delete_subkey_all(&name) {
            Ok(()) => log.record(
                format!("Removed registry key: {}\\{}", target.path, name),
                true,
            ),
            Err(e) => log.record(
                format!(
                    "Failed to remove registry key {}\\{}: {}",
                    target.path, name, e
                ),
                false,
            ),
        }
    }
    Ok(())
}
