use crate::outcome::OutcomeLog;
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

/// Deletes a file or directory tree, treating a missing path as success.
///
/// Every error is recorded in `log` rather than returned.
pub fn safe_remove<P: AsRef<Path>>(path: P, description: &str, log: &mut OutcomeLog) -> bool {
    let path = path.as_ref();
    match remove_path(path) {
        Ok(true) => {
            log.record(
                format!("Removed {}: {}", description, path.display()),
                true,
            );
            true
        }
        Ok(false) => {
            log.record(
                format!("Not found {}: {}", description, path.display()),
                true,
            );
            true
        }
        Err(e) => {
            log.record(
                format!("Failed to remove {}: {} - {}", description, path.display(), e),
                false,
            );
            false
        }
    }
}

// Returns false if there was nothing to remove
fn remove_path(path: &Path) -> io::Result<bool> {
    // symlink_metadata so that a link to a directory is unlinked, not followed
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let file_type = metadata.file_type();
    if file_type.is_dir() {
        log::debug!("Recursively deleting directory {}", path.display());
        fs::remove_dir_all(path)?;
    } else if file_type.is_symlink() {
        log::debug!("Deleting link {}", path.display());
        // Directory links on Windows can only be removed with remove_dir
        fs::remove_file(path).or_else(|_| fs::remove_dir(path))?;
    } else {
        log::debug!("Deleting file {}", path.display());
        fs::remove_file(path)?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_success_and_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing-here");
        let mut log = OutcomeLog::new();

        assert!(safe_remove(&missing, "test data", &mut log));
        assert!(!missing.exists());
        assert!(log.errors().is_empty());
        assert!(log.removed()[0].starts_with("Not found test data"));
    }

    #[test]
    fn removes_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("state.json");
        fs::write(&file, "{}").unwrap();
        let mut log = OutcomeLog::new();

        assert!(safe_remove(&file, "test data", &mut log));
        assert!(!file.exists());
        assert!(log.removed()[0].starts_with("Removed test data"));
    }

    #[test]
    fn removes_directory_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".augment");
        fs::create_dir_all(root.join("cache/nested/deeper")).unwrap();
        fs::write(root.join("token"), "secret").unwrap();
        fs::write(root.join("cache/nested/blob.bin"), [0u8; 16]).unwrap();
        let mut log = OutcomeLog::new();

        assert!(safe_remove(&root, "test data", &mut log));
        assert!(!root.exists());
        assert!(dir.path().exists());
        assert_eq!(log.removed().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_unlinked_without_touching_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let mut log = OutcomeLog::new();

        assert!(safe_remove(&link, "test data", &mut log));
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("keep.txt").is_file());
    }
}
