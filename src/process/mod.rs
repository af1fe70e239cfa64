//! Terminating running product processes

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod unix;
        use self::unix as platform;
    } else if #[cfg(windows)] {
        mod windows;
        use self::windows as platform;
    } else {
        compile_error!("unsupported platform");
    }
}

use crate::platform::Platform;
use std::io;

pub trait ProcessControl {
    /// Terminates every process matching `name`.
    ///
    /// Returns `Ok(false)` when nothing was running.
    fn terminate(&self, name: &str) -> io::Result<bool>;
}

/// Terminates processes using the operating system's own tools
pub struct SystemProcessControl;

impl ProcessControl for SystemProcessControl {
    fn terminate(&self, name: &str) -> io::Result<bool> {
        platform::terminate(name)
    }
}

/// How a process name is shown in progress output
pub fn display_name(platform: Platform, name: &str) -> String {
    match platform {
        Platform::Windows => format!("{}.exe", name),
        _ => name.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_names_are_images() {
        assert_eq!(display_name(Platform::Windows, "augment"), "augment.exe");
        assert_eq!(display_name(Platform::Linux, "augment"), "augment");
        assert_eq!(display_name(Platform::MacOs, "code"), "code");
    }
}
