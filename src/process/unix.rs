use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::io;
use std::process::{Command, Stdio};

/// Sends SIGTERM to every process whose command line contains `name`.
///
/// `pkill -f` is not used because the cleaner's own command line, or that of the shell or sudo
/// which launched it, may contain the name too.
pub(super) fn terminate(name: &str) -> io::Result<bool> {
    log::debug!("Running pgrep -f {}", name);
    let output = Command::new("pgrep")
        .arg("-f")
        .arg(name)
        .stderr(Stdio::null())
        .output()?;
    if !output.status.success() {
        // pgrep exits with 1 when nothing matched
        return Ok(false);
    }
    let pids = parse_pids(
        &String::from_utf8_lossy(&output.stdout),
        &[std::process::id(), std::os::unix::process::parent_id()],
    );
    signal_all(&pids, |pid| {
        kill(Pid::from_raw(pid), Signal::SIGTERM)?;
        log::debug!("Sent SIGTERM to {} ({})", pid, name);
        Ok(())
    })
}

/// Signals every pid even when some fail.
///
/// Returns true if any process was signalled, otherwise the first error other than ESRCH.
fn signal_all<F>(pids: &[i32], mut send: F) -> io::Result<bool>
where
    F: FnMut(i32) -> nix::Result<()>,
{
    let mut killed = false;
    let mut first_error = None;
    for &pid in pids {
        match send(pid) {
            Ok(()) => killed = true,
            // Exited between listing and signalling
            Err(Errno::ESRCH) => {}
            Err(e) => {
                log::warn!("Unable to signal process {}: {}", pid, e);
                first_error.get_or_insert(e);
            }
        }
    }
    match first_error {
        Some(e) if !killed => Err(io::Error::from(e)),
        _ => Ok(killed),
    }
}

fn parse_pids(stdout: &str, exclude: &[u32]) -> Vec<i32> {
    stdout
        .lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .filter(|pid| !exclude.contains(pid))
        .filter_map(|pid| i32::try_from(pid).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_excluded_and_junk() {
        let stdout = "101\n  202\nnot-a-pid\n\n303\n";
        assert_eq!(parse_pids(stdout, &[202]), vec![101, 303]);
    }

    #[test]
    fn parse_excludes_own_process() {
        let own = std::process::id();
        let stdout = format!("{}\n", own);
        assert!(parse_pids(&stdout, &[own]).is_empty());
    }

    #[test]
    fn permission_error_does_not_stop_the_rest() {
        let mut sent = vec![];
        let result = signal_all(&[10, 20, 30], |pid| {
            sent.push(pid);
            if pid == 10 {
                Err(Errno::EPERM)
            } else {
                Ok(())
            }
        });
        assert!(result.unwrap());
        assert_eq!(sent, vec![10, 20, 30]);
    }

    #[test]
    fn error_reported_when_nothing_signalled() {
        let err = signal_all(&[10, 20], |pid| match pid {
            10 => Err(Errno::ESRCH),
            _ => Err(Errno::EPERM),
        })
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn vanished_processes_are_not_errors() {
        assert!(!signal_all(&[10, 20], |_| Err(Errno::ESRCH)).unwrap());
        assert!(!signal_all(&[], |_| Ok(())).unwrap());
    }
}
