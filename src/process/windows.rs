use std::io;
use std::process::{Command, Stdio};

/// Force kills by image name, a non zero exit means no such process
pub(super) fn terminate(name: &str) -> io::Result<bool> {
    let image = format!("{}.exe", name);
    log::debug!("Running taskkill /F /IM {}", image);
    let status = Command::new("taskkill")
        .arg("/F")
        .arg("/IM")
        .arg(&image)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    Ok(status.success())
}
