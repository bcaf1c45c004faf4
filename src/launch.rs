use std::{
    ffi::OsStr,
    io,
    os::unix::process::CommandExt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0:?} was not found")]
    NotFound(PathBuf),

    #[error("failed to launch {0:?}")]
    Spawn(PathBuf, #[source] io::Error),
}

/// Starts `program` in a new session with no standard streams, and does not wait for it.
///
/// Returns the PID of the launched process. Whether the program later succeeds or fails
/// cannot be observed by the caller.
pub fn spawn_detached<I, S>(program: &Path, args: I) -> Result<u32, LaunchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());

    // Only async-signal-safe calls are permitted between fork and exec.
    unsafe {
        command.pre_exec(|| nix::unistd::setsid().map(|_| ()).map_err(io::Error::from));
    }

    let child = command.spawn().map_err(|why| {
        if why.kind() == io::ErrorKind::NotFound {
            LaunchError::NotFound(program.to_path_buf())
        } else {
            LaunchError::Spawn(program.to_path_buf(), why)
        }
    })?;

    let pid = child.id();
    info!("launched {} as detached process {}", program.display(), pid);

    Ok(pid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, os::unix::fs::PermissionsExt, thread, time::Duration};

    #[test]
    fn missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("unattended-upgrade");

        match spawn_detached(&program, &[] as &[&str]) {
            Err(LaunchError::NotFound(path)) => assert_eq!(path, program),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn not_executable() {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("unattended-upgrade");
        fs::write(&program, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o644)).unwrap();

        assert!(matches!(spawn_detached(&program, &[] as &[&str]), Err(LaunchError::Spawn(..))));
    }

    #[test]
    fn runs_in_new_session() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("session");

        let script = format!(
            "cut -d' ' -f6 /proc/$$/stat > '{0}.tmp' && mv '{0}.tmp' '{0}'",
            marker.display()
        );
        let pid = spawn_detached(Path::new("/bin/sh"), &["-c", script.as_str()]).unwrap();

        let mut session = String::new();
        for _ in 0..50 {
            if let Ok(contents) = fs::read_to_string(&marker) {
                session = contents.trim().to_owned();
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }

        assert_eq!(session, pid.to_string());
    }
}
