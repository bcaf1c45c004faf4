use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};
use thiserror::Error;

/// Shell variables requested from `apt-config shell`, paired with the apt options they read.
const QUERY: &[&str] = &["shell", "UpdateInterval", "APT::Periodic::Update-Package-Lists"];

static UPDATE_INTERVAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^UpdateInterval='([^']*)'").expect("bad regex for UpdateInterval")
});

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to launch {0:?}")]
    Spawn(PathBuf, #[source] io::Error),

    #[error("{program:?} exited with {status}: {stderr}")]
    Status { program: PathBuf, status: ExitStatus, stderr: String },
}

/// Fetches the periodic update settings from apt, in the `KEY='value'` form of `apt-config shell`.
pub fn query(program: &Path) -> Result<String, QueryError> {
    debug!("querying periodic update interval with {}", program.display());

    let output = Command::new(program)
        .args(QUERY)
        .output()
        .map_err(|why| QueryError::Spawn(program.to_path_buf(), why))?;

    if !output.status.success() {
        return Err(QueryError::Status {
            program: program.to_path_buf(),
            status:  output.status,
            stderr:  String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Whether the `UpdateInterval` assignment holds a non-zero interval.
///
/// A missing or non-numeric value is treated as disabled.
pub fn update_interval_enabled(output: &str) -> bool {
    let value = match output.lines().find_map(|line| UPDATE_INTERVAL.captures(line.trim())) {
        Some(captures) => captures[1].to_owned(),
        None => {
            debug!("UpdateInterval was not defined");
            return false;
        }
    };

    match value.trim().parse::<i64>() {
        Ok(interval) => interval != 0,
        Err(_) => {
            warn!("UpdateInterval is not a number: {:?}", value);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, os::unix::fs::PermissionsExt};
    use test_case::test_case;

    #[test_case("UpdateInterval='1'\nAPT::Periodic::Update-Package-Lists='1'\n" => true ; "enabled")]
    #[test_case("UpdateInterval='0'\n" => false ; "disabled")]
    #[test_case("UpdateInterval='7'" => true ; "weekly")]
    #[test_case("APT::Periodic::Update-Package-Lists='1'\n" => false ; "missing defaults to false")]
    #[test_case("" => false ; "empty output")]
    #[test_case("UpdateInterval=''\n" => false ; "empty value")]
    #[test_case("UpdateInterval='always'\n" => false ; "non-numeric value")]
    #[test_case("OtherUpdateInterval='1'\n" => false ; "only whole variable names match")]
    fn interval(output: &str) -> bool {
        update_interval_enabled(output)
    }

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("apt-config");
        fs::write(&path, ["#!/bin/sh\n", body].concat()).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn query_passes_variable_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo \"$@\"\n");

        assert_eq!(
            query(&program).unwrap(),
            "shell UpdateInterval APT::Periodic::Update-Package-Lists\n"
        );
    }

    #[test]
    fn query_failure_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo 'E: broken config' >&2\nexit 100\n");

        match query(&program) {
            Err(QueryError::Status { stderr, .. }) => assert_eq!(stderr, "E: broken config"),
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[test]
    fn query_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            query(&dir.path().join("apt-config")),
            Err(QueryError::Spawn(..))
        ));
    }
}
