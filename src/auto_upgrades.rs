use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

/// Directives written to the auto-upgrades file to enable periodic unattended upgrades.
pub const ENABLED: &str = "APT::Periodic::Update-Package-Lists \"1\";\n\
                           APT::Periodic::Unattended-Upgrade \"1\";\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disable {
    /// The file was moved aside to its `.disabled` path.
    Renamed,
    /// There was no file to move aside.
    AlreadyDisabled,
}

/// The path which the auto-upgrades file is moved to when disabled.
pub fn disabled_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".disabled");
    PathBuf::from(name)
}

/// Overwrites the auto-upgrades file with the directives that enable it.
pub fn enable(path: &Path) -> io::Result<()> {
    info!("enabling automatic upgrades in {}", path.display());
    fs::write(path, ENABLED)
}

/// Moves the auto-upgrades file aside, replacing any previously disabled copy.
pub fn disable(path: &Path) -> io::Result<Disable> {
    let target = disabled_path(path);

    match fs::rename(path, &target) {
        Ok(()) => {
            info!("moved {} to {}", path.display(), target.display());
            Ok(Disable::Renamed)
        }
        Err(why) if why.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist", path.display());
            Ok(Disable::AlreadyDisabled)
        }
        Err(why) => Err(why),
    }
}
