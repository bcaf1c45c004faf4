use envfile::EnvFile;
use std::{
    env, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Optional file which overrides the default paths.
pub const CONFIG_FILE: &str = "/etc/unattended-ctl.conf";

/// Environment variable naming an alternative to `CONFIG_FILE`.
pub const CONFIG_ENV: &str = "UNATTENDED_CTL_CONFIG";

pub const ORIGINS_CONF: &str = "/etc/apt/apt.conf.d/50unattended-upgrades";
pub const AUTO_UPGRADES_CONF: &str = "/etc/apt/apt.conf.d/20auto-upgrades";
pub const LOG_FILE: &str = "/var/log/unattended-upgrades/unattended-upgrades.log";
pub const UPGRADE_PROGRAM: &str = "/usr/bin/unattended-upgrade";
pub const APT_CONFIG: &str = "apt-config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open configuration at {0:?}")]
    Open(PathBuf, #[source] io::Error),
}

/// Files and programs which each subcommand operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The unattended-upgrades configuration holding the `Origins-Pattern` block.
    pub origins_conf: PathBuf,
    /// The periodic configuration whose presence enables automatic upgrades.
    pub auto_upgrades_conf: PathBuf,
    pub log_file: PathBuf,
    pub upgrade_program: PathBuf,
    pub apt_config: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origins_conf:       ORIGINS_CONF.into(),
            auto_upgrades_conf: AUTO_UPGRADES_CONF.into(),
            log_file:           LOG_FILE.into(),
            upgrade_program:    UPGRADE_PROGRAM.into(),
            apt_config:         APT_CONFIG.into(),
        }
    }
}

impl Config {
    /// Loads the defaults, overridden by the file named in `UNATTENDED_CTL_CONFIG`, or by
    /// `/etc/unattended-ctl.conf` if it exists.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// Reads `KEY=value` overrides from an env file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("reading configuration from {}", path.display());

        let file = EnvFile::new(path).map_err(|why| ConfigError::Open(path.to_path_buf(), why))?;

        let mut config = Self::default();
        config.apply(|key| {
            file.get(key).map(|value| value.trim_matches(&['"', '\''][..]).to_owned())
        });

        Ok(config)
    }

    fn apply<F: Fn(&str) -> Option<String>>(&mut self, get: F) {
        let fields = vec![
            ("ORIGINS_CONF", &mut self.origins_conf),
            ("AUTO_UPGRADES_CONF", &mut self.auto_upgrades_conf),
            ("LOG_FILE", &mut self.log_file),
            ("UPGRADE_PROGRAM", &mut self.upgrade_program),
            ("APT_CONFIG", &mut self.apt_config),
        ];

        for (key, field) in fields {
            if let Some(value) = get(key).filter(|value| !value.is_empty()) {
                debug!("{} = {}", key, value);
                *field = PathBuf::from(value);
            }
        }
    }
}
