use clap::Parser;
use std::io::{self, Write};
use thiserror::Error;
use unattended_ctl::{
    apt_config::{self, QueryError},
    auto_upgrades::{self, Disable},
    config::Config,
    launch::{self, LaunchError},
    misc,
    origins::{self, OriginsError},
    upgrade_log,
};

/// Configure and launch unattended upgrades
#[derive(Debug, Parser)]
#[clap(name = "unattended-ctl")]
pub enum Cli {
    /// allow upgrades from the Debian origin, then start unattended-upgrade in the background
    Run,

    /// print whether apt periodically updates the package lists
    CheckAuto,

    /// allow upgrades from the Debian origin, and enable periodic unattended upgrades
    EnableAuto,

    /// disable periodic unattended upgrades
    DisableAuto,

    /// print the unattended-upgrade log
    GetLog,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to allow the Debian origin")]
    Origins(#[from] OriginsError),

    #[error("failed to enable automatic upgrades")]
    Toggle(#[source] io::Error),

    #[error("failed to check automatic upgrades")]
    Query(#[from] QueryError),

    #[error("failed to start unattended upgrades")]
    Launch(#[from] LaunchError),

    #[error("failed to write output")]
    Output(#[source] io::Error),
}

impl CommandError {
    /// The status which the process exits with for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Launch(LaunchError::NotFound(_)) => 2,
            CommandError::Launch(LaunchError::Spawn(..)) => 3,
            _ => 1,
        }
    }
}

impl Cli {
    pub fn from_cli() -> Self { Self::parse() }

    pub fn execute(&self, config: &Config, out: &mut dyn Write) -> Result<(), CommandError> {
        match self {
            Cli::Run => {
                origins::ensure_debian_origin(&config.origins_conf)?;
                launch::spawn_detached(&config.upgrade_program, &[] as &[&str])?;
            }
            Cli::CheckAuto => {
                let output = apt_config::query(&config.apt_config)?;
                let enabled = apt_config::update_interval_enabled(&output);
                writeln!(out, "{}", enabled).map_err(CommandError::Output)?;
            }
            Cli::EnableAuto => {
                origins::ensure_debian_origin(&config.origins_conf)?;
                auto_upgrades::enable(&config.auto_upgrades_conf).map_err(CommandError::Toggle)?;
            }
            Cli::DisableAuto => match auto_upgrades::disable(&config.auto_upgrades_conf) {
                Ok(Disable::Renamed) => (),
                Ok(Disable::AlreadyDisabled) => {
                    unless_closed(writeln!(out, "Already disabled."))?
                }
                // Disabling never fails the process.
                Err(why) => eprintln!(
                    "unattended-ctl: failed to disable automatic upgrades: {}",
                    misc::format_error(&why)
                ),
            },
            Cli::GetLog => {
                if let Some(log) = upgrade_log::read(&config.log_file) {
                    unless_closed(out.write_all(&log))?;
                }
            }
        }

        Ok(())
    }
}

/// Maps a write failure to `CommandError::Output`, unless the reader hung up early, as with
/// `get-log | head`.
fn unless_closed(result: io::Result<()>) -> Result<(), CommandError> {
    match result {
        Err(why) if why.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout was closed early");
            Ok(())
        }
        result => result.map_err(CommandError::Output),
    }
}
