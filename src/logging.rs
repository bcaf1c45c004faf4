use fern::{Dispatch, InitError};
use log::{Level, LevelFilter, Record};
use std::{env, io};
use yansi::Paint;

/// Environment variable which overrides the default log level.
pub const LOG_ENV: &str = "UNATTENDED_CTL_LOG";

/// The level requested through `UNATTENDED_CTL_LOG`, or `default` if unset or invalid.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    env::var(LOG_ENV).ok().and_then(|level| level.parse().ok()).unwrap_or(default)
}

pub fn setup_logging(filter: LevelFilter) -> Result<(), InitError> {
    let location = |record: &Record| match (record.file(), record.line()) {
        (Some(file), Some(line)) => {
            format!("{}{}{}", Paint::blue(file).bold(), Paint::new(":").bold(), Paint::magenta(line).bold())
        }
        _ => String::new(),
    };

    let format_level = |record: &Record| match record.level() {
        level @ Level::Trace => Paint::green(level).bold(),
        level @ Level::Warn => Paint::yellow(level).bold(),
        level @ Level::Error => Paint::red(level).bold(),
        level => Paint::new(level).bold(),
    };

    Dispatch::new()
        // Exclude logs for crates that we use
        .level(LevelFilter::Off)
        // Include only the logs for this crate
        .level_for("unattended_ctl", filter)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{:5}] {}: {}",
                format_level(record),
                strip_src(&location(record)),
                message
            ));
        })
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn strip_src(input: &str) -> &str { input.split("src/").nth(1).unwrap_or(input) }
