#[macro_use]
extern crate log;

mod cli;
mod logging;

use crate::{cli::Cli, logging::setup_logging};
use log::LevelFilter;
use std::{io, process::exit};
use unattended_ctl::{config::Config, misc};

pub fn main() {
    let _ = setup_logging(logging::level_from_env(LevelFilter::Warn));

    let cli = Cli::from_cli();

    let config = match Config::load() {
        Ok(config) => config,
        Err(why) => {
            eprintln!("unattended-ctl: {}", misc::format_error(&why));
            exit(1);
        }
    };

    debug!("executing {:?} with {:?}", cli, config);

    let stdout = io::stdout();
    if let Err(why) = cli.execute(&config, &mut stdout.lock()) {
        eprintln!("unattended-ctl: {}", misc::format_error(&why));
        exit(why.exit_code());
    }
}
