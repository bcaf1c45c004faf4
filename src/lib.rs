#![deny(clippy::all)]

#[macro_use]
extern crate fomat_macros;

#[macro_use]
extern crate log;

/// Querying apt's periodic update settings
pub mod apt_config;

/// Enabling and disabling the periodic auto-upgrades configuration
pub mod auto_upgrades;

/// Paths and programs which the tool operates on
pub mod config;

/// Launching programs detached from the invoking session
pub mod launch;

/// Miscellaneous functions used throughout the library.
pub mod misc;

/// Ensuring that the Debian origin is allowed to be upgraded unattended
pub mod origins;

pub mod upgrade_log;
