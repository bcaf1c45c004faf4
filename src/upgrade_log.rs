//! Access to the log written by the unattended upgrade program.

use std::{fs, path::Path};

/// Reads the raw bytes of the log at `path`, or `None` if it cannot be read for any reason.
///
/// The log may carry package output in any encoding, so it is not decoded.
pub fn read(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(contents) => Some(contents),
        Err(why) => {
            debug!("unable to read {}: {}", path.display(), why);
            None
        }
    }
}
