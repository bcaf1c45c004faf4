//! All code responsible for allowing the Debian origin in the unattended-upgrades configuration.

use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// The rule which is inserted into the `Origins-Pattern` block.
pub const DEBIAN_ORIGIN: &str = r#""origin=Debian";"#;

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:origin|o)=Debian\b").expect("bad regex for origin marker"));

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*Unattended-Upgrade::Origins-Pattern\s*\{")
        .expect("bad regex for origins anchor")
});

#[derive(Debug, Error)]
pub enum OriginsError {
    #[error("{0:?} does not exist")]
    NotFound(PathBuf),

    #[error("failed to read {0:?}")]
    Read(PathBuf, #[source] io::Error),

    #[error("failed to write {0:?}")]
    Write(PathBuf, #[source] io::Error),
}

/// The outcome of patching the contents of an unattended-upgrades configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// A Debian origin rule already exists; nothing needs to be written.
    AlreadyPresent,
    /// The rule was inserted after the `Origins-Pattern` anchor.
    Inserted(String),
    /// No anchor was found, so the contents are unchanged.
    AnchorMissing(String),
}

/// What `ensure_debian_origin` did to the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    AlreadyPresent,
    Inserted,
    AnchorMissing,
}

/// Ensures that the configuration at `path` allows upgrades from the Debian origin.
///
/// The file is left untouched if a Debian origin rule is already present. Otherwise it is
/// truncated and rewritten in full. When the `Origins-Pattern` block cannot be found, the
/// original contents are written back unchanged and `Status::AnchorMissing` is returned.
pub fn ensure_debian_origin(path: &Path) -> Result<Status, OriginsError> {
    let contents = fs::read_to_string(path).map_err(|why| {
        if why.kind() == io::ErrorKind::NotFound {
            OriginsError::NotFound(path.to_path_buf())
        } else {
            OriginsError::Read(path.to_path_buf(), why)
        }
    })?;

    let (status, new) = match patch(&contents) {
        Patch::AlreadyPresent => {
            info!("{} already allows the Debian origin", path.display());
            return Ok(Status::AlreadyPresent);
        }
        Patch::Inserted(new) => {
            info!("adding {} to {}", DEBIAN_ORIGIN, path.display());
            (Status::Inserted, new)
        }
        Patch::AnchorMissing(new) => {
            warn!(
                "{} has no Unattended-Upgrade::Origins-Pattern block: Debian origin not added",
                path.display()
            );
            (Status::AnchorMissing, new)
        }
    };

    fs::write(path, new.as_bytes()).map_err(|why| OriginsError::Write(path.to_path_buf(), why))?;

    Ok(status)
}

/// Inserts the Debian origin rule after the `Origins-Pattern` anchor, unless a rule for the
/// Debian origin is already defined.
pub fn patch(input: &str) -> Patch {
    if input.lines().any(|line| MARKER.is_match(line)) {
        return Patch::AlreadyPresent;
    }

    let lines = input.split_inclusive('\n').collect::<Vec<_>>();
    let mut output = String::with_capacity(input.len() + DEBIAN_ORIGIN.len() + 16);
    let mut inserted = false;

    for (id, line) in lines.iter().enumerate() {
        output.push_str(line);

        if ANCHOR.is_match(line) {
            if !line.ends_with('\n') {
                output.push('\n');
            }

            output.push_str(&entry_indent(line, &lines[id + 1..]));
            output.push_str(DEBIAN_ORIGIN);
            output.push('\n');
            inserted = true;
        }
    }

    if inserted {
        Patch::Inserted(output)
    } else {
        Patch::AnchorMissing(output)
    }
}

/// Indentation used by the entries which follow the anchor.
fn entry_indent(anchor: &str, following: &[&str]) -> String {
    following
        .iter()
        .map(|line| line.trim_end_matches(&['\r', '\n'][..]))
        .find(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('}')
        })
        .map(|line| leading_whitespace(line).to_owned())
        .unwrap_or_else(|| [leading_whitespace(anchor), "        "].concat())
}

fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}
