/// Joins an error with each of its sources, separated by `: `.
pub fn format_error(source: &(dyn std::error::Error + 'static)) -> String {
    let mut out = fomat!((source));

    let mut source = source.source();
    while let Some(why) = source {
        out.push_str(&fomat!(": "(why)));
        source = why.source();
    }

    out
}

#[cfg(test)]
mod tests {
    use crate::origins::OriginsError;
    use std::{io, path::PathBuf};

    #[test]
    fn error_chain() {
        let error = OriginsError::Write(
            PathBuf::from("/etc/apt/apt.conf.d/50unattended-upgrades"),
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );

        assert_eq!(
            super::format_error(&error),
            "failed to write \"/etc/apt/apt.conf.d/50unattended-upgrades\": permission denied"
        );
    }
}
