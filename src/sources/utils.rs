use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Check that a path points at an executable regular file.
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

/// Resolve a tool binary: the configured path if it is executable, otherwise
/// a PATH search by base name.
///
/// A binary found in neither place is a hard error; the caller should surface
/// it rather than report half a fact record from a host that is missing its
/// appliance tooling.
pub fn resolve_binary(configured: &Path, name: &str) -> Result<PathBuf> {
    if is_executable(configured) {
        return Ok(configured.to_path_buf());
    }
    debug!(
        "{} not usable at {}, searching PATH",
        name,
        configured.display()
    );
    which::which(name).with_context(|| {
        format!(
            "Binary '{}' not found at {} or in PATH",
            name,
            configured.display()
        )
    })
}

/// Run a tool and capture stdout.
///
/// Returns `None` when the command exits non-zero: the corresponding fact
/// slot stays empty, since a tool refusing to report on one host must not
/// abort collection of the remaining facts.
pub fn run_capture(binary: &Path, args: &[&str]) -> Result<Option<String>> {
    debug!("Running {} {}", binary.display(), args.join(" "));

    let output = Command::new(binary)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute {}", binary.display()))?;

    if !output.status.success() {
        warn!(
            "{} exited with {}: {}",
            binary.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_executable_rejects_missing_path() {
        assert!(!is_executable(Path::new("/nonexistent/binary")));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable_rejects_plain_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(!is_executable(file.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_binary_falls_back_to_path_search() {
        // `sh` is on PATH everywhere we run tests
        let resolved = resolve_binary(Path::new("/nonexistent/sh"), "sh").unwrap();
        assert!(is_executable(&resolved));
    }

    #[test]
    fn test_resolve_binary_error_names_both_locations() {
        let err = resolve_binary(
            Path::new("/nonexistent/exa-tool"),
            "definitely-not-a-real-binary",
        )
        .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("definitely-not-a-real-binary"));
        assert!(msg.contains("/nonexistent/exa-tool"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_capture_nonzero_exit_yields_none() {
        let sh = which::which("sh").unwrap();
        let result = run_capture(&sh, &["-c", "exit 3"]).unwrap();
        assert!(result.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_capture_collects_stdout() {
        let sh = which::which("sh").unwrap();
        let result = run_capture(&sh, &["-c", "printf 'model: X9-2\\n'"]).unwrap();
        assert_eq!(result.as_deref(), Some("model: X9-2\n"));
    }
}
