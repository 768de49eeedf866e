//! Input validation for the watchdog CLI.
//!
//! The session name is spliced into tmux control commands, so anything
//! outside a conservative character set is rejected before the loop starts.

use anyhow::{bail, Result};
use std::path::Path;

/// Maximum allowed length for session names.
pub const MAX_SESSION_NAME_LENGTH: usize = 128;

/// Validates that a session name is safe to pass to the hosting session's
/// control commands.
///
/// A name is valid if it is non-empty, no longer than
/// [`MAX_SESSION_NAME_LENGTH`], and contains only alphanumeric characters,
/// dots, dashes, and underscores.
pub fn validate_session_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Session name cannot be empty");
    }

    if name.len() > MAX_SESSION_NAME_LENGTH {
        bail!(
            "Session name too long: {} characters (max {})",
            name.len(),
            MAX_SESSION_NAME_LENGTH
        );
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if !valid_chars {
        bail!("Session name '{name}' contains invalid characters. Use only alphanumeric characters, dots (.), dashes (-), and underscores (_)");
    }

    Ok(())
}

/// Validates that the task directory exists and is a directory.
pub fn validate_task_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!(
            "Task directory '{}' does not exist or is not a directory",
            path.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_session_name_valid() {
        assert!(validate_session_name("agent-001").is_ok());
        assert!(validate_session_name("task_2024").is_ok());
        assert!(validate_session_name("build.main").is_ok());
        assert!(validate_session_name("a").is_ok());
        assert!(validate_session_name("MySession123").is_ok());
    }

    #[test]
    fn test_validate_session_name_empty() {
        let result = validate_session_name("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_session_name_too_long() {
        let long_name = "a".repeat(MAX_SESSION_NAME_LENGTH + 1);
        let result = validate_session_name(&long_name);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_validate_session_name_invalid_chars() {
        assert!(validate_session_name("agent 001").is_err());
        assert!(validate_session_name("agent/001").is_err());
        assert!(validate_session_name("agent;rm -rf").is_err());
        assert!(validate_session_name("agent$(id)").is_err());
        assert!(validate_session_name("agent:0").is_err());
        assert!(validate_session_name("agent\n").is_err());
    }

    #[test]
    fn test_validate_task_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_task_dir(dir.path()).is_ok());

        assert!(validate_task_dir(&dir.path().join("missing")).is_err());

        let file = dir.path().join("plain-file");
        std::fs::write(&file, "x").unwrap();
        assert!(validate_task_dir(&file).is_err());
    }
}
