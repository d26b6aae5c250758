//! File system helpers
//!
//! Used to read configuration files and PEM bundles at startup.

use std::path::Path;
use std::fs;

use super::error::{InspectorError, Result};

/// Check that a path exists and is a regular file
///
/// # Errors
///
/// Returns `Config` when the path is missing or is not a file.
pub fn check_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(InspectorError::Config(format!(
            "File not found: {}",
            path.display()
        )));
    }

    if !path.is_file() {
        return Err(InspectorError::Config(format!(
            "Path is not a file: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Read a whole file after checking that it exists
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    check_file_exists(path)?;

    fs::read(path).map_err(InspectorError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_check_file_exists() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(check_file_exists(file.path()).is_ok());

        let dir = tempfile::tempdir().unwrap();
        assert!(check_file_exists(dir.path()).is_err(), "A directory is not a file");
        assert!(check_file_exists(&dir.path().join("missing.pem")).is_err());
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"-----BEGIN CERTIFICATE-----").unwrap();

        let content = read_file(file.path()).unwrap();
        assert_eq!(content, b"-----BEGIN CERTIFICATE-----");

        let err = read_file(Path::new("non_existent_file.pem")).unwrap_err();
        assert!(err.to_string().contains("non_existent_file.pem"));
    }
}
