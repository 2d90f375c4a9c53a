//! Path validation collaborators
//!
//! Thin checks the pipeline runs before parsing and before writing. The core
//! consumes only these contracts; the interesting validation (document
//! structure, entity eligibility) lives in the adapters.

use std::path::Path;

use crate::application::ApplicationError;

/// The input document must exist and be a readable regular file.
pub fn validate_input_file(path: &Path) -> Result<(), ApplicationError> {
    if path.as_os_str().is_empty() {
        return Err(ApplicationError::Validation(
            "input path cannot be empty".to_string(),
        ));
    }
    if !path.exists() {
        return Err(ApplicationError::Validation(format!(
            "input file does not exist: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(ApplicationError::Validation(format!(
            "input path is not a regular file: {}",
            path.display()
        )));
    }
    std::fs::File::open(path).map_err(|e| {
        ApplicationError::Validation(format!("input file is not readable: {e}"))
    })?;
    Ok(())
}

/// The destination must be usable as a directory root: either an existing
/// directory or a path whose parent exists.
pub fn validate_destination(path: &Path) -> Result<(), ApplicationError> {
    if path.as_os_str().is_empty() {
        return Err(ApplicationError::Validation(
            "destination path cannot be empty".to_string(),
        ));
    }
    if path.exists() {
        if !path.is_dir() {
            return Err(ApplicationError::Validation(format!(
                "destination is not a directory: {}",
                path.display()
            )));
        }
        return Ok(());
    }
    // Not yet created: the writer will create it, but its parent must exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(ApplicationError::Validation(format!(
                "destination parent does not exist: {}",
                parent.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_input_file_validation() {
        assert!(validate_input_file(&PathBuf::from("")).is_err());
        assert!(validate_input_file(&PathBuf::from("/nonexistent/x.yaml")).is_err());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_input_file(dir.path()).is_err());

        let file = dir.path().join("spec.yaml");
        std::fs::write(&file, "openapi: 3.0.0").unwrap();
        assert!(validate_input_file(&file).is_ok());
    }

    #[test]
    fn test_destination_validation() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_destination(dir.path()).is_ok());

        // Missing directory with an existing parent is fine
        assert!(validate_destination(&dir.path().join("out")).is_ok());

        // Missing directory with a missing parent is not
        assert!(validate_destination(&dir.path().join("a/b/out")).is_err());

        let file = dir.path().join("occupied");
        std::fs::write(&file, "x").unwrap();
        assert!(validate_destination(&file).is_err());
    }
}
