/*!
 * Common test utilities for the tradoc test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a two-paragraph Thai document for testing
pub fn create_test_document(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, "สวัสดีครับ\n\nลาก่อนครับ")
}
