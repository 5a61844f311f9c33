use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Prefix applied to input file names when deriving the output artifact name
pub const OUTPUT_PREFIX: &str = "translated_";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output artifact path for a translated document
    // @params: document_name, output_dir
    pub fn output_path<P: AsRef<Path>>(document_name: &str, output_dir: P) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}{}", OUTPUT_PREFIX, document_name))
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Check whether a path carries the accepted document extension
    pub fn has_extension(path: &Path, extension: &str) -> bool {
        let normalized_ext = extension.trim_start_matches('.');
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext))
            .unwrap_or(false)
    }

    /// Read the raw bytes of a file
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Decode document bytes into text.
///
/// Honors a byte-order mark when present, prefers UTF-8 when the content is
/// valid UTF-8, and otherwise falls back to the configured legacy encoding.
/// Undecodable sequences are replaced rather than failing the document.
pub fn decode_bytes(bytes: &[u8], fallback_encoding: &str) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _, _) = encoding.decode(&bytes[bom_len..]);
        return text.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let encoding = Encoding::for_label(fallback_encoding.as_bytes()).unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
