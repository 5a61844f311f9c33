/*!
 * Persistent translation cache.
 *
 * Maps document names to their last-seen fingerprint and full translation
 * history. The cache is the single source of truth for "already translated"
 * decisions: it is loaded once at startup and the whole mapping is rewritten
 * to disk synchronously after every update, so a crash loses at most the
 * in-flight translation. A corrupt or unreadable cache file resets to an
 * empty cache instead of aborting startup.
 */

use chrono::{DateTime, Utc};
use log::{debug, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::CacheError;
use crate::fingerprint::Fingerprint;

/// One translated unit: source text, target text, and when it was produced.
/// Immutable once written; records are appended, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationRecord {
    /// Source unit text
    pub source: String,
    /// Sanitized translated unit text
    pub target: String,
    /// When this unit was translated
    pub timestamp: DateTime<Utc>,
}

impl TranslationRecord {
    /// Create a record stamped with the current time
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Per-document cache record
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CacheEntry {
    /// Last-seen fingerprint of the document bytes
    fingerprint: String,
    /// Ordered history of translated units across revisions
    records: Vec<TranslationRecord>,
}

/// Persistent cache gating re-translation
pub struct TranslationCache {
    /// Path of the persisted JSON mapping
    path: PathBuf,
    /// In-memory state; single-writer discipline per process
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl TranslationCache {
    /// Load the cache from disk, starting empty when the file is missing,
    /// unreadable, or malformed
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, CacheEntry>>(&content) {
                Ok(entries) => {
                    debug!("Loaded translation cache with {} entries", entries.len());
                    entries
                }
                Err(e) => {
                    warn!(
                        "Translation cache at {:?} is malformed ({}), starting from an empty cache",
                        path, e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(
                    "Failed to read translation cache at {:?} ({}), starting from an empty cache",
                    path, e
                );
                HashMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Decide whether a document must be (re-)translated.
    ///
    /// True when no entry exists, the fingerprint differs from the stored
    /// one, or the expected output artifact is missing on disk. A cache hit
    /// requires hash match AND output presence; either failing forces
    /// retranslation.
    pub fn needs_translation(
        &self,
        document_name: &str,
        fingerprint: &Fingerprint,
        output_path: &Path,
    ) -> bool {
        let entries = self.entries.lock();

        match entries.get(document_name) {
            Some(entry) => entry.fingerprint != fingerprint.as_str() || !output_path.is_file(),
            None => true,
        }
    }

    /// Append a new history entry, update the stored fingerprint, and
    /// synchronously rewrite the full cache file
    pub fn record(
        &self,
        document_name: &str,
        fingerprint: &Fingerprint,
        records: Vec<TranslationRecord>,
    ) -> Result<(), CacheError> {
        let mut entries = self.entries.lock();

        let entry = entries.entry(document_name.to_string()).or_default();
        entry.fingerprint = fingerprint.as_str().to_string();
        entry.records.extend(records);

        self.persist(&entries)
    }

    /// Latest translation record for a document, if any
    pub fn latest(&self, document_name: &str) -> Option<TranslationRecord> {
        let entries = self.entries.lock();
        entries
            .get(document_name)?
            .records
            .iter()
            .max_by_key(|record| record.timestamp)
            .cloned()
    }

    /// Full history for a document, in the order it was recorded
    pub fn history(&self, document_name: &str) -> Vec<TranslationRecord> {
        let entries = self.entries.lock();
        entries
            .get(document_name)
            .map(|entry| entry.records.clone())
            .unwrap_or_default()
    }

    /// All histories, each sorted by timestamp descending
    pub fn all_history(&self) -> Vec<(String, Vec<TranslationRecord>)> {
        let entries = self.entries.lock();
        let mut all: Vec<(String, Vec<TranslationRecord>)> = entries
            .iter()
            .map(|(name, entry)| {
                let mut records = entry.records.clone();
                records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                (name.clone(), records)
            })
            .collect();

        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Number of documents in the cache
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Rewrite the whole mapping to disk (no incremental append format)
    fn persist(&self, entries: &HashMap<String, CacheEntry>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| CacheError::PersistFailed(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| CacheError::PersistFailed(e.to_string()))?;

        fs::write(&self.path, json).map_err(|e| CacheError::PersistFailed(e.to_string()))
    }
}
