/*!
 * Per-document translation orchestration.
 *
 * The pipeline ties the pieces together for one document: fingerprint the
 * bytes, consult the cache, segment into paragraph units, probe the backend,
 * translate each unit sequentially with a pacing delay, sanitize and
 * reassemble, write the output artifact, and record the run in the cache.
 *
 * The flow is linear with no back-edges. Any unit failure aborts the
 * remaining units: partial results are discarded, never partially written,
 * so an output file is either the complete reassembled translation or
 * absent.
 */

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::PipelineError;
use crate::file_utils::{self, FileManager};
use crate::fingerprint;
use crate::providers::Provider;
use crate::translation::cache::{TranslationCache, TranslationRecord};
use crate::translation::sanitize::sanitize;
use crate::translation::segment::{reassemble, segment};

/// Result of running one document through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Cache hit; the existing output artifact is still valid
    Skipped,
    /// The document was translated and its output artifact written
    Translated {
        /// Number of units submitted to the backend
        units: usize,
    },
}

/// Per-document translation pipeline
pub struct Pipeline {
    /// Backend the units are submitted to
    provider: Arc<dyn Provider>,
    /// Persistent fingerprint/history cache
    cache: Arc<TranslationCache>,
    /// Directory output artifacts are written to
    output_dir: PathBuf,
    /// Legacy encoding used when input bytes are not valid UTF-8
    fallback_encoding: String,
    /// Fixed delay between consecutive unit submissions
    pacing_delay: Duration,
}

impl Pipeline {
    /// Create a new pipeline
    pub fn new(
        provider: Arc<dyn Provider>,
        cache: Arc<TranslationCache>,
        output_dir: impl Into<PathBuf>,
        fallback_encoding: impl Into<String>,
        pacing_delay: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            output_dir: output_dir.into(),
            fallback_encoding: fallback_encoding.into(),
            pacing_delay,
        }
    }

    /// Run one document through the pipeline.
    ///
    /// Returns `Skipped` on a cache hit. On any failure nothing is written
    /// and the cache is left unchanged, so the document is retried on the
    /// next trigger.
    pub async fn translate_document(&self, input_file: &Path) -> Result<PipelineOutcome, PipelineError> {
        let document_name = input_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| PipelineError::InvalidPath(input_file.display().to_string()))?;

        // Fingerprint the raw bytes; a read failure aborts this run and the
        // document stays uncached, so it is naturally retried
        let bytes = FileManager::read_bytes(input_file).map_err(|e| {
            PipelineError::Io(std::io::Error::other(format!(
                "{}: {}",
                document_name, e
            )))
        })?;
        let fingerprint = fingerprint::fingerprint_bytes(&bytes);

        let output_path = FileManager::output_path(&document_name, &self.output_dir);
        if !self
            .cache
            .needs_translation(&document_name, &fingerprint, &output_path)
        {
            info!("Skipping '{}', translation is up to date", document_name);
            return Ok(PipelineOutcome::Skipped);
        }

        let text = file_utils::decode_bytes(&bytes, &self.fallback_encoding);
        let units = segment(&text);
        debug!("Segmented '{}' into {} units", document_name, units.len());

        // Probe once before any unit is sent; a known-down backend fails
        // the whole document immediately
        self.provider
            .health_check()
            .await
            .map_err(|e| PipelineError::BackendUnavailable(e.to_string()))?;

        let mut translated: Vec<String> = Vec::with_capacity(units.len());
        let mut records: Vec<TranslationRecord> = Vec::with_capacity(units.len());

        for unit in &units {
            if unit.index > 0 {
                tokio::time::sleep(self.pacing_delay).await;
            }

            let raw = self.provider.translate(&unit.text).await?;
            let clean = sanitize(&raw);

            debug!(
                "Translated unit {}/{} of '{}'",
                unit.index + 1,
                units.len(),
                document_name
            );

            records.push(TranslationRecord::new(unit.text.clone(), clean.clone()));
            translated.push(clean);
        }

        let output = reassemble(&translated);
        FileManager::write_to_file(&output_path, &output).map_err(|e| {
            PipelineError::Io(std::io::Error::other(format!(
                "{}: {}",
                document_name, e
            )))
        })?;

        self.cache
            .record(&document_name, &fingerprint, records)
            .map_err(|e| PipelineError::Io(std::io::Error::other(e.to_string())))?;

        info!(
            "Translated '{}' ({} units) -> {:?}",
            document_name,
            units.len(),
            output_path
        );

        Ok(PipelineOutcome::Translated { units: units.len() })
    }

    /// Translate a single ad-hoc string through the same client and
    /// sanitizer, without touching the cache or the filesystem
    pub async fn translate_snippet(&self, text: &str) -> Result<String, PipelineError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        self.provider
            .health_check()
            .await
            .map_err(|e| PipelineError::BackendUnavailable(e.to_string()))?;

        let raw = self.provider.translate(text).await?;
        Ok(sanitize(&raw))
    }
}
