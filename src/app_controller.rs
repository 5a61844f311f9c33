use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::providers::Provider;
use crate::providers::ollama::Ollama;
use crate::translation::cache::TranslationCache;
use crate::translation::pipeline::{Pipeline, PipelineOutcome};
use crate::watcher::DocumentWatcher;

// @module: Application controller for document translation

/// Main application controller driving scan and watch modes
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared persistent cache
    cache: Arc<TranslationCache>,
    // @field: Per-document pipeline
    pipeline: Pipeline,
}

impl Controller {
    // @method: Create a controller backed by the configured Ollama endpoint
    pub fn with_config(config: Config) -> Result<Self> {
        let provider: Arc<dyn Provider> = Arc::new(Ollama::new(
            &config.backend,
            &config.source_language,
            &config.target_language,
        ));
        Self::with_provider(config, provider)
    }

    /// Create a controller with an explicit backend, used by tests
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Result<Self> {
        // Input, output, and cache directories exist before anything runs
        FileManager::ensure_dir(&config.input_dir)?;
        FileManager::ensure_dir(&config.output_dir)?;
        if let Some(parent) = Path::new(&config.cache_file).parent() {
            if !parent.as_os_str().is_empty() {
                FileManager::ensure_dir(parent)?;
            }
        }

        let cache = Arc::new(TranslationCache::load(&config.cache_file));
        let pipeline = Pipeline::new(
            Arc::clone(&provider),
            Arc::clone(&cache),
            config.output_dir.clone(),
            config.fallback_encoding.clone(),
            Duration::from_millis(config.pacing_delay_ms),
        );

        Ok(Self {
            config,
            cache,
            pipeline,
        })
    }

    /// Shared cache, for history inspection
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// One-shot pass over every matching document in the input directory.
    ///
    /// Failures are local to a document and never abort the scan.
    pub async fn run_scan(&self) -> Result<()> {
        let files = FileManager::find_files(&self.config.input_dir, &self.config.file_extension)?;

        if files.is_empty() {
            info!(
                "No .{} documents found in {:?}",
                self.config.file_extension, self.config.input_dir
            );
            return Ok(());
        }

        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result);
        progress_bar.set_message("Translating");

        let mut translated_count = 0;
        let mut skipped_count = 0;
        let mut error_count = 0;

        for file in &files {
            match self.process_document(file).await {
                Ok(PipelineOutcome::Translated { .. }) => translated_count += 1,
                Ok(PipelineOutcome::Skipped) => skipped_count += 1,
                Err(_) => error_count += 1,
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        info!(
            "Scan completed: {} translated, {} skipped, {} errors",
            translated_count, skipped_count, error_count
        );

        Ok(())
    }

    /// Continuous ingestion: scan once, then translate on filesystem events
    /// until an interrupt signal arrives.
    pub async fn run_watch(&self) -> Result<()> {
        self.run_watch_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    /// Watch loop with an explicit shutdown trigger.
    ///
    /// The shutdown future is armed once and stays alive for the whole loop,
    /// including while a document is in flight, so a signal arriving
    /// mid-translation abandons that document instead of being lost. An
    /// abandoned document leaves no output and no cache update, so it is
    /// retried on the next run.
    pub async fn run_watch_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.run_scan().await?;

        let input_dir = PathBuf::from(&self.config.input_dir);
        let mut watcher = DocumentWatcher::new(&input_dir, &self.config.file_extension)?;

        info!(
            "Watching {:?} for .{} documents (Ctrl-C to stop)",
            input_dir, self.config.file_extension
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Interrupt received, stopping watch mode");
                    break;
                }
                event = watcher.next() => {
                    match event {
                        Some(path) => {
                            tokio::select! {
                                _ = &mut shutdown => {
                                    info!("Interrupt received, abandoning in-flight document {:?}", path);
                                    break;
                                }
                                _ = self.process_document(&path) => {}
                            }
                        }
                        None => {
                            warn!("Filesystem watch subscription closed");
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Translate one ad-hoc string through the pipeline's client and sanitizer
    pub async fn translate_text(&self, text: &str) -> Result<String> {
        Ok(self.pipeline.translate_snippet(text).await?)
    }

    /// Run one document through the pipeline, logging failures with context
    async fn process_document(&self, path: &Path) -> Result<PipelineOutcome, PipelineError> {
        match self.pipeline.translate_document(path).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                match &e {
                    PipelineError::BackendUnavailable(message) => {
                        error!("Backend unavailable for {:?}: {}", path, message)
                    }
                    PipelineError::Backend(inner) => {
                        error!("Translation failed for {:?}: {}", path, inner)
                    }
                    PipelineError::Io(inner) => error!("I/O failure for {:?}: {}", path, inner),
                    PipelineError::InvalidPath(inner) => error!("Invalid document path: {}", inner),
                }
                Err(e)
            }
        }
    }
}
