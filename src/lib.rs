/*!
 * # tradoc - Translate Documents with AI
 *
 * A Rust library for automatic translation of plain-text documents using a
 * local LLM backend.
 *
 * ## Features
 *
 * - Watch a directory (or scan it once) for plain-text documents
 * - Skip unchanged documents via a persistent fingerprint cache
 * - Split documents into paragraph units on blank-line boundaries
 * - Translate each unit through an Ollama backend
 * - Sanitize free-form model output into clean target-language text
 * - Keep a full per-document translation history
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `fingerprint`: Content digests for change detection
 * - `translation`: The document translation pipeline:
 *   - `translation::segment`: Paragraph segmentation and reassembly
 *   - `translation::sanitize`: Model output cleanup
 *   - `translation::cache`: Persistent fingerprint/history cache
 *   - `translation::pipeline`: Per-document orchestration
 * - `providers`: Backend clients (`providers::ollama`, `providers::mock`)
 * - `watcher`: Filesystem ingestion trigger
 * - `file_utils`: File system operations and text decoding
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod fingerprint;
pub mod providers;
pub mod translation;
pub mod watcher;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, CacheError, PipelineError, ProviderError};
pub use fingerprint::{Fingerprint, fingerprint_bytes, fingerprint_file};
pub use translation::{Pipeline, PipelineOutcome, TranslationCache, TranslationRecord};
