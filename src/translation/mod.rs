/*!
 * Document translation pipeline.
 *
 * This module contains the core functionality for translating plain-text
 * documents through the backend. It is split into several submodules:
 *
 * - `segment`: Paragraph segmentation and reassembly
 * - `sanitize`: Cleanup of raw model output into target-language text
 * - `cache`: Persistent fingerprint and history cache
 * - `pipeline`: Per-document orchestration
 */

// Re-export main types for easier usage
pub use self::cache::{TranslationCache, TranslationRecord};
pub use self::pipeline::{Pipeline, PipelineOutcome};
pub use self::sanitize::sanitize;
pub use self::segment::{TranslationUnit, reassemble, segment};

// Submodules
pub mod cache;
pub mod pipeline;
pub mod sanitize;
pub mod segment;
