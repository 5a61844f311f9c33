/*!
 * Ingestion trigger: filesystem watch feeding the pipeline.
 *
 * The watcher subscribes to create/modify events on the input directory,
 * filters them to the accepted document extension, and forwards paths into
 * a bounded channel. A single consumer drains the channel and invokes the
 * pipeline, preserving event order; closing the channel (watcher dropped or
 * cancellation) ends the loop cleanly.
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::file_utils::FileManager;

/// Bound on queued, not-yet-processed change events
const EVENT_QUEUE_SIZE: usize = 64;

/// Subscription to document create/modify events on the input directory
pub struct DocumentWatcher {
    /// Receiving end drained by the single consumer
    receiver: mpsc::Receiver<PathBuf>,
    /// Keeps the notify subscription alive for the watcher's lifetime
    _watcher: RecommendedWatcher,
}

impl DocumentWatcher {
    /// Start watching a directory for documents with the given extension
    pub fn new(input_dir: &Path, extension: &str) -> Result<Self> {
        let (sender, receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
        let extension = extension.to_string();

        // The callback runs on notify's own thread, so blocking_send is safe
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    warn!("Filesystem watch error: {}", e);
                    return;
                }
            };

            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }

            for path in event.paths {
                if !FileManager::has_extension(&path, &extension) {
                    continue;
                }
                debug!("Filesystem event for {:?}", path);
                if sender.blocking_send(path).is_err() {
                    // Consumer is gone; nothing left to deliver to
                    return;
                }
            }
        })
        .context("Failed to create filesystem watcher")?;

        watcher
            .watch(input_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {:?}", input_dir))?;

        Ok(Self {
            receiver,
            _watcher: watcher,
        })
    }

    /// Next changed document path, or None once the subscription has closed
    pub async fn next(&mut self) -> Option<PathBuf> {
        self.receiver.recv().await
    }
}
