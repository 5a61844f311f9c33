/*!
 * Mock provider implementation for testing.
 *
 * This module provides a scriptable provider that simulates different
 * backend behaviors:
 * - `MockProvider::working()` - Always succeeds with a marked-up echo
 * - `MockProvider::with_responses(..)` - Returns scripted responses in order
 * - `MockProvider::fail_at(..)` - Fails the Nth translate call
 * - `MockProvider::unhealthy()` - Fails the health probe
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock provider for testing pipeline behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Whether the health probe succeeds
    healthy: bool,
    /// Scripted responses, consumed in order; echoes input when exhausted
    responses: Mutex<Vec<String>>,
    /// 1-based translate call number that fails, if any
    fail_at: Option<usize>,
    /// Number of health probes received
    health_calls: Arc<AtomicUsize>,
    /// Number of translate calls received
    translate_calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a healthy mock that echoes input with a marker prefix
    pub fn working() -> Self {
        Self {
            healthy: true,
            responses: Mutex::new(Vec::new()),
            fail_at: None,
            health_calls: Arc::new(AtomicUsize::new(0)),
            translate_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that returns the given responses in submission order
    pub fn with_responses(responses: Vec<&str>) -> Self {
        let mut scripted: Vec<String> = responses.into_iter().map(String::from).collect();
        // Stored reversed so pop() yields them in order
        scripted.reverse();

        Self {
            healthy: true,
            responses: Mutex::new(scripted),
            fail_at: None,
            health_calls: Arc::new(AtomicUsize::new(0)),
            translate_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock whose Nth translate call (1-based) fails
    pub fn fail_at(call: usize) -> Self {
        Self {
            healthy: true,
            responses: Mutex::new(Vec::new()),
            fail_at: Some(call),
            health_calls: Arc::new(AtomicUsize::new(0)),
            translate_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock whose health probe always fails
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            responses: Mutex::new(Vec::new()),
            fail_at: None,
            health_calls: Arc::new(AtomicUsize::new(0)),
            translate_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of health probes this mock has received
    pub fn health_call_count(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    /// Number of translate calls this mock has received
    pub fn translate_call_count(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn health_check(&self) -> Result<(), ProviderError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);

        if self.healthy {
            Ok(())
        } else {
            Err(ProviderError::ConnectionError(
                "mock backend is down".to_string(),
            ))
        }
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let call = self.translate_calls.fetch_add(1, Ordering::SeqCst) + 1;

        if self.fail_at == Some(call) {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("mock failure on call {}", call),
            });
        }

        if let Some(scripted) = self.responses.lock().pop() {
            return Ok(scripted);
        }

        Ok(format!("译{}", text))
    }
}
