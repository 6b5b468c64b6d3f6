//! Fallback Generator - wraps a TextGenerator so it never fails.
//!
//! Delegates to the inner generator and, on any error or blank output,
//! substitutes a question from the fixed fallback list. Keeps the
//! questionnaire moving even with no working provider configured.
//!
//! # Example
//!
//! ```ignore
//! let generator = FallbackGenerator::new(Arc::new(anthropic));
//! // generate() always returns Ok
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::application::handlers::questionnaire::fallback_question;
use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// TextGenerator wrapper with a built-in fallback question list.
pub struct FallbackGenerator {
    inner: Arc<dyn TextGenerator>,
    /// Rotates through the fallback list across failures.
    fallback_cursor: AtomicUsize,
}

impl FallbackGenerator {
    pub fn new(inner: Arc<dyn TextGenerator>) -> Self {
        Self {
            inner,
            fallback_cursor: AtomicUsize::new(0),
        }
    }

    fn next_fallback(&self) -> String {
        let index = self.fallback_cursor.fetch_add(1, Ordering::Relaxed);
        fallback_question(index).to_string()
    }
}

#[async_trait]
impl TextGenerator for FallbackGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let phase = request.phase;
        match self.inner.generate(request).await {
            Ok(text) if !text.trim().is_empty() => Ok(text),
            Ok(_) => {
                tracing::warn!(phase = phase.label(), "inner generator returned blank text");
                Ok(self.next_fallback())
            }
            Err(err) => {
                tracing::warn!(
                    phase = phase.label(),
                    error = %err,
                    "inner generator failed, substituting fallback question"
                );
                Ok(self.next_fallback())
            }
        }
    }
}
