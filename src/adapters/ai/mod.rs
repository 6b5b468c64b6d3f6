//! AI adapters - TextGenerator implementations.

mod anthropic_generator;
mod fallback_generator;
mod mock_generator;

pub use anthropic_generator::{AnthropicConfig, AnthropicGenerator};
pub use fallback_generator::FallbackGenerator;
pub use mock_generator::{MockError, MockGenerator};
