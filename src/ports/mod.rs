//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextGenerator` - remote generative-text service (next questions,
//!   narrative enrichment), unreliable by contract
//! - `SessionRepository` - session aggregate persistence
//! - `QuestionnaireStore` / `AnswerCache` - durable answer/profile storage
//!   with an explicit degraded local-cache fallback
//! - `ReportRenderer` - external report layer (shape contract only)

mod questionnaire_store;
mod report_renderer;
mod session_repository;
mod text_generator;

pub use questionnaire_store::{AnswerCache, QuestionnaireStore, StorageError, StoreOutcome};
pub use report_renderer::{AstrologyContext, NarrativeReport, ReportRenderer};
pub use session_repository::SessionRepository;
pub use text_generator::{
    GenerationError, GenerationRequest, QuestionnairePhase, TextGenerator,
};
