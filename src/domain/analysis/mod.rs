//! Analysis - the deterministic response-scoring core.
//!
//! `ResponseAnalyzer` converts one free-text answer into an emotion label
//! and a five-dimensional tone vector. It is pure and total; the session
//! and profile modules build on its output shape only.

mod analyzer;
mod emotion;
mod lexicon;
mod tone;

pub use analyzer::{AuthenticityFormula, ResponseAnalysis, ResponseAnalyzer};
pub use emotion::Emotion;
pub use lexicon::Lexicon;
pub use tone::ToneVector;
