//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `analysis` - Pure response-scoring service (emotion + tone heuristics)
//! - `session` - Questionnaire session lifecycle and the Answer entity
//! - `profile` - Profile aggregation (archetypes, traits, summary stats)

pub mod analysis;
pub mod foundation;
pub mod profile;
pub mod session;
