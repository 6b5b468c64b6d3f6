//! AstroPsyche - Personality Questionnaire Backend
//!
//! Runs an adaptive personality questionnaire: each answer is scored by a
//! deterministic keyword heuristic, follow-up questions come from a remote
//! text generator with a fixed fallback list, and a completed session is
//! aggregated into a psychological profile that feeds an astrology-flavored
//! narrative report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
