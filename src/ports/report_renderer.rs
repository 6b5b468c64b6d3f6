//! Report renderer port - hands a finished profile to the report layer.
//!
//! Rendering itself (layout, PDF, sharing) is outside this crate; the port
//! only fixes the shape a renderer must accept: the profile merged with
//! externally supplied astrology context.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::profile::PsychologicalProfile;

/// Astrology placements supplied by the external astrology collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstrologyContext {
    pub sun_sign: String,
    pub moon_sign: String,
    pub rising_sign: String,
}

/// A profile merged with astrology context, plus the narrative text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeReport {
    pub profile: PsychologicalProfile,
    pub astrology: AstrologyContext,
    /// Enrichment narrative (LLM-generated or template fallback).
    pub narrative: String,
}

/// Port for the external report-rendering collaborator.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Renders a narrative report for display or export.
    async fn render(&self, report: &NarrativeReport) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_renderer_is_object_safe() {
        fn _accepts_dyn(_r: &dyn ReportRenderer) {}
    }
}
