//! GenerateReportHandler - Command handler for the narrative report.
//!
//! Merges a stored profile with externally supplied astrology context and
//! asks the text generator for an enrichment narrative. Generation is best
//! effort; a deterministic template summary stands in on failure.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, SessionId, UserId};
use crate::domain::profile::PsychologicalProfile;
use crate::ports::{
    AstrologyContext, GenerationRequest, NarrativeReport, QuestionnairePhase, QuestionnaireStore,
    TextGenerator,
};

const NARRATIVE_MAX_TOKENS: u32 = 600;

const NARRATIVE_SYSTEM_PROMPT: &str = "You write warm, grounded personality \
narratives. Two short paragraphs, second person, no headings, no lists.";

/// Command to generate a narrative report for a stored profile.
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub profile_id: ProfileId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub astrology: AstrologyContext,
}

/// How the narrative text was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeSource {
    Generated,
    Template,
}

/// Result carrying the merged report.
#[derive(Debug, Clone)]
pub struct GenerateReportResult {
    pub report: NarrativeReport,
    pub source: NarrativeSource,
}

/// Handler for report generation.
pub struct GenerateReportHandler {
    store: Arc<dyn QuestionnaireStore>,
    generator: Arc<dyn TextGenerator>,
}

impl GenerateReportHandler {
    pub fn new(store: Arc<dyn QuestionnaireStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    pub async fn handle(&self, cmd: GenerateReportCommand) -> Result<GenerateReportResult, DomainError> {
        let profile = self
            .store
            .load_profile(&cmd.profile_id)
            .await
            .map_err(|err| {
                DomainError::new(ErrorCode::StorageError, format!("Profile load failed: {err}"))
            })?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ProfileNotFound,
                    format!("Profile {} not found", cmd.profile_id),
                )
            })?;

        let request = GenerationRequest::new(
            build_prompt(&profile, &cmd.astrology),
            QuestionnairePhase::Enrichment,
            cmd.user_id,
            cmd.session_id,
        )
        .with_system_prompt(NARRATIVE_SYSTEM_PROMPT)
        .with_max_tokens(NARRATIVE_MAX_TOKENS);

        let (narrative, source) = match self.generator.generate(request).await {
            Ok(text) if !text.trim().is_empty() => {
                (text.trim().to_string(), NarrativeSource::Generated)
            }
            Ok(_) => {
                tracing::warn!(
                    profile_id = %cmd.profile_id,
                    "generator returned empty narrative, using template"
                );
                (template_narrative(&profile, &cmd.astrology), NarrativeSource::Template)
            }
            Err(err) => {
                tracing::warn!(
                    profile_id = %cmd.profile_id,
                    error = %err,
                    "narrative generation failed, using template"
                );
                (template_narrative(&profile, &cmd.astrology), NarrativeSource::Template)
            }
        };

        Ok(GenerateReportResult {
            report: NarrativeReport {
                profile,
                astrology: cmd.astrology,
                narrative,
            },
            source,
        })
    }
}

fn build_prompt(profile: &PsychologicalProfile, astrology: &AstrologyContext) -> String {
    let mut prompt = format!(
        "Archetype: {}\nMotivational type: {}\nCommunication mode: {}\n\
         Dominant emotion: {}\nSun: {}, Moon: {}, Rising: {}\n",
        profile.archetype,
        profile.motivational_type,
        profile.communication_mode,
        profile.dominant_emotion,
        astrology.sun_sign,
        astrology.moon_sign,
        astrology.rising_sign,
    );
    if !profile.core_traits.is_empty() {
        prompt.push_str(&format!("Core traits: {}\n", profile.core_traits.join(", ")));
    }
    if !profile.shadow_traits.is_empty() {
        prompt.push_str(&format!(
            "Shadow traits: {}\n",
            profile.shadow_traits.join(", ")
        ));
    }
    prompt.push_str("\nWrite the narrative.");
    prompt
}

/// Deterministic summary used when generation is unavailable.
fn template_narrative(profile: &PsychologicalProfile, astrology: &AstrologyContext) -> String {
    let traits = if profile.core_traits.is_empty() {
        "a balanced mix of qualities".to_string()
    } else {
        profile.core_traits.join(", ")
    };
    format!(
        "You present as a {archetype}. Your answers most often carried {emotion}, \
         and your responses show {traits}. With your Sun in {sun} and Moon in {moon}, \
         your {rising} rising shapes how others first meet you. Your motivational \
         style is {motivation}, expressed through {mode} communication.",
        archetype = profile.archetype,
        emotion = profile.dominant_emotion,
        traits = traits,
        sun = astrology.sun_sign,
        moon = astrology.moon_sign,
        rising = astrology.rising_sign,
        motivation = profile.motivational_type,
        mode = profile.communication_mode,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::questionnaire::testing::{
        MockQuestionnaireStore, MockTextGenerator,
    };
    use crate::domain::analysis::ResponseAnalyzer;
    use crate::domain::foundation::QuestionId;
    use crate::domain::profile::ProfileAggregator;
    use crate::domain::session::Answer;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    fn test_astrology() -> AstrologyContext {
        AstrologyContext {
            sun_sign: "Leo".to_string(),
            moon_sign: "Pisces".to_string(),
            rising_sign: "Virgo".to_string(),
        }
    }

    fn test_profile() -> PsychologicalProfile {
        let analyzer = ResponseAnalyzer::with_defaults();
        let text = "I am genuinely happy and grateful for everything lately";
        let answers = vec![Answer::new(
            QuestionId::new(1),
            "Question 1",
            text,
            10,
            analyzer.analyze(text),
        )
        .unwrap()];
        ProfileAggregator::default().aggregate(&answers).unwrap()
    }

    async fn store_with_profile(
        profile: &PsychologicalProfile,
    ) -> (Arc<MockQuestionnaireStore>, ProfileId, SessionId) {
        let store = Arc::new(MockQuestionnaireStore::new());
        let profile_id = ProfileId::new();
        let session_id = SessionId::new();
        store
            .store_profile(&profile_id, &test_user_id(), &session_id, profile)
            .await
            .unwrap();
        (store, profile_id, session_id)
    }

    #[tokio::test]
    async fn generates_narrative_from_profile_and_astrology() {
        let profile = test_profile();
        let (store, profile_id, session_id) = store_with_profile(&profile).await;
        let generator = Arc::new(MockTextGenerator::replying(
            "You carry your joy openly, and it shows.",
        ));
        let handler = GenerateReportHandler::new(store, generator.clone());

        let result = handler
            .handle(GenerateReportCommand {
                profile_id,
                session_id,
                user_id: test_user_id(),
                astrology: test_astrology(),
            })
            .await
            .unwrap();

        assert_eq!(result.source, NarrativeSource::Generated);
        assert_eq!(result.report.narrative, "You carry your joy openly, and it shows.");
        assert_eq!(result.report.astrology.sun_sign, "Leo");

        let requests = generator.requests();
        assert_eq!(requests[0].phase, QuestionnairePhase::Enrichment);
        assert!(requests[0].prompt.contains(&profile.archetype));
        assert!(requests[0].prompt.contains("Sun: Leo"));
    }

    #[tokio::test]
    async fn falls_back_to_template_when_generation_fails() {
        let profile = test_profile();
        let (store, profile_id, session_id) = store_with_profile(&profile).await;
        let handler = GenerateReportHandler::new(store, Arc::new(MockTextGenerator::failing()));

        let result = handler
            .handle(GenerateReportCommand {
                profile_id,
                session_id,
                user_id: test_user_id(),
                astrology: test_astrology(),
            })
            .await
            .unwrap();

        assert_eq!(result.source, NarrativeSource::Template);
        assert!(result.report.narrative.contains(&profile.archetype));
        assert!(result.report.narrative.contains("Leo"));
    }

    #[tokio::test]
    async fn rejects_unknown_profile() {
        let handler = GenerateReportHandler::new(
            Arc::new(MockQuestionnaireStore::new()),
            Arc::new(MockTextGenerator::replying("unused")),
        );

        let err = handler
            .handle(GenerateReportCommand {
                profile_id: ProfileId::new(),
                session_id: SessionId::new(),
                user_id: test_user_id(),
                astrology: test_astrology(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}
