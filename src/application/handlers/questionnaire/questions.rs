//! Fixed question content: the opening question and the fallback list used
//! when remote generation fails.

use crate::ports::QuestionnairePhase;

/// First question of every session.
pub const OPENING_QUESTION: &str =
    "What has been occupying your thoughts the most lately?";

/// Canned follow-up questions, indexed by how many answers have been given.
/// Used whenever the remote generator is unavailable.
pub const FALLBACK_QUESTIONS: &[&str] = &[
    "What does a really good day look like for you?",
    "When do you feel most like yourself?",
    "What is something you have changed your mind about recently?",
    "What do people tend to misunderstand about you?",
    "What are you most looking forward to right now?",
    "What is a decision you keep putting off?",
    "When was the last time something genuinely surprised you?",
    "What would you do differently if nobody were watching?",
    "What feels unfinished in your life at the moment?",
];

/// Returns the fallback question for the given progress, wrapping around
/// if the session runs longer than the list.
pub fn fallback_question(answered: usize) -> &'static str {
    FALLBACK_QUESTIONS[answered % FALLBACK_QUESTIONS.len()]
}

/// Maps session progress to a questionnaire phase label.
pub fn phase_for_progress(answered: usize, threshold: usize) -> QuestionnairePhase {
    if answered == 0 {
        QuestionnairePhase::Opening
    } else if answered + 2 >= threshold {
        QuestionnairePhase::Closing
    } else {
        QuestionnairePhase::Deepening
    }
}
