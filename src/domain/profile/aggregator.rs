//! Profile aggregator - rolls a completed session into a profile.
//!
//! Pure and deterministic: given the same ordered answer list and the same
//! catalogues, the output is identical on every call.

use crate::domain::analysis::{Emotion, ToneVector};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::Answer;

use super::{
    AggregateStats, ArchetypeCatalog, MeanTone, PsychologicalProfile, TraitCatalog,
};

/// Aggregates an ordered, non-empty answer sequence into a profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileAggregator {
    archetypes: ArchetypeCatalog,
    traits: TraitCatalog,
}

impl ProfileAggregator {
    /// Creates an aggregator with custom catalogues.
    pub fn new(archetypes: ArchetypeCatalog, traits: TraitCatalog) -> Self {
        Self { archetypes, traits }
    }

    /// Derives a profile from a completed session's answers.
    ///
    /// Callers enforce the minimum session length before invoking this;
    /// an empty input is a contract violation, not a recoverable state.
    ///
    /// # Errors
    ///
    /// - `EmptySession` if `answers` is empty
    pub fn aggregate(&self, answers: &[Answer]) -> Result<PsychologicalProfile, DomainError> {
        if answers.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptySession,
                "Cannot aggregate an empty answer sequence",
            ));
        }

        let count = answers.len() as f64;

        let average_word_count =
            answers.iter().map(|a| a.word_count() as f64).sum::<f64>() / count;
        let average_response_time_seconds = answers
            .iter()
            .map(|a| a.response_time_seconds() as f64)
            .sum::<f64>()
            / count;

        let means = Self::mean_tone(answers, count);
        let emotion_counts = Self::emotion_histogram(answers);
        let dominant_emotion = Self::dominant_emotion(&emotion_counts);

        let labels = self.archetypes.classify(&means).clone();
        let core_traits = TraitCatalog::matching(&self.traits.core, &means);
        let shadow_traits = TraitCatalog::matching(&self.traits.shadow, &means);

        Ok(PsychologicalProfile {
            archetype: labels.archetype,
            motivational_type: labels.motivational_type,
            communication_mode: labels.communication_mode,
            core_traits,
            shadow_traits,
            dominant_emotion,
            stats: AggregateStats {
                answer_count: answers.len() as u32,
                average_word_count,
                average_response_time_seconds,
                mean_tone: ToneVector::new(
                    means.confidence,
                    means.energy,
                    means.verbosity,
                    means.hesitation,
                    means.authenticity,
                ),
                emotion_counts,
                distinct_emotion_count: Self::distinct_count(answers),
            },
            answers: answers.to_vec(),
        })
    }

    fn mean_tone(answers: &[Answer], count: f64) -> MeanTone {
        let mut sums = MeanTone {
            confidence: 0.0,
            energy: 0.0,
            verbosity: 0.0,
            hesitation: 0.0,
            authenticity: 0.0,
        };

        for answer in answers {
            let tone = answer.tone();
            sums.confidence += tone.confidence.value();
            sums.energy += tone.energy.value();
            sums.verbosity += tone.verbosity.value();
            sums.hesitation += tone.hesitation.value();
            sums.authenticity += tone.authenticity.value();
        }

        MeanTone {
            confidence: sums.confidence / count,
            energy: sums.energy / count,
            verbosity: sums.verbosity / count,
            hesitation: sums.hesitation / count,
            authenticity: sums.authenticity / count,
        }
    }

    /// Builds the histogram preserving first-seen order.
    fn emotion_histogram(answers: &[Answer]) -> Vec<(Emotion, u32)> {
        let mut counts: Vec<(Emotion, u32)> = Vec::new();

        for answer in answers {
            match counts.iter_mut().find(|(e, _)| *e == answer.emotion()) {
                Some((_, n)) => *n += 1,
                None => counts.push((answer.emotion(), 1)),
            }
        }

        counts
    }

    /// Highest count wins; strict `>` over the first-seen-ordered histogram
    /// means the earliest-encountered emotion wins ties.
    fn dominant_emotion(counts: &[(Emotion, u32)]) -> Emotion {
        let mut best = Emotion::Neutral;
        let mut best_count = 0u32;

        for (emotion, count) in counts {
            if *count > best_count {
                best = *emotion;
                best_count = *count;
            }
        }

        best
    }

    fn distinct_count(answers: &[Answer]) -> u32 {
        Self::emotion_histogram(answers).len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ResponseAnalyzer;
    use crate::domain::foundation::QuestionId;

    fn aggregator() -> ProfileAggregator {
        ProfileAggregator::default()
    }

    fn answer(question_id: u32, text: &str, response_time: u32) -> Answer {
        let analysis = ResponseAnalyzer::with_defaults().analyze(text);
        Answer::new(
            QuestionId::new(question_id),
            "Prompt",
            text,
            response_time,
            analysis,
        )
        .unwrap()
    }

    #[test]
    fn aggregate_rejects_empty_input() {
        let result = aggregator().aggregate(&[]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::EmptySession);
    }

    #[test]
    fn aggregate_is_deterministic() {
        let answers = vec![
            answer(1, "I felt happy and full of joy yesterday", 10),
            answer(2, "maybe things will settle down eventually", 20),
            answer(3, "I am not sure what comes next for me", 15),
        ];

        let first = aggregator().aggregate(&answers).unwrap();
        let second = aggregator().aggregate(&answers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn aggregate_computes_basic_stats() {
        let answers = vec![
            answer(1, "one two three four", 10),
            answer(2, "one two three four five six", 20),
        ];

        let profile = aggregator().aggregate(&answers).unwrap();
        assert_eq!(profile.stats.answer_count, 2);
        assert_eq!(profile.stats.average_word_count, 5.0);
        assert_eq!(profile.stats.average_response_time_seconds, 15.0);
    }

    #[test]
    fn dominant_emotion_picks_highest_count() {
        let answers = vec![
            answer(1, "so happy and full of joy and love today", 5),
            answer(2, "feeling sad and lonely tonight", 5),
            answer(3, "happy again, joy and delight all around", 5),
        ];

        let profile = aggregator().aggregate(&answers).unwrap();
        assert_eq!(profile.dominant_emotion, Emotion::Joy);
        assert_eq!(profile.stats.distinct_emotion_count, 2);
    }

    #[test]
    fn dominant_emotion_tie_breaks_to_first_encountered() {
        let answers = vec![
            answer(1, "so happy and full of joy and love today", 5),
            answer(2, "feeling sad and lonely tonight", 5),
        ];

        let profile = aggregator().aggregate(&answers).unwrap();
        assert_eq!(profile.dominant_emotion, Emotion::Joy);
    }

    #[test]
    fn emotion_histogram_preserves_first_seen_order() {
        let answers = vec![
            answer(1, "feeling sad and lonely tonight", 5),
            answer(2, "so happy and full of joy and love today", 5),
            answer(3, "feeling sad and lonely again", 5),
        ];

        let profile = aggregator().aggregate(&answers).unwrap();
        let order: Vec<Emotion> = profile
            .stats
            .emotion_counts
            .iter()
            .map(|(e, _)| *e)
            .collect();
        assert_eq!(order, vec![Emotion::Sadness, Emotion::Joy]);
        assert_eq!(profile.dominant_emotion, Emotion::Sadness);
    }

    #[test]
    fn mid_range_means_fall_back_to_default_archetype() {
        // Short, plain answers: confidence and verbosity stay mid/low,
        // nothing crosses an archetype threshold except the quiet-observer
        // verbosity test, so craft answers above that line.
        let answers = vec![
            answer(1, "i settled into the season and kept walking forward each day", 10),
            answer(2, "the weekend passed and i kept my plans mostly intact overall", 12),
            answer(3, "work continued along and i balanced the days fairly evenly", 11),
        ];

        let profile = aggregator().aggregate(&answers).unwrap();
        assert_eq!(profile.archetype, "Balanced Explorer");
        assert_eq!(profile.motivational_type, "Growth-Oriented");
    }

    #[test]
    fn profile_carries_raw_answers() {
        let answers = vec![answer(1, "a single short answer", 5)];
        let profile = aggregator().aggregate(&answers).unwrap();
        assert_eq!(profile.answers, answers);
    }
}
