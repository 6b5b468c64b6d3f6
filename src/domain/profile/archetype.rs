//! Archetype catalogue - ordered decision rules over mean tone metrics.
//!
//! Rules are data, not code: each flow variant is a different catalogue,
//! evaluated top to bottom with first match winning.

use serde::{Deserialize, Serialize};

/// One tone dimension referenced by a threshold condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneMetric {
    Confidence,
    Energy,
    Verbosity,
    Hesitation,
    Authenticity,
}

/// Mean tone metrics of a completed session, as raw (unrounded) values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanTone {
    pub confidence: f64,
    pub energy: f64,
    pub verbosity: f64,
    pub hesitation: f64,
    pub authenticity: f64,
}

impl MeanTone {
    /// Returns the value of one metric.
    pub fn get(&self, metric: ToneMetric) -> f64 {
        match metric {
            ToneMetric::Confidence => self.confidence,
            ToneMetric::Energy => self.energy,
            ToneMetric::Verbosity => self.verbosity,
            ToneMetric::Hesitation => self.hesitation,
            ToneMetric::Authenticity => self.authenticity,
        }
    }
}

/// A single threshold test on one mean metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub metric: ToneMetric,
    /// When true the condition reads `metric > threshold`, otherwise
    /// `metric < threshold`.
    pub above: bool,
    pub threshold: f64,
}

impl Condition {
    /// `metric > threshold`.
    pub fn above(metric: ToneMetric, threshold: f64) -> Self {
        Self {
            metric,
            above: true,
            threshold,
        }
    }

    /// `metric < threshold`.
    pub fn below(metric: ToneMetric, threshold: f64) -> Self {
        Self {
            metric,
            above: false,
            threshold,
        }
    }

    /// Evaluates the condition against mean metrics.
    pub fn matches(&self, means: &MeanTone) -> bool {
        let value = means.get(self.metric);
        if self.above {
            value > self.threshold
        } else {
            value < self.threshold
        }
    }
}

/// The labels co-selected when a rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeLabels {
    pub archetype: String,
    pub motivational_type: String,
    pub communication_mode: String,
}

impl ArchetypeLabels {
    pub fn new(
        archetype: impl Into<String>,
        motivational_type: impl Into<String>,
        communication_mode: impl Into<String>,
    ) -> Self {
        Self {
            archetype: archetype.into(),
            motivational_type: motivational_type.into(),
            communication_mode: communication_mode.into(),
        }
    }
}

/// One rule in the ordered decision list. All conditions must hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRule {
    pub labels: ArchetypeLabels,
    pub conditions: Vec<Condition>,
}

impl ArchetypeRule {
    /// Checks whether every condition holds.
    pub fn matches(&self, means: &MeanTone) -> bool {
        self.conditions.iter().all(|c| c.matches(means))
    }
}

/// Ordered archetype decision list with a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeCatalog {
    rules: Vec<ArchetypeRule>,
    fallback: ArchetypeLabels,
}

impl ArchetypeCatalog {
    /// Creates a catalogue from an ordered rule list and fallback labels.
    pub fn new(rules: Vec<ArchetypeRule>, fallback: ArchetypeLabels) -> Self {
        Self { rules, fallback }
    }

    /// Returns the labels of the first matching rule, or the fallback.
    pub fn classify(&self, means: &MeanTone) -> &ArchetypeLabels {
        self.rules
            .iter()
            .find(|r| r.matches(means))
            .map(|r| &r.labels)
            .unwrap_or(&self.fallback)
    }

    /// Returns the fallback labels.
    pub fn fallback(&self) -> &ArchetypeLabels {
        &self.fallback
    }
}

impl Default for ArchetypeCatalog {
    fn default() -> Self {
        use ToneMetric::*;

        Self::new(
            vec![
                ArchetypeRule {
                    labels: ArchetypeLabels::new(
                        "Reflective Storyteller",
                        "Meaning-Seeker",
                        "Expressive and layered",
                    ),
                    conditions: vec![
                        Condition::above(Verbosity, 0.6),
                        Condition::above(Authenticity, 0.7),
                    ],
                },
                ArchetypeRule {
                    labels: ArchetypeLabels::new(
                        "Radiant Vanguard",
                        "Achievement-Driven",
                        "Direct and animated",
                    ),
                    conditions: vec![
                        Condition::above(Confidence, 0.7),
                        Condition::above(Energy, 0.5),
                    ],
                },
                ArchetypeRule {
                    labels: ArchetypeLabels::new(
                        "Careful Contemplator",
                        "Security-Oriented",
                        "Measured and tentative",
                    ),
                    conditions: vec![Condition::above(Hesitation, 0.4)],
                },
                ArchetypeRule {
                    labels: ArchetypeLabels::new(
                        "Open-Hearted Dreamer",
                        "Connection-Seeker",
                        "Warm and candid",
                    ),
                    conditions: vec![
                        Condition::above(Authenticity, 0.75),
                        Condition::below(Confidence, 0.5),
                    ],
                },
                ArchetypeRule {
                    labels: ArchetypeLabels::new(
                        "Spirited Catalyst",
                        "Novelty-Driven",
                        "Quick and vivid",
                    ),
                    conditions: vec![Condition::above(Energy, 0.6)],
                },
                ArchetypeRule {
                    labels: ArchetypeLabels::new(
                        "Quiet Observer",
                        "Autonomy-Seeker",
                        "Spare and precise",
                    ),
                    conditions: vec![Condition::below(Verbosity, 0.25)],
                },
            ],
            ArchetypeLabels::new("Balanced Explorer", "Growth-Oriented", "Even and adaptable"),
        )
    }
}

/// One trait inclusion test. Independent of archetype rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitRule {
    pub label: String,
    pub condition: Condition,
}

impl TraitRule {
    pub fn new(label: impl Into<String>, condition: Condition) -> Self {
        Self {
            label: label.into(),
            condition,
        }
    }
}

/// Threshold tests producing the core and shadow trait lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitCatalog {
    pub core: Vec<TraitRule>,
    pub shadow: Vec<TraitRule>,
}

impl TraitCatalog {
    /// Returns the labels of all matching rules, in catalogue order.
    pub fn matching(rules: &[TraitRule], means: &MeanTone) -> Vec<String> {
        rules
            .iter()
            .filter(|r| r.condition.matches(means))
            .map(|r| r.label.clone())
            .collect()
    }
}

impl Default for TraitCatalog {
    fn default() -> Self {
        use ToneMetric::*;

        Self {
            core: vec![
                TraitRule::new("authentic", Condition::above(Authenticity, 0.7)),
                TraitRule::new("self-assured", Condition::above(Confidence, 0.6)),
                TraitRule::new("expressive", Condition::above(Verbosity, 0.6)),
                TraitRule::new("energetic", Condition::above(Energy, 0.5)),
                TraitRule::new("decisive", Condition::below(Hesitation, 0.2)),
            ],
            shadow: vec![
                TraitRule::new("self-doubting", Condition::above(Hesitation, 0.4)),
                TraitRule::new("guarded", Condition::below(Authenticity, 0.4)),
                TraitRule::new("withholding", Condition::below(Verbosity, 0.2)),
                TraitRule::new("restless", Condition::above(Energy, 0.7)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn means(
        confidence: f64,
        energy: f64,
        verbosity: f64,
        hesitation: f64,
        authenticity: f64,
    ) -> MeanTone {
        MeanTone {
            confidence,
            energy,
            verbosity,
            hesitation,
            authenticity,
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        let catalog = ArchetypeCatalog::default();
        // Satisfies both the storyteller rule and the contemplator rule;
        // the storyteller is earlier in the list.
        let m = means(0.5, 0.1, 0.8, 0.5, 0.8);
        assert_eq!(catalog.classify(&m).archetype, "Reflective Storyteller");
    }

    #[test]
    fn no_match_falls_back_to_balanced_explorer() {
        let catalog = ArchetypeCatalog::default();
        let m = means(0.5, 0.3, 0.4, 0.3, 0.5);
        let labels = catalog.classify(&m);
        assert_eq!(labels.archetype, "Balanced Explorer");
        assert_eq!(labels, catalog.fallback());
    }

    #[test]
    fn threshold_comparisons_are_strict() {
        let catalog = ArchetypeCatalog::default();
        // Exactly at the contemplator threshold: strict > must not match.
        let m = means(0.5, 0.3, 0.4, 0.4, 0.5);
        assert_eq!(catalog.classify(&m).archetype, "Balanced Explorer");
    }

    #[test]
    fn trait_rules_are_independent() {
        let traits = TraitCatalog::default();
        let m = means(0.8, 0.6, 0.4, 0.1, 0.9);

        let core = TraitCatalog::matching(&traits.core, &m);
        assert!(core.contains(&"authentic".to_string()));
        assert!(core.contains(&"self-assured".to_string()));
        assert!(core.contains(&"energetic".to_string()));
        assert!(core.contains(&"decisive".to_string()));
        assert!(!core.contains(&"expressive".to_string()));
    }

    #[test]
    fn trait_lists_may_be_empty() {
        let traits = TraitCatalog::default();
        let m = means(0.5, 0.3, 0.4, 0.3, 0.5);
        assert!(TraitCatalog::matching(&traits.shadow, &m).is_empty());
    }

    #[test]
    fn labels_are_co_selected() {
        let catalog = ArchetypeCatalog::default();
        let m = means(0.9, 0.6, 0.4, 0.0, 0.5);
        let labels = catalog.classify(&m);
        assert_eq!(labels.archetype, "Radiant Vanguard");
        assert_eq!(labels.motivational_type, "Achievement-Driven");
        assert_eq!(labels.communication_mode, "Direct and animated");
    }
}
