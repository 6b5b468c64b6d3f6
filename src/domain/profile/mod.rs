//! Profile - aggregation of a completed session into a personality profile.

mod aggregator;
mod archetype;
#[allow(clippy::module_inception)]
mod profile;

pub use aggregator::ProfileAggregator;
pub use archetype::{
    ArchetypeCatalog, ArchetypeLabels, ArchetypeRule, Condition, MeanTone, ToneMetric,
    TraitCatalog, TraitRule,
};
pub use profile::{AggregateStats, PsychologicalProfile};
