//! Edge synthesizers.
//!
//! Each synthesizer maps one record to the forward edges it implies. They
//! are pure: no graph access, no reverse edges. Entries missing a name are
//! dropped and counted, never reported as errors.

mod craft;
mod recycle;
mod repair;
mod trade;
mod upgrade;

pub use craft::CraftSynthesizer;
pub use recycle::BreakdownSynthesizer;
pub use repair::RepairSynthesizer;
pub use trade::TradeSynthesizer;
pub use upgrade::UpgradeSynthesizer;

use crate::edge::{Edge, ForwardEdge, Tag};
use crate::relation::RelationKind;
use itemgraph_core::{ItemRecord, MaterialLine};
use tracing::debug;

/// Turns one entity record into forward edges.
pub trait EdgeSynthesizer<R> {
    /// Short label for logging.
    fn label(&self) -> &'static str;

    /// Synthesizes the forward edges owned by the entity called `name`.
    fn synthesize(&self, record: &R, name: &str) -> Synthesized;
}

/// Item synthesizers, in the order their edges are appended to a node.
pub fn item_synthesizers() -> [&'static dyn EdgeSynthesizer<ItemRecord>; 4] {
    [
        &CraftSynthesizer,
        &UpgradeSynthesizer,
        &RepairSynthesizer,
        &BreakdownSynthesizer,
    ]
}

/// Runs every item synthesizer over a record.
pub fn synthesize_item(record: &ItemRecord, name: &str) -> Synthesized {
    let mut out = Synthesized::default();
    for synthesizer in item_synthesizers() {
        let produced = synthesizer.synthesize(record, name);
        if !produced.edges.is_empty() {
            debug!(
                "{} synthesizer produced {} edges for '{}'",
                synthesizer.label(),
                produced.edges.len(),
                name
            );
        }
        out.extend(produced);
    }
    out
}

/// Output of a synthesizer run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthesized {
    pub edges: Vec<ForwardEdge>,
    /// Material or shop entries skipped for lacking a name.
    pub dropped: usize,
    /// Upgrades skipped for lacking an input or output level.
    pub skipped_upgrades: usize,
}

impl Synthesized {
    pub fn extend(&mut self, other: Synthesized) {
        self.edges.extend(other.edges);
        self.dropped += other.dropped;
        self.skipped_upgrades += other.skipped_upgrades;
    }

    /// Emits one edge per named material line.
    pub(crate) fn push_materials(
        &mut self,
        lines: &[MaterialLine],
        relation: RelationKind,
        dependency: &[Tag],
        input_level: Option<&str>,
        output_level: Option<&str>,
    ) {
        for line in lines {
            let Some(material) = line.item_name() else {
                self.dropped += 1;
                continue;
            };
            let edge = Edge::new(relation)
                .with_quantity(line.quantity.clone())
                .with_dependency(dependency.to_vec())
                .with_levels(
                    input_level.map(str::to_string),
                    output_level.map(str::to_string),
                );
            self.edges.push(ForwardEdge::new(material, edge));
        }
    }
}

/// Workshop and blueprint tags shared by crafting and upgrades.
pub(crate) fn gate_tags(workshop: Option<&str>, blueprint_locked: bool) -> Vec<Tag> {
    let mut tags = Vec::new();
    if let Some(workshop) = workshop {
        tags.push(Tag::Workshop {
            name: workshop.to_string(),
        });
    }
    if blueprint_locked {
        tags.push(Tag::Blueprint { required: true });
    }
    tags
}
