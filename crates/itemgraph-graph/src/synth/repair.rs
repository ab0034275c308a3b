use super::{EdgeSynthesizer, Synthesized};
use crate::edge::Tag;
use crate::relation::RelationKind;
use itemgraph_core::{non_blank, Amount, ItemRecord};

/// Emits a `repair_from` edge per material of every repair definition.
pub struct RepairSynthesizer;

impl EdgeSynthesizer<ItemRecord> for RepairSynthesizer {
    fn label(&self) -> &'static str {
        "repair"
    }

    fn synthesize(&self, record: &ItemRecord, _name: &str) -> Synthesized {
        let mut out = Synthesized::default();

        for repair in &record.repairs {
            let level = non_blank(&repair.item_name);
            let mut dependency = Vec::new();
            if let Some(durability) = &repair.durability {
                dependency.push(Tag::Durability {
                    delta: signed_delta(durability),
                });
            }
            if let Some(level) = level {
                dependency.push(Tag::RepairLevel {
                    name: level.to_string(),
                });
            }

            out.push_materials(
                &repair.recipe,
                RelationKind::RepairFrom,
                &dependency,
                level,
                None,
            );
        }

        out
    }
}

/// Renders restored durability as "+25"; text already carrying a sign is kept.
fn signed_delta(durability: &Amount) -> String {
    match durability {
        Amount::Count(n) => format!("+{}", n),
        Amount::Text(text) => {
            let text = text.trim();
            if text.starts_with('+') || text.starts_with('-') {
                text.to_string()
            } else {
                format!("+{}", text)
            }
        }
    }
}
