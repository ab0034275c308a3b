use super::{gate_tags, EdgeSynthesizer, Synthesized};
use crate::edge::Tag;
use crate::relation::RelationKind;
use itemgraph_core::{non_blank, ItemRecord};

/// Emits a `craft_from` edge per material of every crafting recipe.
pub struct CraftSynthesizer;

impl EdgeSynthesizer<ItemRecord> for CraftSynthesizer {
    fn label(&self) -> &'static str {
        "craft"
    }

    fn synthesize(&self, record: &ItemRecord, _name: &str) -> Synthesized {
        let mut out = Synthesized::default();

        for recipe in &record.crafting {
            let result_level = non_blank(&recipe.result_level);
            let mut dependency =
                gate_tags(non_blank(&recipe.workshop), recipe.blueprint_locked);
            if let Some(level) = result_level {
                dependency.push(Tag::ResultLevel {
                    name: level.to_string(),
                });
            }

            out.push_materials(
                &recipe.recipe,
                RelationKind::CraftFrom,
                &dependency,
                None,
                result_level,
            );
        }

        out
    }
}
