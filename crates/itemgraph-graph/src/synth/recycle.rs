use super::{EdgeSynthesizer, Synthesized};
use crate::edge::Tag;
use crate::relation::RelationKind;
use itemgraph_core::{non_blank, BreakdownEntry, ItemRecord};

/// Emits `recycle_to` and `salvage_to` edges for each output material.
pub struct BreakdownSynthesizer;

impl EdgeSynthesizer<ItemRecord> for BreakdownSynthesizer {
    fn label(&self) -> &'static str {
        "breakdown"
    }

    fn synthesize(&self, record: &ItemRecord, _name: &str) -> Synthesized {
        let mut out = Synthesized::default();
        let Some(tables) = &record.recycling else {
            return out;
        };

        for entry in &tables.recycling {
            breakdown(&mut out, entry, RelationKind::RecycleTo, |name| {
                Tag::RecycleLevel { name }
            });
        }
        for entry in &tables.salvaging {
            breakdown(&mut out, entry, RelationKind::SalvageTo, |name| {
                Tag::SalvageLevel { name }
            });
        }

        out
    }
}

fn breakdown(
    out: &mut Synthesized,
    entry: &BreakdownEntry,
    relation: RelationKind,
    level_tag: impl Fn(String) -> Tag,
) {
    let level = non_blank(&entry.input);
    let dependency: Vec<Tag> = level.map(|l| level_tag(l.to_string())).into_iter().collect();
    out.push_materials(&entry.materials, relation, &dependency, level, None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Direction;
    use itemgraph_core::{MaterialLine, Recycling};

    #[test]
    fn test_recycle_and_salvage() {
        let mut record = ItemRecord::new("Ferro");
        record.recycling = Some(Recycling {
            recycling: vec![BreakdownEntry {
                input: Some("Ferro I".to_string()),
                materials: vec![
                    MaterialLine::new("Metal Parts", 4),
                    MaterialLine::new("Rubber Parts", 1),
                ],
            }],
            salvaging: vec![BreakdownEntry {
                input: None,
                materials: vec![MaterialLine::new("Metal Parts", 2)],
            }],
        });

        let out = BreakdownSynthesizer.synthesize(&record, "Ferro");

        assert_eq!(out.edges.len(), 3);
        assert!(out.edges.iter().all(|e| e.edge.direction == Direction::Out));

        assert_eq!(out.edges[0].edge.relation, RelationKind::RecycleTo);
        assert_eq!(
            out.edges[0].edge.dependency,
            vec![Tag::RecycleLevel {
                name: "Ferro I".to_string()
            }]
        );
        assert_eq!(out.edges[0].edge.input_level.as_deref(), Some("Ferro I"));

        assert_eq!(out.edges[2].edge.relation, RelationKind::SalvageTo);
        assert!(out.edges[2].edge.dependency.is_empty());
    }

    #[test]
    fn test_no_tables() {
        let out = BreakdownSynthesizer.synthesize(&ItemRecord::new("Rope"), "Rope");
        assert_eq!(out, Synthesized::default());
    }
}
