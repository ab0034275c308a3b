use super::{gate_tags, EdgeSynthesizer, Synthesized};
use crate::edge::{Edge, ForwardEdge, Tag};
use crate::relation::RelationKind;
use itemgraph_core::{non_blank, ItemRecord};
use tracing::debug;

/// Emits `upgrade_from` edges per material plus one self-referencing
/// `upgrade_to` edge per upgrade step.
pub struct UpgradeSynthesizer;

impl EdgeSynthesizer<ItemRecord> for UpgradeSynthesizer {
    fn label(&self) -> &'static str {
        "upgrade"
    }

    fn synthesize(&self, record: &ItemRecord, name: &str) -> Synthesized {
        let mut out = Synthesized::default();

        for upgrade in &record.upgrades {
            let (Some(input), Some(output)) = (
                non_blank(&upgrade.input_level),
                non_blank(&upgrade.output_level),
            ) else {
                debug!("Skipping upgrade of '{}' without both levels", name);
                out.skipped_upgrades += 1;
                continue;
            };

            let mut dependency =
                gate_tags(non_blank(&upgrade.workshop), upgrade.blueprint_locked);
            dependency.push(Tag::UpgradeLevel {
                from: input.to_string(),
                to: output.to_string(),
            });

            out.push_materials(
                &upgrade.recipe,
                RelationKind::UpgradeFrom,
                &dependency,
                Some(input),
                Some(output),
            );

            if !upgrade.upgrade_perks.is_empty() {
                dependency.push(Tag::Perks {
                    perks: upgrade.upgrade_perks.clone(),
                });
            }
            let step = Edge::new(RelationKind::UpgradeTo)
                .with_dependency(dependency)
                .with_levels(Some(input.to_string()), Some(output.to_string()));
            out.edges.push(ForwardEdge::new(name, step));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Direction;
    use itemgraph_core::{Amount, MaterialLine, UpgradeRecipe};

    fn upgrade(input: Option<&str>, output: Option<&str>) -> UpgradeRecipe {
        UpgradeRecipe {
            input_level: input.map(str::to_string),
            output_level: output.map(str::to_string),
            workshop: Some("Gunsmith 2".to_string()),
            upgrade_perks: vec!["+15% fire rate".to_string()],
            recipe: vec![MaterialLine::new("C", 1)],
            ..Default::default()
        }
    }

    #[test]
    fn test_material_and_self_edges() {
        let mut record = ItemRecord::new("A");
        record.upgrades.push(upgrade(Some("Mk1"), Some("Mk2")));

        let out = UpgradeSynthesizer.synthesize(&record, "A");

        assert_eq!(out.edges.len(), 2);

        let material = &out.edges[0];
        assert_eq!(material.target, "C");
        assert_eq!(material.edge.relation, RelationKind::UpgradeFrom);
        assert_eq!(material.edge.direction, Direction::In);
        assert_eq!(material.edge.quantity, Some(Amount::Count(1)));
        assert_eq!(material.edge.input_level.as_deref(), Some("Mk1"));
        assert_eq!(material.edge.output_level.as_deref(), Some("Mk2"));
        assert!(!material
            .edge
            .dependency
            .iter()
            .any(|t| matches!(t, Tag::Perks { .. })));

        let step = &out.edges[1];
        assert_eq!(step.target, "A");
        assert_eq!(step.edge.relation, RelationKind::UpgradeTo);
        assert_eq!(step.edge.direction, Direction::Out);
        assert_eq!(step.edge.quantity, None);
        assert_eq!(step.edge.input_level.as_deref(), Some("Mk1"));
        assert_eq!(step.edge.output_level.as_deref(), Some("Mk2"));
        assert_eq!(
            step.edge.dependency,
            vec![
                Tag::Workshop {
                    name: "Gunsmith 2".to_string()
                },
                Tag::UpgradeLevel {
                    from: "Mk1".to_string(),
                    to: "Mk2".to_string()
                },
                Tag::Perks {
                    perks: vec!["+15% fire rate".to_string()]
                },
            ]
        );
    }

    #[test]
    fn test_missing_level_skips_upgrade() {
        let mut record = ItemRecord::new("A");
        record.upgrades.push(upgrade(Some("Mk1"), None));
        record.upgrades.push(upgrade(None, Some("Mk2")));

        let out = UpgradeSynthesizer.synthesize(&record, "A");

        assert!(out.edges.is_empty());
        assert_eq!(out.skipped_upgrades, 2);
    }
}
