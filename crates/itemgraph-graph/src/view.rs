//! Serializable snapshot of a built graph.
//!
//! A `GraphView` is what gets written out: an ordered array of nodes, each
//! with its descriptive fields and its owned edges. It can also be read
//! back and checked against the graph invariants.

use crate::edge::Edge;
use crate::node::NodeType;
use crate::relation::{Direction, RelationKind};
use crate::stats::GraphStats;
use itemgraph_core::EntityInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub name: String,
    pub node_type: NodeType,
    #[serde(flatten)]
    pub info: EntityInfo,
    #[serde(default, skip_serializing_if = "is_false")]
    pub stub: bool,
    #[serde(default)]
    pub edges: Vec<EdgeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    pub target: String,
    #[serde(flatten)]
    pub edge: Edge,
}

impl EdgeView {
    pub fn new(target: impl Into<String>, edge: Edge) -> Self {
        Self {
            target: target.into(),
            edge,
        }
    }
}

/// A broken graph invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("node '{name}' appears more than once")]
    DuplicateNode { name: String },

    #[error("edge {owner} -> {target} ({relation}) points at a missing node")]
    OrphanTarget {
        owner: String,
        target: String,
        relation: RelationKind,
    },

    #[error("edge {owner} -> {target} has relation {relation} but direction {direction}")]
    DirectionMismatch {
        owner: String,
        target: String,
        relation: RelationKind,
        direction: Direction,
    },

    #[error("edge {owner} -> {target} ({relation}) has no matching reverse edge")]
    MissingReverse {
        owner: String,
        target: String,
        relation: RelationKind,
    },
}

impl GraphView {
    pub fn node(&self, name: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats::default();
        for node in &self.nodes {
            stats.record_node(node.node_type, node.stub);
            for edge in &node.edges {
                stats.record_edge(edge.edge.relation);
            }
        }
        stats
    }

    /// Checks name uniqueness, relation/direction pairing, that every
    /// target resolves, and that every edge has its reverse on the target.
    pub fn validate(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();
        let mut by_name: HashMap<&str, &NodeView> = HashMap::with_capacity(self.nodes.len());

        for node in &self.nodes {
            if by_name.insert(node.name.as_str(), node).is_some() {
                violations.push(InvariantViolation::DuplicateNode {
                    name: node.name.clone(),
                });
            }
        }

        for node in &self.nodes {
            for edge in &node.edges {
                let relation = edge.edge.relation;
                if edge.edge.direction != relation.direction() {
                    violations.push(InvariantViolation::DirectionMismatch {
                        owner: node.name.clone(),
                        target: edge.target.clone(),
                        relation,
                        direction: edge.edge.direction,
                    });
                }

                let Some(target) = by_name.get(edge.target.as_str()) else {
                    violations.push(InvariantViolation::OrphanTarget {
                        owner: node.name.clone(),
                        target: edge.target.clone(),
                        relation,
                    });
                    continue;
                };

                let expected = edge.edge.reversed();
                let closed = target
                    .edges
                    .iter()
                    .any(|back| back.target == node.name && back.edge == expected);
                if !closed {
                    violations.push(InvariantViolation::MissingReverse {
                        owner: node.name.clone(),
                        target: edge.target.clone(),
                        relation,
                    });
                }
            }
        }

        violations
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemgraph_core::Amount;
    use serde_json::json;

    fn node(name: &str, edges: Vec<EdgeView>) -> NodeView {
        NodeView {
            name: name.to_string(),
            node_type: NodeType::Item,
            info: EntityInfo::default(),
            stub: false,
            edges,
        }
    }

    fn craft(target: &str) -> EdgeView {
        EdgeView::new(
            target,
            Edge::new(RelationKind::CraftFrom).with_quantity(Some(Amount::Count(2))),
        )
    }

    #[test]
    fn test_closed_pair_is_valid() {
        let forward = craft("B");
        let reverse = EdgeView::new("A", forward.edge.reversed());
        let view = GraphView {
            nodes: vec![node("A", vec![forward]), node("B", vec![reverse])],
        };
        assert!(view.validate().is_empty());
    }

    #[test]
    fn test_missing_reverse_and_orphan() {
        let view = GraphView {
            nodes: vec![node("A", vec![craft("B"), craft("Z")]), node("B", vec![])],
        };

        let violations = view.validate();

        assert_eq!(violations.len(), 2);
        assert!(matches!(
            &violations[0],
            InvariantViolation::MissingReverse { target, .. } if target == "B"
        ));
        assert!(matches!(
            &violations[1],
            InvariantViolation::OrphanTarget { target, .. } if target == "Z"
        ));
    }

    #[test]
    fn test_reverse_must_match_quantity() {
        let forward = craft("B");
        let mut reverse = forward.edge.reversed();
        reverse.quantity = Some(Amount::Count(3));
        let view = GraphView {
            nodes: vec![node("A", vec![forward]), node("B", vec![EdgeView::new("A", reverse)])],
        };
        // Both directions lack a matching partner.
        assert_eq!(view.validate().len(), 2);
    }

    #[test]
    fn test_direction_mismatch_and_duplicates() {
        let mut edge = Edge::new(RelationKind::RecycleTo);
        edge.direction = Direction::In;
        let view = GraphView {
            nodes: vec![node("A", vec![EdgeView::new("A", edge)]), node("A", vec![])],
        };

        let violations = view.validate();

        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::DuplicateNode { name } if name == "A")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::DirectionMismatch { .. })));
    }

    #[test]
    fn test_json_round_trip_shape() {
        let value = json!([
            {
                "name": "A",
                "node_type": "item",
                "wiki_url": "https://wiki.example/A",
                "edges": [{
                    "target": "B",
                    "direction": "in",
                    "relation": "craft_from",
                    "quantity": 2,
                    "dependency": [{"type": "workshop", "name": "Workbench"}]
                }]
            },
            {"name": "B", "node_type": "item", "stub": true, "edges": []}
        ]);

        let view: GraphView = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(view.nodes.len(), 2);
        assert!(view.nodes[1].stub);
        assert_eq!(view.nodes[0].edges[0].edge.relation, RelationKind::CraftFrom);
        assert_eq!(serde_json::to_value(&view).unwrap(), value);
    }
}
