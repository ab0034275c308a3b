//! Build statistics.

use crate::node::NodeType;
use crate::relation::RelationKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything a build absorbed instead of failing on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    /// Records skipped for lacking a name.
    pub records_skipped: usize,
    /// Material and shop entries skipped for lacking a name.
    pub entries_dropped: usize,
    /// Upgrades skipped for lacking an input or output level.
    pub upgrades_skipped: usize,
    /// Forward edges whose quantity was kept as text.
    pub text_quantities: usize,
    /// Names that more than one record claimed, in order of first collision.
    pub duplicate_records: Vec<String>,
    /// Edges not added because the owner already had an equal one.
    pub duplicate_edges: usize,
    pub forward_edges: usize,
    pub reverse_edges: usize,
    pub stubs_created: usize,
}

/// Graph shape: node and edge counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub item_count: usize,
    pub trader_count: usize,
    pub stub_count: usize,
    pub edge_count: usize,
    pub relations: BTreeMap<RelationKind, usize>,
}

impl GraphStats {
    pub(crate) fn record_node(&mut self, node_type: NodeType, stub: bool) {
        self.node_count += 1;
        match node_type {
            NodeType::Item => self.item_count += 1,
            NodeType::Trader => self.trader_count += 1,
        }
        if stub {
            self.stub_count += 1;
        }
    }

    pub(crate) fn record_edge(&mut self, relation: RelationKind) {
        self.edge_count += 1;
        *self.relations.entry(relation).or_default() += 1;
    }

    pub fn average_edges_per_node(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.edge_count as f64 / self.node_count as f64
        }
    }

    /// Edge count for one relation kind.
    pub fn relation_count(&self, relation: RelationKind) -> usize {
        self.relations.get(&relation).copied().unwrap_or(0)
    }
}
