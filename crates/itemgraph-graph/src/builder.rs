//! Graph builder for constructing the relation graph from records.
//!
//! The builder runs in two passes:
//! 1. Add records. Each record becomes (or merges into) a node, and the
//!    forward edges its synthesizers produce are staged against it.
//! 2. Resolve. Every reverse edge is derived from the staged forward edges
//!    into a separate list, then forward and reverse edges are committed,
//!    creating stub nodes for targets nothing defined.

use crate::edge::Edge;
use crate::graph::{ItemGraph, NodeId};
use crate::node::{ItemNode, NodeType};
use crate::stats::BuildReport;
use crate::synth::{synthesize_item, EdgeSynthesizer, Synthesized, TradeSynthesizer};
use itemgraph_core::{non_blank, Amount, EntityInfo, ItemRecord, TraderRecord};
use tracing::{debug, info, warn};

/// A forward edge waiting for the resolve pass.
#[derive(Debug, Clone)]
struct PendingEdge {
    owner: NodeId,
    target: String,
    edge: Edge,
}

/// Builds an ItemGraph from item and trader records.
///
/// Call `add_items` and `add_traders` as often as needed, then `build`.
/// Adding the same records again does not add the same edges again.
pub struct GraphBuilder {
    graph: ItemGraph,
    /// Forward edges in the order they were synthesized.
    pending: Vec<PendingEdge>,
    report: BuildReport,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            graph: ItemGraph::new(),
            pending: Vec::new(),
            report: BuildReport::default(),
        }
    }

    /// Adds item records: one node per name, edges in craft, upgrade,
    /// repair, breakdown order.
    pub fn add_items(&mut self, records: &[ItemRecord]) {
        for record in records {
            let Some(name) = non_blank(&record.name) else {
                self.report.records_skipped += 1;
                continue;
            };
            let owner = self.add_record(name, NodeType::Item, record.info());
            let synthesized = synthesize_item(record, name);
            self.stage(owner, synthesized);
        }
    }

    /// Adds trader records. Their shop listings become `trader` edges.
    pub fn add_traders(&mut self, records: &[TraderRecord]) {
        for record in records {
            let Some(name) = non_blank(&record.name) else {
                self.report.records_skipped += 1;
                continue;
            };
            let owner = self.add_record(name, NodeType::Trader, record.info());
            let synthesized = TradeSynthesizer.synthesize(record, name);
            self.stage(owner, synthesized);
        }
    }

    /// Returns the node for a record, creating it on first sight.
    ///
    /// A later record with the same name keeps the first one's node type
    /// and descriptive fields; only its edges are added.
    fn add_record(&mut self, name: &str, node_type: NodeType, info: EntityInfo) -> NodeId {
        if let Some(index) = self.graph.get_index(name) {
            if !self.report.duplicate_records.iter().any(|seen| seen == name) {
                warn!("Duplicate record '{}', keeping the first", name);
                self.report.duplicate_records.push(name.to_string());
            } else {
                debug!("Merging another record into '{}'", name);
            }
            return index;
        }
        self.graph.add_node(ItemNode::new(name, node_type, info))
    }

    fn stage(&mut self, owner: NodeId, synthesized: Synthesized) {
        self.report.entries_dropped += synthesized.dropped;
        self.report.upgrades_skipped += synthesized.skipped_upgrades;
        self.report.text_quantities += synthesized
            .edges
            .iter()
            .filter(|forward| forward.edge.quantity.as_ref().is_some_and(Amount::is_text))
            .count();
        self.pending
            .extend(synthesized.edges.into_iter().map(|forward| PendingEdge {
                owner,
                target: forward.target,
                edge: forward.edge,
            }));
    }

    /// Commits the staged forward edges and their reverses.
    ///
    /// All reverse edges are derived before anything is committed, so a
    /// reverse edge is never itself reversed.
    fn resolve_reverse_edges(&mut self) {
        let pending = std::mem::take(&mut self.pending);

        // Phase 1: derive.
        let mut reverses = Vec::with_capacity(pending.len());
        for staged in &pending {
            reverses.push((staged.target.clone(), staged.owner, staged.edge.reversed()));
        }

        // Phase 2: commit forward edges, then their reverses.
        for staged in pending {
            let (target, created) = self.graph.get_or_insert_stub(&staged.target);
            if created {
                debug!("Created stub node '{}'", staged.target);
                self.report.stubs_created += 1;
            }
            if self.graph.add_edge(staged.owner, target, staged.edge) {
                self.report.forward_edges += 1;
            } else {
                self.report.duplicate_edges += 1;
            }
        }

        for (owner_name, target, edge) in reverses {
            let Some(owner) = self.graph.get_index(&owner_name) else {
                continue;
            };
            if self.graph.add_edge(owner, target, edge) {
                self.report.reverse_edges += 1;
            } else {
                self.report.duplicate_edges += 1;
            }
        }

        info!(
            "Resolved {} forward and {} reverse edges ({} stubs, {} duplicates skipped)",
            self.report.forward_edges,
            self.report.reverse_edges,
            self.report.stubs_created,
            self.report.duplicate_edges
        );
    }

    /// Finishes building and returns the graph.
    pub fn build(mut self) -> ItemGraph {
        self.resolve_reverse_edges();
        info!(
            "Built graph with {} nodes and {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        if self.report.entries_dropped > 0 || self.report.upgrades_skipped > 0 {
            debug!(
                "Dropped {} unnamed entries, skipped {} upgrades",
                self.report.entries_dropped, self.report.upgrades_skipped
            );
        }
        self.graph.set_report(self.report);
        self.graph
    }
}

/// Builds the graph for a set of items and, optionally, traders.
///
/// Without traders the graph has no trader nodes and no `trader` or
/// `sold_by` edges.
pub fn build(items: &[ItemRecord], traders: Option<&[TraderRecord]>) -> ItemGraph {
    let mut builder = GraphBuilder::new();
    builder.add_items(items);
    if let Some(traders) = traders {
        builder.add_traders(traders);
    }
    builder.build()
}
