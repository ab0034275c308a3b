//! Core graph data structure.
//!
//! The ItemGraph wraps petgraph and adds a name index. An edge owned by
//! node A that points at node B is stored as a petgraph edge A→B; its weight
//! is relative to A. The reverse edge B owns is a separate petgraph edge B→A.

use crate::edge::Edge;
use crate::node::ItemNode;
use crate::stats::{BuildReport, GraphStats};
use crate::view::{EdgeView, GraphView, InvariantViolation, NodeView};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// The item/trader relation graph.
///
/// Only [`GraphBuilder`](crate::GraphBuilder) mutates it; once built it is
/// read-only.
#[derive(Debug)]
pub struct ItemGraph {
    graph: DiGraph<ItemNode, Edge>,

    /// Maps node names to graph node indexes.
    name_index: HashMap<String, NodeId>,

    report: BuildReport,
}

impl ItemGraph {
    pub(crate) fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
            report: BuildReport::default(),
        }
    }

    /// Adds a node. The caller guarantees its name is not indexed yet.
    pub(crate) fn add_node(&mut self, node: ItemNode) -> NodeId {
        let name = node.name.clone();
        let index = self.graph.add_node(node);
        self.name_index.insert(name, index);
        index
    }

    /// Returns the node for `name`, creating a stub item if there is none.
    ///
    /// The flag is true when a stub was created.
    pub(crate) fn get_or_insert_stub(&mut self, name: &str) -> (NodeId, bool) {
        match self.name_index.get(name) {
            Some(index) => (*index, false),
            None => (self.add_node(ItemNode::stub(name)), true),
        }
    }

    /// Adds an owner-relative edge unless the owner already has an equal one
    /// to the same target. Returns whether the edge was added.
    pub(crate) fn add_edge(&mut self, owner: NodeId, target: NodeId, edge: Edge) -> bool {
        if self
            .graph
            .edges_connecting(owner, target)
            .any(|existing| existing.weight() == &edge)
        {
            return false;
        }
        self.graph.add_edge(owner, target, edge);
        true
    }

    pub(crate) fn set_report(&mut self, report: BuildReport) {
        self.report = report;
    }

    /// Gets the node index for a name.
    pub fn get_index(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Gets a node by its graph index.
    pub fn get(&self, index: NodeId) -> Option<&ItemNode> {
        self.graph.node_weight(index)
    }

    /// Gets a node by name.
    pub fn get_by_name(&self, name: &str) -> Option<&ItemNode> {
        self.get(self.get_index(name)?)
    }

    /// Edges owned by a node, in the order they were added, with the name
    /// of the node each one points at.
    pub fn edges_of(&self, index: NodeId) -> Vec<(&str, &Edge)> {
        let mut edges: Vec<_> = self.graph.edges(index).collect();
        edges.sort_by_key(|edge_ref| edge_ref.id());
        edges
            .into_iter()
            .filter_map(|edge_ref| {
                let target = self.graph.node_weight(edge_ref.target())?;
                Some((target.name.as_str(), edge_ref.weight()))
            })
            .collect()
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ItemNode> {
        self.graph.node_weights()
    }

    /// Iterates over all node indexes.
    pub fn node_indexes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// What the build absorbed along the way (skipped records, dropped
    /// entries, duplicates).
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Returns node and edge counts.
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats::default();
        for node in self.nodes() {
            stats.record_node(node.node_type, node.stub);
        }
        for edge in self.graph.edge_weights() {
            stats.record_edge(edge.relation);
        }
        stats
    }

    /// Snapshots the graph as a serializable sequence of nodes.
    pub fn view(&self) -> GraphView {
        let nodes = self
            .node_indexes()
            .filter_map(|index| {
                let node = self.get(index)?;
                let edges = self
                    .edges_of(index)
                    .into_iter()
                    .map(|(target, edge)| EdgeView::new(target, edge.clone()))
                    .collect();
                Some(NodeView {
                    name: node.name.clone(),
                    node_type: node.node_type,
                    info: node.info.clone(),
                    stub: node.stub,
                    edges,
                })
            })
            .collect();
        GraphView { nodes }
    }

    /// Checks the structural invariants of the built graph.
    pub fn validate(&self) -> Vec<InvariantViolation> {
        self.view().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;
    use crate::relation::RelationKind;
    use itemgraph_core::EntityInfo;

    #[test]
    fn test_stub_lookup() {
        let mut graph = ItemGraph::new();
        let rope = graph.add_node(ItemNode::new("Rope", NodeType::Item, EntityInfo::default()));

        assert_eq!(graph.get_or_insert_stub("Rope"), (rope, false));
        let (fabric, created) = graph.get_or_insert_stub("Fabric");
        assert!(created);
        assert!(graph.get(fabric).unwrap().stub);
        assert_eq!(graph.get_by_name("Fabric").unwrap().node_type, NodeType::Item);
    }

    #[test]
    fn test_add_edge_skips_equal_edge() {
        let mut graph = ItemGraph::new();
        let (a, _) = graph.get_or_insert_stub("A");
        let (b, _) = graph.get_or_insert_stub("B");

        assert!(graph.add_edge(a, b, Edge::new(RelationKind::CraftFrom)));
        assert!(!graph.add_edge(a, b, Edge::new(RelationKind::CraftFrom)));
        assert!(graph.add_edge(a, b, Edge::new(RelationKind::RepairFrom)));
        assert!(graph.add_edge(b, a, Edge::new(RelationKind::CraftFrom)));

        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_edges_of_keeps_insertion_order() {
        let mut graph = ItemGraph::new();
        let (a, _) = graph.get_or_insert_stub("A");
        let (b, _) = graph.get_or_insert_stub("B");
        let (c, _) = graph.get_or_insert_stub("C");
        graph.add_edge(a, b, Edge::new(RelationKind::CraftFrom));
        graph.add_edge(a, c, Edge::new(RelationKind::UpgradeFrom));
        graph.add_edge(a, a, Edge::new(RelationKind::UpgradeTo));

        let order: Vec<_> = graph
            .edges_of(a)
            .into_iter()
            .map(|(target, edge)| (target, edge.relation))
            .collect();
        assert_eq!(
            order,
            vec![
                ("B", RelationKind::CraftFrom),
                ("C", RelationKind::UpgradeFrom),
                ("A", RelationKind::UpgradeTo),
            ]
        );
    }
}
