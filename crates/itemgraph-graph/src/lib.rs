//! Itemgraph Graph - item and trader relation graph
//!
//! This crate turns item and trader records into a directed, typed
//! multigraph. Every relation a record states (crafting, upgrades, repairs,
//! recycling, salvaging, shop listings) becomes a forward edge on the
//! record's node, and every forward edge gets its inverse on the node it
//! points at.
//!
//! # Architecture
//!
//! - `relation`: the relation taxonomy (inverse and owner direction)
//! - `synth`: one synthesizer per record section, pure record-to-edges maps
//! - `builder`: node table, staged forward edges, reverse-edge resolution
//! - `graph`: petgraph storage with a name index, read-only once built
//! - `view`: the serializable node list and invariant checks
//!
//! # Example
//!
//! ```
//! use itemgraph_core::{CraftRecipe, ItemRecord, MaterialLine};
//! use itemgraph_graph::{build, RelationKind};
//!
//! let mut anvil = ItemRecord::new("Anvil");
//! anvil.crafting.push(CraftRecipe {
//!     workshop: Some("Workbench".to_string()),
//!     recipe: vec![MaterialLine::new("Metal Parts", 6)],
//!     ..Default::default()
//! });
//!
//! let graph = build(&[anvil], None);
//! let view = graph.view();
//!
//! let parts = view.node("Metal Parts").unwrap();
//! assert!(parts.stub);
//! assert_eq!(parts.edges[0].edge.relation, RelationKind::CraftTo);
//! assert!(view.validate().is_empty());
//! ```

mod builder;
mod edge;
mod graph;
mod node;
mod relation;
mod stats;
pub mod synth;
mod view;

pub use builder::{build, GraphBuilder};
pub use edge::{Edge, ForwardEdge, Tag};
pub use graph::{ItemGraph, NodeId};
pub use node::{ItemNode, NodeType};
pub use relation::{inverse_of, Direction, RelationKind};
pub use stats::{BuildReport, GraphStats};
pub use view::{EdgeView, GraphView, InvariantViolation, NodeView};
