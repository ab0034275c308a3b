use itemgraph_core::EntityInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Item,
    Trader,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Trader => write!(f, "trader"),
        }
    }
}

/// A named entity in the relation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemNode {
    /// Unique key.
    pub name: String,
    pub node_type: NodeType,
    pub info: EntityInfo,
    /// Created only because something referenced it.
    pub stub: bool,
}

impl ItemNode {
    /// Creates a node backed by a real record.
    pub fn new(name: impl Into<String>, node_type: NodeType, info: EntityInfo) -> Self {
        Self {
            name: name.into(),
            node_type,
            info,
            stub: false,
        }
    }

    /// Creates a placeholder item with no descriptive fields.
    pub fn stub(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::Item,
            info: EntityInfo::default(),
            stub: true,
        }
    }
}
