//! Edge and tag types for the relation graph.
//!
//! An edge is owned by one node and points at another by name. Its
//! direction, relation and levels are all relative to the owner, so the
//! reverse of an edge is another edge owned by the target.

use crate::relation::{inverse_of, Direction, RelationKind};
use itemgraph_core::Amount;
use serde::{Deserialize, Serialize};

/// Descriptive annotation on an edge: what gates or qualifies the relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tag {
    /// Facility the action happens at.
    Workshop { name: String },
    /// The recipe needs a blueprint unlock first.
    Blueprint { required: bool },
    /// Leveled variant a crafting recipe yields.
    ResultLevel { name: String },
    UpgradeLevel { from: String, to: String },
    /// Perks granted by an upgrade.
    Perks { perks: Vec<String> },
    /// Durability restored by a repair, as a signed delta ("+25").
    Durability { delta: String },
    RepairLevel { name: String },
    RecycleLevel { name: String },
    SalvageLevel { name: String },
    Price {
        amount: Amount,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        currency: Option<String>,
    },
    Stock {
        value: Amount,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_limited: Option<bool>,
    },
    AmmoCount { value: Amount },
}

/// A relation as seen from its owning node.
///
/// The target is not stored here: in the graph it is the far endpoint, in
/// synthesizer output it lives on [`ForwardEdge`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub direction: Direction,
    pub relation: RelationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Amount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependency: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_level: Option<String>,
}

impl Edge {
    /// Creates an edge whose direction follows the relation's taxonomy entry.
    pub fn new(relation: RelationKind) -> Self {
        Self {
            direction: relation.direction(),
            relation,
            quantity: None,
            dependency: Vec::new(),
            input_level: None,
            output_level: None,
        }
    }

    pub fn with_quantity(mut self, quantity: Option<Amount>) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_dependency(mut self, dependency: Vec<Tag>) -> Self {
        self.dependency = dependency;
        self
    }

    pub fn with_levels(mut self, input: Option<String>, output: Option<String>) -> Self {
        self.input_level = input;
        self.output_level = output;
        self
    }

    /// The edge the target owns in return: inverse relation, opposite
    /// direction, same quantity and dependency, levels swapped.
    pub fn reversed(&self) -> Edge {
        let (relation, direction) = inverse_of(self.relation);
        Edge {
            direction,
            relation,
            quantity: self.quantity.clone(),
            dependency: self.dependency.clone(),
            input_level: self.output_level.clone(),
            output_level: self.input_level.clone(),
        }
    }
}

/// A synthesized edge together with the name of the node it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardEdge {
    pub target: String,
    pub edge: Edge,
}

impl ForwardEdge {
    pub fn new(target: impl Into<String>, edge: Edge) -> Self {
        Self {
            target: target.into(),
            edge,
        }
    }
}
