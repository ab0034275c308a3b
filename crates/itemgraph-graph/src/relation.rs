//! Relation taxonomy.
//!
//! Every relation kind has a fixed owner direction and a designated inverse.
//! Synthesizers only ever emit the forward kinds; the inverse kinds appear
//! when the builder derives reverse edges.

use serde::{Deserialize, Serialize};

/// Flow direction relative to the node that owns the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Material or resource flows into the owner from the target.
    In,
    /// The owner produces or sends to the target.
    Out,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
        }
    }
}

/// The kind of relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Owner is crafted from the target.
    CraftFrom,
    /// Owner is used to craft the target.
    CraftTo,

    /// Owner is upgraded using the target.
    UpgradeFrom,
    /// Owner is used to upgrade the target (or upgrades into itself).
    UpgradeTo,

    /// Owner is repaired using the target.
    RepairFrom,
    /// Owner is used to repair the target.
    RepairTo,

    /// Owner recycles into the target.
    RecycleTo,
    /// Owner is obtained by recycling the target.
    RecycleFrom,

    /// Owner salvages into the target.
    SalvageTo,
    /// Owner is obtained by salvaging the target.
    SalvageFrom,

    /// Owner (a trader) sells the target.
    Trader,
    /// Owner is sold by the target trader.
    SoldBy,
}

impl RelationKind {
    pub const ALL: [RelationKind; 12] = [
        Self::CraftFrom,
        Self::CraftTo,
        Self::UpgradeFrom,
        Self::UpgradeTo,
        Self::RepairFrom,
        Self::RepairTo,
        Self::RecycleTo,
        Self::RecycleFrom,
        Self::SalvageTo,
        Self::SalvageFrom,
        Self::Trader,
        Self::SoldBy,
    ];

    /// The designated inverse. Applying it twice yields the original kind.
    pub fn inverse(self) -> Self {
        match self {
            Self::CraftFrom => Self::CraftTo,
            Self::CraftTo => Self::CraftFrom,
            Self::UpgradeFrom => Self::UpgradeTo,
            Self::UpgradeTo => Self::UpgradeFrom,
            Self::RepairFrom => Self::RepairTo,
            Self::RepairTo => Self::RepairFrom,
            Self::RecycleTo => Self::RecycleFrom,
            Self::RecycleFrom => Self::RecycleTo,
            Self::SalvageTo => Self::SalvageFrom,
            Self::SalvageFrom => Self::SalvageTo,
            Self::Trader => Self::SoldBy,
            Self::SoldBy => Self::Trader,
        }
    }

    /// The direction an edge of this kind has relative to its owner.
    pub fn direction(self) -> Direction {
        match self {
            Self::CraftFrom
            | Self::UpgradeFrom
            | Self::RepairFrom
            | Self::RecycleFrom
            | Self::SalvageFrom
            | Self::SoldBy => Direction::In,
            Self::CraftTo
            | Self::UpgradeTo
            | Self::RepairTo
            | Self::RecycleTo
            | Self::SalvageTo
            | Self::Trader => Direction::Out,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CraftFrom => "craft_from",
            Self::CraftTo => "craft_to",
            Self::UpgradeFrom => "upgrade_from",
            Self::UpgradeTo => "upgrade_to",
            Self::RepairFrom => "repair_from",
            Self::RepairTo => "repair_to",
            Self::RecycleTo => "recycle_to",
            Self::RecycleFrom => "recycle_from",
            Self::SalvageTo => "salvage_to",
            Self::SalvageFrom => "salvage_from",
            Self::Trader => "trader",
            Self::SoldBy => "sold_by",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Looks up the inverse relation and the direction the inverse edge takes.
pub fn inverse_of(relation: RelationKind) -> (RelationKind, Direction) {
    let inverse = relation.inverse();
    (inverse, inverse.direction())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_is_involution() {
        for kind in RelationKind::ALL {
            assert_eq!(kind.inverse().inverse(), kind);
            assert_ne!(kind.inverse(), kind);
        }
    }

    #[test]
    fn test_inverse_flips_direction() {
        for kind in RelationKind::ALL {
            let (inverse, direction) = inverse_of(kind);
            assert_eq!(direction, kind.direction().opposite());
            assert_eq!(direction, inverse.direction());
        }
    }

    #[test]
    fn test_taxonomy_table() {
        let table = [
            (RelationKind::CraftFrom, RelationKind::CraftTo, Direction::In),
            (RelationKind::UpgradeFrom, RelationKind::UpgradeTo, Direction::In),
            (RelationKind::RepairFrom, RelationKind::RepairTo, Direction::In),
            (RelationKind::RecycleTo, RelationKind::RecycleFrom, Direction::Out),
            (RelationKind::SalvageTo, RelationKind::SalvageFrom, Direction::Out),
            (RelationKind::Trader, RelationKind::SoldBy, Direction::Out),
        ];
        for (forward, inverse, direction) in table {
            assert_eq!(forward.inverse(), inverse);
            assert_eq!(forward.direction(), direction);
            assert_eq!(inverse_of(forward), (inverse, direction.opposite()));
        }
    }

    #[test]
    fn test_serde_names_match_display() {
        for kind in RelationKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
        assert_eq!(serde_json::to_string(&Direction::In).unwrap(), "\"in\"");
    }
}
