//! Itemgraph Core - input records for the relation graph
//!
//! This crate defines the flat per-entity records that upstream scrapers
//! produce (items with their recipe tables, traders with their shops) and
//! the helpers to load, correct and deduplicate them. It knows nothing about
//! the graph; `itemgraph-graph` consumes these records.
//!
//! # Example
//!
//! ```
//! use itemgraph_core::{ItemRecord, MaterialLine, Record};
//!
//! let mut record = ItemRecord::new("Anvil");
//! record.crafting.push(Default::default());
//! record.crafting[0].recipe.push(MaterialLine::new("Metal Parts", 6));
//! assert_eq!(record.name(), Some("Anvil"));
//! ```

mod amount;
mod corrections;
mod error;
mod load;
mod record;

pub use amount::Amount;
pub use corrections::Corrections;
pub use error::{LoadError, Result};
pub use load::{dedupe_records, load_items, load_traders, read_json, write_json, Deduped};
pub use record::{
    non_blank, BreakdownEntry, CraftRecipe, EntityInfo, ItemRecord, MaterialLine, Record,
    Recycling, RepairRecipe, ShopEntry, TraderRecord, UpgradeRecipe,
};
