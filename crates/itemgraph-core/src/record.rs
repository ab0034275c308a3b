//! Input record types.
//!
//! One record describes one entity: an item with its crafting, upgrade,
//! repair and breakdown tables, or a trader with a shop listing. Every field
//! except the tables is optional, since upstream pages are often incomplete.
//! Keys this crate does not model are kept in `extra` so records can be
//! written back out unchanged.

use crate::amount::Amount;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Anything keyed by an entity name.
pub trait Record {
    /// The canonical name, or `None` if it is missing or blank.
    fn name(&self) -> Option<&str>;
}

/// Descriptive fields shared by items and traders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

/// One material line of a recipe: `quantity × item`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Amount>,
}

impl MaterialLine {
    pub fn new(item: impl Into<String>, quantity: u64) -> Self {
        Self {
            item: Some(item.into()),
            quantity: Some(Amount::Count(quantity)),
        }
    }

    pub fn item_name(&self) -> Option<&str> {
        non_blank(&self.item)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CraftRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub blueprint_locked: bool,
    /// Leveled variant this recipe yields, e.g. "Ferro I".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_level: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipe: Vec<MaterialLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub blueprint_locked: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub upgrade_perks: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipe: Vec<MaterialLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepairRecipe {
    /// Leveled item being repaired, e.g. "Ferro II".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    /// Durability restored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<Amount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipe: Vec<MaterialLine>,
}

/// One breakdown yield table (recycling or salvaging).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// Leveled item being broken down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub materials: Vec<MaterialLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recycling {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub recycling: Vec<BreakdownEntry>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub salvaging: Vec<BreakdownEntry>,
}

/// A single item and everything that produces, consumes or breaks it down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<BTreeMap<String, String>>,
    #[serde(default, alias = "infobox", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub crafting: Vec<CraftRecipe>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub upgrades: Vec<UpgradeRecipe>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub repairs: Vec<RepairRecipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recycling: Option<Recycling>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Clones the descriptive fields that seed a graph node.
    pub fn info(&self) -> EntityInfo {
        EntityInfo {
            wiki_url: self.wiki_url.clone(),
            source_url: self.source_url.clone(),
            image_urls: self.image_urls.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

impl Record for ItemRecord {
    fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

/// One listing in a trader's shop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Remaining stock, usually a fraction like "3/3".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_limited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo_count: Option<Amount>,
}

impl ShopEntry {
    pub fn item_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

/// A trader and its shop listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<BTreeMap<String, String>>,
    #[serde(default, alias = "infobox", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shop: Vec<ShopEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TraderRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn info(&self) -> EntityInfo {
        EntityInfo {
            wiki_url: self.wiki_url.clone(),
            source_url: self.source_url.clone(),
            image_urls: self.image_urls.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

impl Record for TraderRecord {
    fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

/// Returns the trimmed-non-empty contents of an optional string field.
pub fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
