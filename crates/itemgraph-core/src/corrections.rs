//! Manual corrections applied to item records before a build.
//!
//! Scraped pages sometimes misclassify items or miss a price or image. A
//! corrections document patches the records' attributes by item name:
//!
//! ```json
//! {
//!   "types": { "Shield": ["Light Shield", "Heavy Shield"] },
//!   "special_types": { "Quest Item": ["Rusted Gear"] },
//!   "prices": { "Magnetron": 6000 },
//!   "images": { "Radio Relay": "https://wiki.example/Radio_Relay.png" }
//! }
//! ```

use crate::error::Result;
use crate::load::read_json;
use crate::record::{ItemRecord, Record};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Corrections {
    /// Item type → items that should carry it as `attributes.type`.
    pub types: BTreeMap<String, Vec<String>>,
    /// Special type → items listing it under `attributes.special_types`.
    pub special_types: BTreeMap<String, Vec<String>>,
    /// Item → `attributes.sellprice`.
    pub prices: BTreeMap<String, u64>,
    /// Item → `image_urls.thumb`.
    pub images: BTreeMap<String, String>,
}

impl Corrections {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.special_types.is_empty()
            && self.prices.is_empty()
            && self.images.is_empty()
    }

    /// Applies every correction to the matching records.
    ///
    /// Every named record ends up with an attribute map. Returns the number
    /// of fields updated.
    pub fn apply(&self, records: &mut [ItemRecord]) -> usize {
        let mut updated = 0;
        let mut matched: BTreeSet<String> = BTreeSet::new();

        for record in records.iter_mut() {
            let Some(name) = record.name().map(str::to_string) else {
                continue;
            };
            let attributes = record.attributes.get_or_insert_with(Map::new);

            for (item_type, names) in &self.types {
                if names.contains(&name) {
                    attributes.insert("type".to_string(), Value::String(item_type.clone()));
                    updated += 1;
                    matched.insert(name.clone());
                }
            }

            let specials: Vec<Value> = self
                .special_types
                .iter()
                .filter(|(_, names)| names.contains(&name))
                .map(|(special, _)| Value::String(special.clone()))
                .collect();
            if !specials.is_empty() {
                attributes.insert("special_types".to_string(), Value::Array(specials));
                updated += 1;
                matched.insert(name.clone());
            }

            if let Some(price) = self.prices.get(&name) {
                attributes.insert("sellprice".to_string(), Value::from(*price));
                updated += 1;
                matched.insert(name.clone());
            }

            if let Some(url) = self.images.get(&name) {
                record
                    .image_urls
                    .get_or_insert_with(BTreeMap::new)
                    .insert("thumb".to_string(), url.clone());
                updated += 1;
                matched.insert(name.clone());
            }
        }

        for name in self.referenced_names() {
            if !matched.contains(name) {
                warn!("Correction for '{}' matches no item record", name);
            }
        }

        updated
    }

    fn referenced_names(&self) -> BTreeSet<&String> {
        self.types
            .values()
            .chain(self.special_types.values())
            .flatten()
            .chain(self.prices.keys())
            .chain(self.images.keys())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn corrections() -> Corrections {
        serde_json::from_value(json!({
            "types": {"Shield": ["Light Shield"]},
            "special_types": {"Quest Item": ["Rusted Gear"], "Key": ["Rusted Gear"]},
            "prices": {"Light Shield": 640},
            "images": {"Rusted Gear": "https://wiki.example/gear.png"}
        }))
        .unwrap()
    }

    #[test]
    fn test_apply_updates_fields() {
        let mut records = vec![
            ItemRecord::new("Light Shield"),
            ItemRecord::new("Rusted Gear"),
            ItemRecord::new("Rope"),
        ];

        let updated = corrections().apply(&mut records);

        assert_eq!(updated, 4);
        let shield = records[0].attributes.as_ref().unwrap();
        assert_eq!(shield["type"], "Shield");
        assert_eq!(shield["sellprice"], 640);

        let gear = records[1].attributes.as_ref().unwrap();
        assert_eq!(gear["special_types"], json!(["Key", "Quest Item"]));
        assert_eq!(
            records[1].image_urls.as_ref().unwrap()["thumb"],
            "https://wiki.example/gear.png"
        );

        // Untouched records still get an attribute map.
        assert!(records[2].attributes.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_existing_attributes_are_kept() {
        let mut record = ItemRecord::new("Light Shield");
        record.attributes = Some(json!({"rarity": "Uncommon"}).as_object().unwrap().clone());
        let mut records = vec![record];

        corrections().apply(&mut records);

        let attributes = records[0].attributes.as_ref().unwrap();
        assert_eq!(attributes["rarity"], "Uncommon");
        assert_eq!(attributes["type"], "Shield");
    }

    #[test]
    fn test_empty_document() {
        let corrections: Corrections = serde_json::from_str("{}").unwrap();
        assert!(corrections.is_empty());
        assert_eq!(corrections.apply(&mut [ItemRecord::new("Rope")]), 0);
    }
}
