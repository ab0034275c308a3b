//! Reading and writing record collections.
//!
//! The item collection is required: a missing or unreadable file aborts the
//! build. The trader collection is optional and a missing file simply means
//! "no traders".

use crate::error::{LoadError, Result};
use crate::record::{ItemRecord, Record, TraderRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Loads the required item collection.
pub fn load_items(path: &Path) -> Result<Vec<ItemRecord>> {
    if !path.exists() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }
    let items: Vec<ItemRecord> = read_json(path)?;
    info!("Loaded {} item records from {}", items.len(), path.display());
    Ok(items)
}

/// Loads the optional trader collection. A missing file yields `None`.
pub fn load_traders(path: &Path) -> Result<Option<Vec<TraderRecord>>> {
    if !path.exists() {
        info!("No trader records at {}, building without traders", path.display());
        return Ok(None);
    }
    let traders: Vec<TraderRecord> = read_json(path)?;
    info!("Loaded {} trader records from {}", traders.len(), path.display());
    Ok(Some(traders))
}

/// Reads and deserializes a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a value as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let text = serde_json::to_string_pretty(value).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(io_err)
}

/// Result of [`dedupe_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct Deduped<R> {
    /// First record per name, in input order.
    pub records: Vec<R>,
    /// Names of the later records that were removed.
    pub duplicates: Vec<String>,
    /// Records removed for lacking a name.
    pub unnamed: usize,
}

/// Keeps the first record for each name, in order. Records without a name
/// are dropped and counted.
pub fn dedupe_records<R: Record>(records: Vec<R>) -> Deduped<R> {
    let mut seen = HashSet::new();
    let mut deduped = Deduped {
        records: Vec::with_capacity(records.len()),
        duplicates: Vec::new(),
        unnamed: 0,
    };

    for record in records {
        let Some(name) = record.name().map(str::to_string) else {
            deduped.unnamed += 1;
            continue;
        };
        if seen.insert(name.clone()) {
            deduped.records.push(record);
        } else {
            debug!("Dropping duplicate record '{}'", name);
            deduped.duplicates.push(name);
        }
    }

    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_items_is_fatal() {
        let dir = tempdir().unwrap();
        let err = load_items(&dir.path().join("items.json")).unwrap_err();
        assert!(matches!(err, LoadError::Missing(_)));
        assert!(err.to_string().contains("items.json"));
    }

    #[test]
    fn test_invalid_items_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("items.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_items(&path), Err(LoadError::Json { .. })));
    }

    #[test]
    fn test_missing_traders_is_tolerated() {
        let dir = tempdir().unwrap();
        let traders = load_traders(&dir.path().join("traders.json")).unwrap();
        assert!(traders.is_none());
    }

    #[test]
    fn test_write_then_load_items() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("items.json");
        write_json(&path, &vec![ItemRecord::new("Rope"), ItemRecord::new("Fabric")]).unwrap();

        let items = load_items(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name(), Some("Fabric"));
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let mut first = ItemRecord::new("Rope");
        first.wiki_url = Some("first".to_string());
        let mut second = ItemRecord::new("Rope");
        second.wiki_url = Some("second".to_string());
        let records = vec![
            first,
            ItemRecord::new("Fabric"),
            second,
            ItemRecord::default(),
        ];

        let deduped = dedupe_records(records);

        assert_eq!(deduped.records.len(), 2);
        assert_eq!(deduped.records[0].wiki_url.as_deref(), Some("first"));
        assert_eq!(deduped.duplicates, vec!["Rope".to_string()]);
        assert_eq!(deduped.unnamed, 1);
    }
}
