//! Preloaded mapping files and JSON export.
//!
//! Both use the shape
//! `{"header": [{"title", "data_index", "key"}], "data": [records]}` where
//! each record is a flat object holding `key` plus one entry per field.

use std::fs;
use std::path::Path;

use qmap_map::column_title;
use qmap_model::{Record, RowStore};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{IngestError, Result, io_error};

/// Column descriptor of a mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderColumn {
    pub title: String,
    #[serde(alias = "dataIndex")]
    pub data_index: String,
    pub key: String,
}

impl HeaderColumn {
    pub fn for_field(field: &str) -> Self {
        Self {
            title: column_title(field),
            data_index: field.to_string(),
            key: field.to_string(),
        }
    }
}

/// Column descriptors plus rows, as exchanged with downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingDocument {
    pub header: Vec<HeaderColumn>,
    pub data: Vec<Record>,
}

impl MappingDocument {
    pub fn from_store(store: &RowStore) -> Self {
        Self {
            header: store
                .schema()
                .iter()
                .map(|field| HeaderColumn::for_field(field))
                .collect(),
            data: store.records().to_vec(),
        }
    }

    /// Builds a store whose schema follows the header's `data_index` order.
    pub fn into_store(self) -> Result<RowStore> {
        let schema = self
            .header
            .into_iter()
            .map(|column| column.data_index)
            .collect();
        Ok(RowStore::from_records(schema, self.data)?)
    }
}

/// Loads a preloaded mapping file into a store.
pub fn load_preloaded(path: &Path) -> Result<RowStore> {
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let document: MappingDocument =
        serde_json::from_str(&text).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    document.into_store()
}

/// Serializes a store as a pretty-printed mapping document.
pub fn export_json(store: &RowStore) -> Result<String> {
    serde_json::to_string_pretty(&MappingDocument::from_store(store)).map_err(|source| {
        IngestError::Json {
            path: "<export>".into(),
            source,
        }
    })
}

/// Writes a store to `path` as a mapping document.
pub fn write_export(path: &Path, store: &RowStore) -> Result<()> {
    let json = export_json(store)?;
    fs::write(path, json).map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), rows = store.len(), "exported rows");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmap_model::{FieldValue, RowKey};

    fn store() -> RowStore {
        let records = vec![
            Record::new(RowKey::new("row-2"))
                .with_field("order", "1")
                .with_field("possible_options", FieldValue::list(["YES", "NO"])),
        ];
        RowStore::from_records(vec!["order".into(), "possible_options".into()], records).unwrap()
    }

    #[test]
    fn test_export_shape() {
        let value: serde_json::Value = serde_json::from_str(&export_json(&store()).unwrap()).unwrap();
        assert_eq!(
            value["header"][1],
            serde_json::json!({
                "title": "Possible Options",
                "data_index": "possible_options",
                "key": "possible_options"
            })
        );
        assert_eq!(
            value["data"][0],
            serde_json::json!({
                "key": "row-2",
                "order": "1",
                "possible_options": ["YES", "NO"]
            })
        );
    }

    #[test]
    fn test_accepts_camel_case_data_index() {
        let json = r#"{
            "header": [{"title": "Order", "dataIndex": "order", "key": "order"}],
            "data": [{"key": "row-1", "order": "1"}]
        }"#;
        let document: MappingDocument = serde_json::from_str(json).unwrap();
        let store = document.into_store().unwrap();
        assert_eq!(store.schema(), ["order"]);
        assert_eq!(store.records()[0].order(), "1");
    }
}
