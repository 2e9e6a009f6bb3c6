use crate::DatasetError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One video entry of the metadata file. Fields not listed here are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// File name without extension, relative to the dataset root.
    pub file_name: String,
    /// Label code assigned by an administrator.
    pub label_state_admin: i32,
    /// Label code from regular annotators, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_state: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl VideoRecord {
    pub fn new(file_name: impl Into<String>, label_state_admin: i32) -> Self {
        Self {
            file_name: file_name.into(),
            label_state_admin,
            label_state: None,
            id: None,
        }
    }
}

/// Ordered list of video records; dataset index `i` is record `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    records: Vec<VideoRecord>,
}

impl Metadata {
    pub fn from_records(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<VideoRecord> =
            serde_json::from_str(json).map_err(|e| DatasetError::Metadata(e.to_string()))?;
        Ok(Self { records })
    }

    /// Read and parse a metadata JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| DatasetError::Io(format!("{}: {e}", path.display())))?;
        let metadata = Self::from_json(&json).map_err(|e| match e {
            DatasetError::Metadata(msg) => {
                DatasetError::Metadata(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        log::info!(
            "loaded {} video records from {}",
            metadata.len(),
            path.display()
        );
        Ok(metadata)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VideoRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VideoRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }
}
