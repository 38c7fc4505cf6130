//! Label → disease metadata table
//!
//! Loaded once at startup from a JSON object keyed by label:
//! `{"0": {"name": "...", "treatment": "..."}, ...}`

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to read disease metadata: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid disease metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Human-readable description of a label
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DiseaseInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
}

impl DiseaseInfo {
    pub fn new(name: impl Into<String>, treatment: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            treatment: Some(treatment.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiseaseMetadata {
    entries: HashMap<String, DiseaseInfo>,
}

impl DiseaseMetadata {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, MetadataError> {
        let entries: HashMap<String, DiseaseInfo> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, DiseaseInfo)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn lookup(&self, label: &str) -> Option<DiseaseInfo> {
        self.entries.get(label).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
