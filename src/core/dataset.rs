//! Loading trial records from JSON.
//!
//! Two layouts are accepted: a bare array of records, or an object with a
//! `name` and a `records` array.

use std::fs;
use std::path::Path;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::record::AssetRecord;

const BUILTIN_SAMPLE: &str = include_str!("../../data/treatments.json");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    #[serde(default)]
    pub name: String,
    pub records: Vec<AssetRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Bare(Vec<AssetRecord>),
    Named(Dataset),
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let dataset = match serde_json::from_str::<DatasetFile>(json)? {
            DatasetFile::Bare(records) => Dataset {
                name: String::new(),
                records,
            },
            DatasetFile::Named(d) => d,
        };
        dataset.report_duplicates();
        debug!(records = dataset.records.len(), name = %dataset.name, "dataset parsed");
        Ok(dataset)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut dataset = Self::from_json_str(&text)?;
        if dataset.name.trim().is_empty() {
            dataset.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(dataset)
    }

    /// Small COVID-19 treatment/vaccine sample bundled with the crate.
    pub fn builtin_sample() -> Self {
        match Self::from_json_str(BUILTIN_SAMPLE) {
            Ok(d) => d,
            Err(e) => {
                warn!("builtin sample failed to parse: {}", e);
                Self::default()
            }
        }
    }

    /// Ids that occur more than once. Selection resolves to the first occurrence.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut dups = Vec::new();
        for r in &self.records {
            if !seen.insert(r.id.as_str()) && !dups.contains(&r.id.as_str()) {
                dups.push(r.id.as_str());
            }
        }
        dups
    }

    fn report_duplicates(&self) {
        let dups = self.duplicate_ids();
        if !dups.is_empty() {
            warn!("dataset has {} duplicate id(s): {}", dups.len(), dups.join(", "));
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<AssetRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array_with_missing_fields() {
        let json = r#"[
            {"id": "1", "sponsors": [{"sponsorName": "A"}], "preferredName": "Alpha"},
            {"id": "2"}
        ]"#;
        let d = Dataset::from_json_str(json).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.records[0].first_sponsor(), Some("A"));
        assert_eq!(d.records[0].label(), "Alpha");
        assert!(d.records[1].sponsors.is_empty());
        assert!(d.records[1].location.is_none());
        assert!(d.records[1].first_contact().is_none());
    }

    #[test]
    fn parses_named_layout() {
        let json = r#"{
            "name": "vaccines",
            "records": [{
                "id": "NCT0001",
                "acceptsHealthySubjects": "Yes",
                "registryLink": "https://clinicaltrials.gov/ct2/show/NCT0001",
                "location": {"lat": 51.75, "lng": -1.25, "name": "Oxford"},
                "contact": [{"email": "trials@example.org"}]
            }]
        }"#;
        let d = Dataset::from_json_str(json).unwrap();
        assert_eq!(d.name, "vaccines");
        let r = &d.records[0];
        assert!(r.accepts_healthy_volunteers());
        assert_eq!(r.location.as_ref().and_then(|l| l.name.as_deref()), Some("Oxford"));
        assert_eq!(
            r.first_contact().and_then(|c| c.email.as_deref()),
            Some("trials@example.org")
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Dataset::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));

        // Records need an id.
        assert!(Dataset::from_json_str(r#"[{"phase": "Phase 1"}]"#).is_err());
    }

    #[test]
    fn rejects_object_without_records_key() {
        let err = Dataset::from_json_str(r#"{"name": "vaccines", "record": [{"id": "1"}]}"#)
            .unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
        assert!(Dataset::from_json_str(r#"{"name": "vaccines"}"#).is_err());

        let d = Dataset::from_json_str(r#"{"records": []}"#).unwrap();
        assert!(d.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dataset::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn duplicate_ids_are_reported_once() {
        let json = r#"[{"id": "a"}, {"id": "b"}, {"id": "a"}, {"id": "a"}]"#;
        let d = Dataset::from_json_str(json).unwrap();
        assert_eq!(d.duplicate_ids(), vec!["a"]);
    }

    #[test]
    fn builtin_sample_is_usable() {
        let d = Dataset::builtin_sample();
        assert!(!d.is_empty());
        assert!(d.duplicate_ids().is_empty());
        assert!(d.records.iter().any(|r| r.pin_location().is_some()));
        assert!(d.records.iter().any(|r| r.sponsors.len() > 1));
    }
}
