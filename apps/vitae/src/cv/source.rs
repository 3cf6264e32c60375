//! CV data source.
//!
//! The default implementation reads a static JSON document from disk. It
//! re-reads the file for every section load, so a read failure or a
//! mid-pass file replacement touches only the sections loaded after it;
//! the orchestrator confines each failure to its section.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::cv::models::{ExperienceRecord, Profile, SectionKind};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read CV data at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CV data at {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("section '{section}' is malformed: {source}")]
    Section {
        section: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("profile is malformed: {0}")]
    Profile(#[source] serde_json::Error),
}

/// Pluggable source of CV records. The HTTP layer and the orchestrator only
/// ever see this trait; tests swap in in-memory implementations.
#[async_trait]
pub trait CvSource: Send + Sync {
    /// Loads one section's ordered record list. A missing section key counts
    /// as an empty section, not an error.
    async fn load_section(&self, kind: SectionKind) -> Result<Vec<ExperienceRecord>, SourceError>;

    /// Loads the optional profile header.
    async fn load_profile(&self) -> Result<Option<Profile>, SourceError>;
}

/// File-backed source reading a JSON document keyed by section name.
pub struct FileCvSource {
    path: PathBuf,
}

impl FileCvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_document(&self) -> Result<Value, SourceError> {
        let path = self.path.display().to_string();
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Read {
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| SourceError::Parse { path, source })
    }
}

#[async_trait]
impl CvSource for FileCvSource {
    async fn load_section(&self, kind: SectionKind) -> Result<Vec<ExperienceRecord>, SourceError> {
        let document = self.read_document().await?;
        match document.get(kind.data_key()) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|source| SourceError::Section {
                    section: kind.to_string(),
                    source,
                })
            }
        }
    }

    async fn load_profile(&self) -> Result<Option<Profile>, SourceError> {
        let document = self.read_document().await?;
        match document.get("profile") {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(SourceError::Profile),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
