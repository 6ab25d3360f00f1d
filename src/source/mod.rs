// src/source/mod.rs

//! Content source boundary.
//!
//! The guide and campus corpora come from an external collaborator. The
//! contract is deliberately forgiving: loading is asynchronous, and any
//! failure resolves to an empty/default structure with a warning instead of
//! failing application boot.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{CampusData, GuideCategory};

/// Asynchronous provider of the guide and campus corpora.
#[async_trait]
pub trait ContentSource {
    /// Load guide categories; empty on failure.
    async fn load_guide_data(&self) -> Vec<GuideCategory>;

    /// Load campus data; default (all empty) on failure.
    async fn load_campus_data(&self) -> CampusData;
}

/// Content source reading JSON files from a local data directory.
#[derive(Debug, Clone)]
pub struct LocalContentSource {
    guide_path: PathBuf,
    campus_path: PathBuf,
}

impl LocalContentSource {
    /// Create a source for the given file locations.
    pub fn new(guide_path: impl Into<PathBuf>, campus_path: impl Into<PathBuf>) -> Self {
        Self {
            guide_path: guide_path.into(),
            campus_path: campus_path.into(),
        }
    }

    /// Read and deserialize one JSON file.
    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let bytes = tokio::fs::read(path).await.map_err(AppError::Io)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ContentSource for LocalContentSource {
    async fn load_guide_data(&self) -> Vec<GuideCategory> {
        match Self::read_json(&self.guide_path).await {
            Ok(categories) => categories,
            Err(e) => {
                log::warn!(
                    "Guide data load failed from {:?}: {}. Starting with empty guide.",
                    self.guide_path,
                    e
                );
                Vec::new()
            }
        }
    }

    async fn load_campus_data(&self) -> CampusData {
        match Self::read_json(&self.campus_path).await {
            Ok(data) => data,
            Err(e) => {
                log::warn!(
                    "Campus data load failed from {:?}: {}. Starting with empty campus data.",
                    self.campus_path,
                    e
                );
                CampusData::default()
            }
        }
    }
}
