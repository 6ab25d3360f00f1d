// src/storage/mod.rs

//! Persisted client preferences.
//!
//! The only persisted value is the selected campus, stored as a single JSON
//! object under a fixed key — the file-backed equivalent of the browser's
//! local storage entry. Absence falls back to a configured default campus.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Storage key for the selected campus value.
pub const SELECTED_CAMPUS_KEY: &str = "selectedCampus";

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
    default_campus: String,
}

impl PrefsStore {
    /// Create a store at the given path with a fallback campus id.
    pub fn new(path: impl Into<PathBuf>, default_campus: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_campus: default_campus.into(),
        }
    }

    /// Read the selected campus, falling back to the default when the file
    /// or the key is absent or unreadable.
    pub fn selected_campus(&self) -> String {
        match self.read_all() {
            Ok(prefs) => prefs
                .get(SELECTED_CAMPUS_KEY)
                .cloned()
                .unwrap_or_else(|| self.default_campus.clone()),
            Err(e) => {
                log::warn!(
                    "Preference read failed from {:?}: {}. Using default campus.",
                    self.path,
                    e
                );
                self.default_campus.clone()
            }
        }
    }

    /// Persist the selected campus. Written on every campus change.
    pub fn set_selected_campus(&self, campus_id: &str) -> Result<()> {
        let mut prefs = self.read_all().unwrap_or_default();
        prefs.insert(SELECTED_CAMPUS_KEY.to_string(), campus_id.to_string());
        self.write_all(&prefs)
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write atomically: temp file, then rename.
    fn write_all(&self, prefs: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(prefs)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| AppError::storage(SELECTED_CAMPUS_KEY, e))?;
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
