// src/models/campus.rs

//! Campus and facility data structures.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::guide::flatten_value;

/// Campus-scoped content: campuses, facilities, and college listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusData {
    /// Known campuses
    #[serde(default)]
    pub campuses: Vec<Campus>,

    /// Dormitory records across all campuses
    #[serde(default)]
    pub dormitories: Vec<FacilityRecord>,

    /// Canteen records across all campuses
    #[serde(default)]
    pub canteens: Vec<FacilityRecord>,

    /// College listings (free-form, rendered elsewhere)
    #[serde(default)]
    pub colleges: Vec<Value>,
}

impl CampusData {
    /// Facility records of the given kind.
    pub fn facilities(&self, kind: FacilityKind) -> &[FacilityRecord] {
        match kind {
            FacilityKind::Dormitory => &self.dormitories,
            FacilityKind::Canteen => &self.canteens,
        }
    }

    /// Look up a facility by kind and id.
    pub fn facility(&self, kind: FacilityKind, id: &str) -> Option<&FacilityRecord> {
        self.facilities(kind).iter().find(|f| f.id == id)
    }

    /// Whether a campus with the given id is declared.
    pub fn has_campus(&self, id: &str) -> bool {
        self.campuses.iter().any(|c| c.id == id)
    }

    /// Validate loaded campus data: campus ids unique, every facility
    /// assigned to exactly one declared campus.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for campus in &self.campuses {
            if !seen.insert(campus.id.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate campus id '{}'",
                    campus.id
                )));
            }
        }

        for kind in [FacilityKind::Dormitory, FacilityKind::Canteen] {
            let mut ids = std::collections::HashSet::new();
            for record in self.facilities(kind) {
                if !ids.insert(record.id.as_str()) {
                    return Err(AppError::validation(format!(
                        "Duplicate {kind} id '{}'",
                        record.id
                    )));
                }
                if record.campus_id.trim().is_empty() {
                    return Err(AppError::validation(format!(
                        "{kind} '{}' has no campus",
                        record.id
                    )));
                }
                if !self.has_campus(&record.campus_id) {
                    return Err(AppError::validation(format!(
                        "{kind} '{}' references unknown campus '{}'",
                        record.id, record.campus_id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A university campus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campus {
    /// Unique campus identifier (e.g., "cangwu")
    pub id: String,

    /// Display name
    pub name: String,
}

/// A dormitory or canteen entry scoped to one campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRecord {
    /// Unique identifier
    pub id: String,

    /// Owning campus id
    pub campus_id: String,

    /// Display name
    pub name: String,

    /// Short summary shown in listings
    #[serde(default)]
    pub summary: String,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Free-form key/value detail blocks, in display order
    #[serde(default)]
    pub details: Vec<DetailBlock>,
}

impl FacilityRecord {
    /// Searchable text blob: name + summary + flattened detail values.
    pub fn searchable_text(&self) -> String {
        let mut text = String::new();
        text.push_str(self.name.trim());
        if !self.summary.trim().is_empty() {
            text.push(' ');
            text.push_str(self.summary.trim());
        }
        for block in &self.details {
            flatten_value(&block.0, &mut text);
        }
        text
    }
}

/// One free-form detail block of a facility record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailBlock(pub Value);

/// Kind of facility a detail view can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    Dormitory,
    Canteen,
}

impl FacilityKind {
    /// Parse the `detailType` attribute value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dormitory" => Some(Self::Dormitory),
            "canteen" => Some(Self::Canteen),
            _ => None,
        }
    }

    /// Attribute value used in result markup and event payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dormitory => "dormitory",
            Self::Canteen => "canteen",
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
