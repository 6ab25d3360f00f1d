// src/models/mod.rs

//! Domain models for the guide application.
//!
//! All content structures are loaded once at boot from JSON and treated as
//! immutable for the rest of the session.

mod campus;
mod guide;

// Re-export all public types
pub use campus::{Campus, CampusData, DetailBlock, FacilityKind, FacilityRecord};
pub use guide::{
    ClubGroup, ClubsContent, FaqItem, GuideCategory, GuidePage, Organizations, PageContent,
    validate_guide,
};
