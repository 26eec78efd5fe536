//! TVB Checker - checks whether a point falls inside a "Trame Vert Bleu" zone
//!
//! This library provides the zone membership test and its collaborators
//! (dataset loading, geocoding, highlight styling) for the server binary.

pub mod check;
pub mod dataset;
pub mod geocode;
pub mod models;
pub mod session;
pub mod ui;

pub use models::{MembershipResult, QueryPoint, ZoneDataset, ZoneRecord};
