//! Core data models for the zone checker.

pub mod zone;

pub use zone::{MembershipResult, QueryPoint, ZoneDataset, ZoneRecord};
