//! Map styling derived from the membership result.

use serde::Serialize;

use crate::models::{MembershipResult, ZoneRecord};

/// Leaflet path options for one zone polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStyle {
    pub fill_color: &'static str,
    pub color: &'static str,
    pub fill_opacity: f64,
    pub weight: f64,
}

/// Style for zones the query point is not in.
pub const DEFAULT_STYLE: ZoneStyle = ZoneStyle {
    fill_color: "#81C6E8",
    color: "#1F75C4",
    fill_opacity: 0.4,
    weight: 1.5,
};

/// Style for the matched zone.
pub const HIGHLIGHT_STYLE: ZoneStyle = ZoneStyle {
    fill_color: "#4CAF50",
    color: "#2E7D32",
    fill_opacity: 0.6,
    weight: 2.5,
};

/// Style for one zone given the check result.
///
/// The matched zone is identified by attribute-record equality with the
/// result. This identity proxy is fragile when two zones carry identical
/// attribute sets, but real datasets do not, and it is the documented
/// behavior to preserve.
pub fn zone_style(zone: &ZoneRecord, result: &MembershipResult) -> ZoneStyle {
    if result.matched && result.attributes.as_ref() == Some(&zone.attributes) {
        HIGHLIGHT_STYLE
    } else {
        DEFAULT_STYLE
    }
}

/// Marker color encoding the match outcome.
pub fn marker_color(result: &MembershipResult) -> &'static str {
    if result.matched {
        "green"
    } else {
        "red"
    }
}
