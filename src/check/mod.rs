//! Zone membership test and the highlight policy derived from it.

mod membership;
mod style;

pub use membership::{check, tolerance_region, TOLERANCE_DEGREES};
pub use style::{marker_color, zone_style, ZoneStyle, DEFAULT_STYLE, HIGHLIGHT_STYLE};
