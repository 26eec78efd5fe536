//! Point-in-zone membership test.

use geo::{Contains, Coord, Intersects, LineString, Polygon};
use tracing::debug;

use crate::models::{MembershipResult, QueryPoint, ZoneRecord};

/// Tolerance radius around the query point, in coordinate degrees
/// (roughly 10-15 m at French latitudes). Absorbs boundary digitization and
/// floating-point error: a point sitting exactly on or just outside a zone
/// edge still counts as inside.
pub const TOLERANCE_DEGREES: f64 = 1e-4;

/// Segments used to approximate the circular tolerance region.
const TOLERANCE_SEGMENTS: usize = 32;

/// Build the circular tolerance region around a query point as a closed
/// polygonal ring.
///
/// The radius is in degrees, matching the zone coordinate units; this is an
/// approximate degree buffer, not a geodesic one.
pub fn tolerance_region(point: QueryPoint, radius: f64) -> Polygon<f64> {
    let center = point.to_geo();

    let mut ring: Vec<Coord<f64>> = (0..TOLERANCE_SEGMENTS)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * (i as f64) / (TOLERANCE_SEGMENTS as f64);
            Coord {
                x: center.x() + radius * theta.cos(),
                y: center.y() + radius * theta.sin(),
            }
        })
        .collect();
    ring.push(ring[0]);

    Polygon::new(LineString::new(ring), vec![])
}

/// Test a point against the zone list, in list order.
///
/// A zone matches if its geometry strictly contains the point or intersects
/// the tolerance region around it. The first matching zone wins: when zones
/// overlap, the result reflects whichever appears earliest in the file. This
/// order dependence is intentional and preserved.
///
/// Zones whose geometry cannot be evaluated are skipped, never fatal.
pub fn check(point: QueryPoint, zones: &[ZoneRecord]) -> MembershipResult {
    let center = point.to_geo();
    let buffer = tolerance_region(point, TOLERANCE_DEGREES);

    for (i, zone) in zones.iter().enumerate() {
        let Some(geometry) = zone.multi_polygon() else {
            debug!("Skipping zone {}: geometry not usable", i);
            continue;
        };

        if geometry.contains(&center) || geometry.intersects(&buffer) {
            return MembershipResult::hit(zone.attributes.clone());
        }
    }

    MembershipResult::miss()
}
