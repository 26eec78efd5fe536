//! Zone records and query/result types for the membership test.

use geo::{MultiPolygon, Polygon};
use geojson::{Feature, Geometry, JsonObject};
use serde::{Deserialize, Serialize};

/// One zone from the uploaded dataset: raw GeoJSON geometry plus its
/// attribute record.
///
/// The geometry is kept in GeoJSON form and only converted to geo types at
/// check time, so a record with an unusable geometry can still be loaded and
/// rendered, and is skipped by the scan instead of failing the upload.
#[derive(Debug, Clone)]
pub struct ZoneRecord {
    pub geometry: Option<Geometry>,
    /// Attribute record, in file order. Keys need not be uniform across zones.
    pub attributes: JsonObject,
}

impl ZoneRecord {
    /// Convert the geometry to a `MultiPolygon` for the containment test.
    ///
    /// A plain Polygon is normalized to a one-member MultiPolygon. Returns
    /// `None` for missing geometries and for geometry types a polygon test
    /// cannot apply to (points, lines, malformed rings).
    pub fn multi_polygon(&self) -> Option<MultiPolygon<f64>> {
        let value = &self.geometry.as_ref()?.value;

        if let Ok(poly) = Polygon::<f64>::try_from(value.clone()) {
            return Some(MultiPolygon::new(vec![poly]));
        }

        MultiPolygon::<f64>::try_from(value.clone()).ok()
    }

    /// Rebuild a GeoJSON feature for map rendering.
    pub fn to_feature(&self) -> Feature {
        Feature {
            bbox: None,
            geometry: self.geometry.clone(),
            id: None,
            properties: Some(self.attributes.clone()),
            foreign_members: None,
        }
    }
}

/// The ordered list of zones from one uploaded file.
///
/// Replaced wholesale on every successful upload; scan order is file order.
#[derive(Debug, Clone, Default)]
pub struct ZoneDataset {
    records: Vec<ZoneRecord>,
}

impl ZoneDataset {
    pub fn new(records: Vec<ZoneRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ZoneRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Geographic query point (lat/lon)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QueryPoint {
    pub lat: f64,
    pub lon: f64,
}

impl QueryPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Geo point in (x=lon, y=lat) axis order.
    pub fn to_geo(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}

/// Outcome of one membership check. Produced fresh per query, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipResult {
    pub matched: bool,
    /// Attributes of the first matching zone, in file order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<JsonObject>,
}

impl MembershipResult {
    pub fn hit(attributes: JsonObject) -> Self {
        Self {
            matched: true,
            attributes: Some(attributes),
        }
    }

    pub fn miss() -> Self {
        Self {
            matched: false,
            attributes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Value;

    fn square(min: f64, max: f64) -> Geometry {
        Geometry::new(Value::Polygon(vec![vec![
            vec![min, min],
            vec![max, min],
            vec![max, max],
            vec![min, max],
            vec![min, min],
        ]]))
    }

    #[test]
    fn test_polygon_converts_to_multi_polygon() {
        let record = ZoneRecord {
            geometry: Some(square(0.0, 1.0)),
            attributes: JsonObject::new(),
        };
        let multi = record.multi_polygon().unwrap();
        assert_eq!(multi.0.len(), 1);
    }

    #[test]
    fn test_multi_polygon_converts() {
        let geometry = Geometry::new(Value::MultiPolygon(vec![
            vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
            ]],
            vec![vec![
                vec![2.0, 2.0],
                vec![3.0, 2.0],
                vec![3.0, 3.0],
                vec![2.0, 2.0],
            ]],
        ]));
        let record = ZoneRecord {
            geometry: Some(geometry),
            attributes: JsonObject::new(),
        };
        let multi = record.multi_polygon().unwrap();
        assert_eq!(multi.0.len(), 2);
    }

    #[test]
    fn test_point_geometry_is_not_matchable() {
        let record = ZoneRecord {
            geometry: Some(Geometry::new(Value::Point(vec![1.0, 2.0]))),
            attributes: JsonObject::new(),
        };
        assert!(record.multi_polygon().is_none());
    }

    #[test]
    fn test_missing_geometry_is_not_matchable() {
        let record = ZoneRecord {
            geometry: None,
            attributes: JsonObject::new(),
        };
        assert!(record.multi_polygon().is_none());
    }

    #[test]
    fn test_to_feature_round_trips_attributes() {
        let mut attributes = JsonObject::new();
        attributes.insert("nom".to_string(), serde_json::json!("Corridor A"));
        let record = ZoneRecord {
            geometry: Some(square(0.0, 1.0)),
            attributes: attributes.clone(),
        };
        let feature = record.to_feature();
        assert_eq!(feature.properties, Some(attributes));
        assert!(feature.geometry.is_some());
    }
}
