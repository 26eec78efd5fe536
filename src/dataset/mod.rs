//! Zone dataset loading from uploaded GeoJSON.

use geojson::{GeoJson, JsonObject};
use tracing::info;

use crate::models::{ZoneDataset, ZoneRecord};

/// Errors from dataset loading.
///
/// Per-feature geometry problems are not load errors: a feature with a
/// missing or broken geometry still becomes a record and is skipped at check
/// time instead.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Format de fichier invalide: {0}")]
    Parse(String),

    #[error("Le fichier ne contient pas de liste de zones (FeatureCollection attendue)")]
    NotAFeatureCollection,
}

/// Parse an uploaded GeoJSON document into a zone dataset.
///
/// Record order is file order; the checker's first-match tie-break depends
/// on it.
pub fn load_from_str(data: &str) -> Result<ZoneDataset, DatasetError> {
    let geojson: GeoJson = data
        .parse()
        .map_err(|e: geojson::Error| DatasetError::Parse(e.to_string()))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        _ => return Err(DatasetError::NotAFeatureCollection),
    };

    let records: Vec<ZoneRecord> = collection
        .features
        .into_iter()
        .map(|feature| ZoneRecord {
            geometry: feature.geometry,
            attributes: feature.properties.unwrap_or_else(JsonObject::new),
        })
        .collect();

    info!("Loaded {} zones", records.len());

    Ok(ZoneDataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ZONE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[5.0, 45.0], [6.0, 45.0], [6.0, 46.0], [5.0, 46.0], [5.0, 45.0]]]
                },
                "properties": {"id": 1, "nom": "Corridor humide"}
            }
        ]
    }"#;

    #[test]
    fn test_load_feature_collection() {
        let dataset = load_from_str(ONE_ZONE).unwrap();
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.attributes.get("id"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_reject_invalid_json() {
        let err = load_from_str("not geojson at all").unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_reject_bare_geometry() {
        let geometry = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        let err = load_from_str(geometry).unwrap_err();
        assert!(matches!(err, DatasetError::NotAFeatureCollection));
    }

    #[test]
    fn test_missing_properties_become_empty_attributes() {
        let data = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                    "properties": null
                }
            ]
        }"#;
        let dataset = load_from_str(data).unwrap();
        assert!(dataset.records()[0].attributes.is_empty());
    }

    #[test]
    fn test_empty_collection_loads() {
        let data = r#"{"type": "FeatureCollection", "features": []}"#;
        let dataset = load_from_str(data).unwrap();
        assert!(dataset.is_empty());
    }
}
