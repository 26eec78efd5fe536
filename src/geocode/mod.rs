//! Address resolution through the Nominatim search API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::QueryPoint;

/// Public Nominatim instance. Override for a self-hosted mirror.
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

pub const DEFAULT_USER_AGENT: &str = "tvb-checker/0.1 (TVB zone checker)";

/// Errors from address resolution. Callers surface these as text and treat
/// them the same as an unresolvable address.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Erreur de géocodage: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Erreur de géocodage: statut {0}")]
    Status(reqwest::StatusCode),

    #[error("Erreur de géocodage: coordonnées illisibles ({0})")]
    Malformed(String),
}

/// One result row from the Nominatim search API.
///
/// Nominatim serializes coordinates as strings; the remaining fields are
/// ignored.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Nominatim client with a fixed pre-request pause to respect the service's
/// usage policy.
pub struct Geocoder {
    client: Client,
    endpoint: String,
    delay: Duration,
}

impl Geocoder {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, delay: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(user_agent)
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.into(),
            delay,
        }
    }

    /// Resolve a free-text address to coordinates.
    ///
    /// `Ok(None)` means the service answered but found nothing, distinct from
    /// a service error. No retry or backoff: a failure surfaces once and the
    /// session waits for the next interaction.
    pub async fn resolve(&self, address: &str) -> Result<Option<QueryPoint>, GeocodeError> {
        // Rate limit imposed by the service usage policy
        tokio::time::sleep(self.delay).await;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()));
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let point = first_place(places)?;

        match &point {
            Some(p) => debug!("Geocoded '{}' to ({}, {})", address, p.lat, p.lon),
            None => debug!("No geocoding result for '{}'", address),
        }

        Ok(point)
    }
}

/// Extract coordinates from the first result row, if any.
fn first_place(places: Vec<NominatimPlace>) -> Result<Option<QueryPoint>, GeocodeError> {
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let lat: f64 = place
        .lat
        .parse()
        .map_err(|_| GeocodeError::Malformed(place.lat.clone()))?;
    let lon: f64 = place
        .lon
        .parse()
        .map_err(|_| GeocodeError::Malformed(place.lon.clone()))?;

    Ok(Some(QueryPoint::new(lat, lon)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim_payload() {
        let payload = r#"[
            {
                "place_id": 88063261,
                "lat": "48.8588897",
                "lon": "2.3200410",
                "display_name": "Paris, Île-de-France, France"
            }
        ]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(payload).unwrap();
        let point = first_place(places).unwrap().unwrap();
        assert!((point.lat - 48.8588897).abs() < 1e-9);
        assert!((point.lon - 2.3200410).abs() < 1e-9);
    }

    #[test]
    fn test_empty_result_list_is_not_found() {
        let places: Vec<NominatimPlace> = serde_json::from_str("[]").unwrap();
        assert!(first_place(places).unwrap().is_none());
    }

    #[test]
    fn test_unparseable_coordinates_are_an_error() {
        let payload = r#"[{"lat": "north-ish", "lon": "2.32"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(payload).unwrap();
        assert!(matches!(
            first_place(places),
            Err(GeocodeError::Malformed(_))
        ));
    }
}
