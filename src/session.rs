//! Per-session form state.

use serde::{Deserialize, Serialize};

/// Default map coordinates: metropolitan-France centroid.
pub const DEFAULT_LAT: f64 = 46.603354;
pub const DEFAULT_LON: f64 = 1.888334;

/// Last-entered form values, carried between interactions so the form
/// redisplays them. An explicit struct passed through the handlers rather
/// than ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub last_address: String,
    pub last_lat: f64,
    pub last_lon: f64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            last_address: String::new(),
            last_lat: DEFAULT_LAT,
            last_lon: DEFAULT_LON,
        }
    }
}

impl SessionState {
    /// Restore default coordinates and clear the address field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_address(&mut self, address: &str) {
        self.last_address = address.to_string();
    }

    pub fn record_coordinates(&mut self, lat: f64, lon: f64) {
        self.last_lat = lat;
        self.last_lon = lon;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = SessionState::default();
        assert!(state.last_address.is_empty());
        assert_eq!(state.last_lat, DEFAULT_LAT);
        assert_eq!(state.last_lon, DEFAULT_LON);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = SessionState::default();
        state.record_address("1 rue de la Paix, Paris");
        state.record_coordinates(48.87, 2.33);
        state.reset();
        assert!(state.last_address.is_empty());
        assert_eq!(state.last_lat, DEFAULT_LAT);
        assert_eq!(state.last_lon, DEFAULT_LON);
    }
}
