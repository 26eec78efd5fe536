//! Interactive zone-checker server.
//!
//! Serves the embedded map UI and a small JSON API for uploading a TVB zone
//! file and checking addresses or coordinates against it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tvb_checker::check::{check, marker_color, zone_style, ZoneStyle};
use tvb_checker::dataset;
use tvb_checker::geocode::{Geocoder, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use tvb_checker::models::{QueryPoint, ZoneDataset};
use tvb_checker::session::SessionState;
use tvb_checker::ui::INDEX_HTML;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "TVB zone checker server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Nominatim search endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    nominatim_url: String,

    /// User agent sent to the geocoding service
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    geocoder_user_agent: String,

    /// Pause before each geocoding request, in milliseconds
    #[arg(long, default_value_t = 1000)]
    geocode_delay_ms: u64,

    /// GeoJSON zone file to preload
    #[arg(long)]
    dataset: Option<PathBuf>,
}

/// Application state shared across handlers
struct AppState {
    /// Currently loaded zone file, if any. Replaced wholesale per upload.
    zones: RwLock<Option<ZoneDataset>>,
    session: RwLock<SessionState>,
    geocoder: Geocoder,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("TVB Checker Server");

    let zones = match &args.dataset {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
            let dataset = dataset::load_from_str(&content)?;
            info!("Preloaded {} zones from {}", dataset.len(), path.display());
            Some(dataset)
        }
        None => None,
    };

    let geocoder = Geocoder::new(
        &args.nominatim_url,
        &args.geocoder_user_agent,
        Duration::from_millis(args.geocode_delay_ms),
    );

    let state = Arc::new(AppState {
        zones: RwLock::new(zones),
        session: RwLock::new(SessionState::default()),
        geocoder,
    });

    // Build router
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/dataset", post(dataset_handler))
        .route("/api/check", post(check_handler))
        .route("/api/session", get(session_handler))
        .route("/api/reset", post(reset_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The embedded map UI
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let zones = state.zones.read().await.as_ref().map(|d| d.len());

    Json(HealthResponse {
        status: "ok",
        zones,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Number of loaded zones, absent until a file has been uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    zones: Option<usize>,
}

/// Replace the loaded zone dataset with an uploaded GeoJSON document
async fn dataset_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<DatasetResponse>, (StatusCode, String)> {
    match dataset::load_from_str(&body) {
        Ok(dataset) => {
            let zones = dataset.len();
            *state.zones.write().await = Some(dataset);
            Ok(Json(DatasetResponse { zones }))
        }
        Err(e) => {
            // A rejected upload leaves no dataset loaded; the checker stays
            // disabled until a valid file arrives
            *state.zones.write().await = None;
            error!("Dataset upload rejected: {}", e);
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

#[derive(Serialize)]
struct DatasetResponse {
    zones: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum InputMode {
    Address,
    Coordinates,
}

#[derive(Deserialize)]
struct CheckRequest {
    mode: InputMode,
    address: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// A zone feature paired with the style the map should draw it with
#[derive(Serialize)]
struct StyledZone {
    feature: geojson::Feature,
    style: ZoneStyle,
}

#[derive(Serialize)]
struct Marker {
    lat: f64,
    lon: f64,
    color: &'static str,
    popup: String,
}

#[derive(Serialize)]
struct CheckResponse {
    point: QueryPoint,
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes: Option<geojson::JsonObject>,
    zones: Vec<StyledZone>,
    marker: Marker,
    session: SessionState,
}

/// Run one geocode-then-check-then-render pass
async fn check_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, (StatusCode, String)> {
    if state.zones.read().await.is_none() {
        return Err((
            StatusCode::CONFLICT,
            "Veuillez d'abord charger un fichier GeoJSON".to_string(),
        ));
    }

    let (point, popup) = match request.mode {
        InputMode::Address => {
            let address = request.address.as_deref().map(str::trim).unwrap_or_default();
            if address.is_empty() {
                return Err((StatusCode::BAD_REQUEST, "Adresse manquante".to_string()));
            }

            let resolved = state.geocoder.resolve(address).await.map_err(|e| {
                error!("Geocoding failed: {}", e);
                (StatusCode::BAD_GATEWAY, e.to_string())
            })?;

            let point = resolved.ok_or_else(|| {
                (
                    StatusCode::NOT_FOUND,
                    "Impossible de géocoder cette adresse".to_string(),
                )
            })?;

            state.session.write().await.record_address(address);
            (point, address.to_string())
        }
        InputMode::Coordinates => {
            let (Some(lat), Some(lon)) = (request.lat, request.lon) else {
                return Err((StatusCode::BAD_REQUEST, "Coordonnées manquantes".to_string()));
            };

            state.session.write().await.record_coordinates(lat, lon);
            (
                QueryPoint::new(lat, lon),
                format!("Coordonnées: {}, {}", lat, lon),
            )
        }
    };

    let guard = state.zones.read().await;
    let Some(dataset) = guard.as_ref() else {
        return Err((
            StatusCode::CONFLICT,
            "Veuillez d'abord charger un fichier GeoJSON".to_string(),
        ));
    };

    let result = check(point, dataset.records());

    let zones: Vec<StyledZone> = dataset
        .records()
        .iter()
        .map(|zone| StyledZone {
            feature: zone.to_feature(),
            style: zone_style(zone, &result),
        })
        .collect();

    let marker = Marker {
        lat: point.lat,
        lon: point.lon,
        color: marker_color(&result),
        popup,
    };

    let session = state.session.read().await.clone();

    Ok(Json(CheckResponse {
        point,
        matched: result.matched,
        attributes: result.attributes,
        zones,
        marker,
        session,
    }))
}

/// Current form state, used to populate the UI
async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    Json(state.session.read().await.clone())
}

/// Restore default coordinates and clear the address field
async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    let mut session = state.session.write().await;
    session.reset();
    Json(session.clone())
}
