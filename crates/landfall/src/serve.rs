use crate::prelude::{eprintln, *};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use landfall_core::fleet::{core_details, CoreDetail, FleetStats};
use landfall_core::landpads::{analyze_landpads, LandpadStats};
use landfall_core::launches::{extract_recoveries, RecoveryAttempt};
use landfall_core::report::{AnalysisOptions, AnalysisReport};
use landfall_core::trends::{
    landing_type_distribution, yearly_trend, LandingTypeCount, YearlyTrend,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{ApiConfig, SpaceXClient};

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Serve recovery statistics as a JSON API")]
pub struct App {
    /// Host to bind to
    #[arg(long, env = "LANDFALL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "LANDFALL_PORT", default_value = "3000")]
    pub port: u16,
}

type SharedClient = Arc<SpaceXClient>;

/// Handler failure, reported as `500 {"error": "..."}`
#[derive(Debug)]
struct ApiError(color_eyre::eyre::Report);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        log::warn!("Request failed: {message}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<color_eyre::eyre::Report>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisQuery {
    top: Option<usize>,
    failures: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendsResponse {
    yearly: Vec<YearlyTrend>,
    landing_types: Vec<LandingTypeCount>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let client = SpaceXClient::new(&ApiConfig::from_global(&global))?;
    let addr = f!("{}:{}", app.host, app.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!(
        "Serving recovery statistics on http://{} (upstream {})",
        addr,
        client.base_url()
    );

    if global.verbose {
        eprintln!("Listening on http://{}", addr);
        eprintln!("Endpoints: /api/stats /api/landpads /api/cores /api/recoveries");
        eprintln!("           /api/launches /api/trends /api/analysis");
    }

    axum::serve(listener, router(client))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

pub fn router(client: SpaceXClient) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/stats", get(stats_handler))
        .route("/api/landpads", get(landpads_handler))
        .route("/api/cores", get(cores_handler))
        .route("/api/recoveries", get(recoveries_handler))
        .route("/api/launches", get(launches_handler))
        .route("/api/trends", get(trends_handler))
        .route("/api/analysis", get(analysis_handler))
        .layer(cors)
        .with_state(Arc::new(client))
}

async fn stats_handler(State(client): State<SharedClient>) -> Result<Json<FleetStats>, ApiError> {
    let stats = crate::overview::fleet_stats_data(&client).await?;
    Ok(Json(stats))
}

async fn landpads_handler(
    State(client): State<SharedClient>,
) -> Result<Json<Vec<LandpadStats>>, ApiError> {
    let landpads = client.landpads().await?;
    Ok(Json(analyze_landpads(&landpads)))
}

async fn cores_handler(
    State(client): State<SharedClient>,
) -> Result<Json<Vec<CoreDetail>>, ApiError> {
    let cores = client.cores().await?;
    Ok(Json(core_details(&cores)))
}

async fn recoveries_handler(
    State(client): State<SharedClient>,
) -> Result<Json<Vec<RecoveryAttempt>>, ApiError> {
    let launches = client.past_launches().await?;
    Ok(Json(extract_recoveries(&launches)))
}

async fn launches_handler(
    State(client): State<SharedClient>,
) -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(client.past_launches_raw().await?))
}

async fn trends_handler(
    State(client): State<SharedClient>,
) -> Result<Json<TrendsResponse>, ApiError> {
    let launches = client.past_launches().await?;
    let recoveries = extract_recoveries(&launches);

    Ok(Json(TrendsResponse {
        yearly: yearly_trend(&recoveries),
        landing_types: landing_type_distribution(&recoveries),
    }))
}

async fn analysis_handler(
    State(client): State<SharedClient>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let defaults = AnalysisOptions::default();
    let options = AnalysisOptions {
        top_reused: query.top.unwrap_or(defaults.top_reused),
        recent_failures: query.failures.unwrap_or(defaults.recent_failures),
    };

    let report = crate::analyze::analysis_data(&client, options).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::time::Duration;

    const CORES: &str = r#"[
        {"id":"c1","serial":"B1049","status":"active","reuse_count":5,
         "asds_attempts":6,"asds_landings":6},
        {"id":"c2","serial":"B1019","status":"retired","reuse_count":0,
         "rtls_attempts":1,"rtls_landings":1}
    ]"#;

    const LAUNCHES: &str = r#"[
        {"name":"OG-2 Mission 2","date_utc":"2015-12-22T01:29:00.000Z",
         "cores":[{"core":"c2","flight":1,"landing_attempt":true,
                   "landing_success":true,"landing_type":"RTLS"}]},
        {"name":"Jason 3","date_utc":"2016-01-17T18:42:00.000Z",
         "cores":[{"core":"c3","flight":1,"landing_attempt":true,
                   "landing_success":false,"landing_type":"ASDS"}]},
        {"name":"SES-9","date_utc":"2016-03-04T23:35:00.000Z",
         "cores":[{"core":"c4","flight":1,"landing_attempt":false}]}
    ]"#;

    async fn spawn_app(upstream: &mockito::ServerGuard) -> String {
        let client = SpaceXClient::new(&ApiConfig {
            base_url: upstream.url(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(client)).await.unwrap();
        });

        format!("http://{addr}")
    }

    async fn get_json(url: &str) -> (u16, Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let mut upstream = mockito::Server::new_async().await;
        upstream
            .mock("GET", "/cores")
            .with_status(200)
            .with_body(CORES)
            .create_async()
            .await;
        let base = spawn_app(&upstream).await;

        let (status, body) = get_json(&format!("{base}/api/stats")).await;

        assert_eq!(status, 200);
        assert_eq!(body["total"], 2);
        assert_eq!(body["active"], 1);
        assert_eq!(body["maxReuse"], 5);
        assert_eq!(body["mostReusedCore"]["serial"], "B1049");
        assert_eq!(body["landingSuccessRate"], 100.0);
    }

    #[tokio::test]
    async fn test_recoveries_and_trends_endpoints() {
        let mut upstream = mockito::Server::new_async().await;
        upstream
            .mock("GET", "/launches/past")
            .with_status(200)
            .with_body(LAUNCHES)
            .expect(2)
            .create_async()
            .await;
        let base = spawn_app(&upstream).await;

        let (_, recoveries) = get_json(&format!("{base}/api/recoveries")).await;
        let (status, trends) = get_json(&format!("{base}/api/trends")).await;

        assert_eq!(recoveries.as_array().unwrap().len(), 2);
        assert_eq!(recoveries[0]["launchName"], "OG-2 Mission 2");
        assert_eq!(status, 200);
        assert_eq!(trends["yearly"][0]["year"], 2015);
        assert_eq!(trends["yearly"][1]["successRate"], 0.0);
        assert_eq!(trends["landingTypes"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_launches_passthrough() {
        let mut upstream = mockito::Server::new_async().await;
        upstream
            .mock("GET", "/launches/past")
            .with_status(200)
            .with_body(r#"[{"name":"Tintin A & B","extra":{"kept":true}}]"#)
            .create_async()
            .await;
        let base = spawn_app(&upstream).await;

        let (status, body) = get_json(&format!("{base}/api/launches")).await;

        assert_eq!(status, 200);
        assert_eq!(body[0]["extra"]["kept"], true);
    }

    #[tokio::test]
    async fn test_analysis_query_options() {
        let mut upstream = mockito::Server::new_async().await;
        upstream
            .mock("GET", "/cores")
            .with_status(200)
            .with_body(CORES)
            .create_async()
            .await;
        upstream
            .mock("GET", "/launches/past")
            .with_status(200)
            .with_body(LAUNCHES)
            .create_async()
            .await;
        let base = spawn_app(&upstream).await;

        let (status, body) = get_json(&format!("{base}/api/analysis?top=1&failures=1")).await;

        assert_eq!(status, 200);
        assert_eq!(body["reuse"]["topReused"].as_array().unwrap().len(), 1);
        assert_eq!(body["failures"]["failures"], 1);
        assert_eq!(body["failures"]["recent"][0]["launchName"], "Jason 3");
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_500() {
        let mut upstream = mockito::Server::new_async().await;
        upstream
            .mock("GET", "/landpads")
            .with_status(500)
            .create_async()
            .await;
        let base = spawn_app(&upstream).await;

        let (status, body) = get_json(&format!("{base}/api/landpads")).await;

        assert_eq!(status, 500);
        assert!(body["error"].as_str().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let mut upstream = mockito::Server::new_async().await;
        upstream
            .mock("GET", "/cores")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let base = spawn_app(&upstream).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/api/cores"))
            .header("Origin", "http://localhost:5173")
            .send()
            .await
            .unwrap();

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!([]));
    }
}
