mod shows;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use mantra_shows::{ShowFinder, ShowsError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<ShowFinder>,
}

/// `{"error": "..."}` with the matching status.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    ticketing: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
        }
    }
}

impl From<&ShowsError> for ApiError {
    fn from(err: &ShowsError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.user_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/shows", get(shows::list_shows))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let ticketing = if state.finder.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };
    Json(HealthData {
        status: "ok",
        ticketing,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use mantra_geocode::ZipGeocoder;
    use mantra_ticketing::{AffiliateLinker, DiscoveryClient};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const AFFILIATE_BASE: &str = "https://ticketmaster.evyy.net/c/6786771/264167/4272";

    fn app_for(server: &MockServer, configured: bool) -> Router {
        let http = reqwest::Client::new();
        let geocoder = ZipGeocoder::with_base_url(http.clone(), &server.uri(), Duration::ZERO)
            .expect("geocoder");
        let discovery = configured.then(|| {
            DiscoveryClient::with_base_url(http, "test-key", &server.uri(), "US", Duration::ZERO)
                .expect("discovery client")
        });
        let finder = ShowFinder::new(discovery, geocoder, AffiliateLinker::new(AFFILIATE_BASE));
        build_app(AppState {
            finder: Arc::new(finder),
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        assert!(
            response.headers().contains_key(REQUEST_ID_HEADER),
            "every response carries a request id"
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json body");
        (status, json)
    }

    async fn mount_geocode(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/us/94102"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "places": [{ "latitude": "37.7813", "longitude": "-122.4209" }]
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn api_error_maps_every_shows_error() {
        let cases = [
            (ShowsError::NotConfigured, StatusCode::SERVICE_UNAVAILABLE),
            (ShowsError::InvalidZip, StatusCode::BAD_REQUEST),
            (ShowsError::ZipNotFound, StatusCode::BAD_REQUEST),
            (
                ShowsError::Upstream {
                    status: 500,
                    body: String::new(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                ShowsError::Unexpected("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let response = ApiError::from(&err).into_response();
            assert_eq!(response.status(), expected, "{err:?}");
        }
    }

    #[tokio::test]
    async fn health_reports_ticketing_configuration() {
        let server = MockServer::start().await;

        let (status, json) = get_json(app_for(&server, true), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"status": "ok", "ticketing": "configured"}));

        let (_, json) = get_json(app_for(&server, false), "/api/health").await;
        assert_eq!(json["ticketing"], "unconfigured");
    }

    #[tokio::test]
    async fn shows_returns_envelope() {
        let server = MockServer::start().await;
        mount_geocode(&server).await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_embedded": { "events": [{
                    "id": "E1",
                    "name": "Gojira",
                    "url": "https://www.ticketmaster.com/event/E1",
                    "dates": { "start": { "localDate": "2026-11-02", "localTime": "20:00:00" } },
                    "_embedded": { "venues": [{ "name": "The Warfield", "distance": 1.6 }] },
                    "priceRanges": [{ "min": 45.0, "max": 85.0 }]
                }]},
                "page": { "totalElements": 1, "totalPages": 1 }
            })))
            .mount(&server)
            .await;

        let (status, json) =
            get_json(app_for(&server, true), "/api/shows?zip=94102&radius=25&page=0").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["page"], 0);
        assert_eq!(json["zip"], "94102");
        assert_eq!(json["radius"], 25);
        assert!(json["keyword"].is_null());

        let show = &json["shows"][0];
        assert_eq!(show["id"], "E1");
        assert_eq!(show["time"], "20:00");
        assert_eq!(show["distance"], 2);
        assert_eq!(show["genre"], "Rock");
        assert_eq!(show["priceMin"], 45.0);
        assert!(show["ticketUrl"]
            .as_str()
            .is_some_and(|u| u.starts_with(AFFILIATE_BASE)));
    }

    #[tokio::test]
    async fn shows_defaults_radius_and_page() {
        let server = MockServer::start().await;
        mount_geocode(&server).await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let (status, json) = get_json(app_for(&server, true), "/api/shows?zip=94102").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["radius"], 50);
        assert_eq!(json["page"], 0);
        assert_eq!(json["shows"], serde_json::json!([]));
        assert_eq!(json["totalPages"], 1);
    }

    #[tokio::test]
    async fn shows_rejects_invalid_zip() {
        let server = MockServer::start().await;
        let (status, json) = get_json(app_for(&server, true), "/api/shows?zip=941").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "Valid 5-digit zip code required"}));
    }

    #[tokio::test]
    async fn shows_rejects_unlocatable_zip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/00000"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (status, json) = get_json(app_for(&server, true), "/api/shows?zip=00000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Could not locate that zip code");
    }

    #[tokio::test]
    async fn shows_unconfigured_is_service_unavailable() {
        let server = MockServer::start().await;
        let (status, json) = get_json(app_for(&server, false), "/api/shows?zip=94102").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "Ticketmaster API not configured");
    }

    #[tokio::test]
    async fn shows_repeated_param_still_checks_configuration_first() {
        let server = MockServer::start().await;
        let (status, json) =
            get_json(app_for(&server, false), "/api/shows?zip=94102&zip=10001").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json, serde_json::json!({"error": "Ticketmaster API not configured"}));
    }

    #[tokio::test]
    async fn shows_repeated_param_uses_first_value() {
        let server = MockServer::start().await;
        mount_geocode(&server).await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let (status, json) = get_json(
            app_for(&server, true),
            "/api/shows?zip=94102&zip=10001&radius=25&radius=5",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["zip"], "94102");
        assert_eq!(json["radius"], 25);
    }

    #[tokio::test]
    async fn shows_upstream_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        mount_geocode(&server).await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let (status, json) = get_json(app_for(&server, true), "/api/shows?zip=94102").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json, serde_json::json!({"error": "Failed to fetch shows"}));
    }

    #[tokio::test]
    async fn shows_keyword_search_echoes_keyword() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": { "totalElements": 0, "totalPages": 0 }
            })))
            .mount(&server)
            .await;

        let (status, json) =
            get_json(app_for(&server, true), "/api/shows?q=Converge&sort=relevance").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["keyword"], "Converge");
        assert_eq!(json["zip"], "");
    }
}
