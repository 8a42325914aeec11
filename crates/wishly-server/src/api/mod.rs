mod scrape;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use wishly_scraper::ProductPageClient;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<ProductPageClient>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_unreachable" => StatusCode::BAD_GATEWAY,
            "upstream_timeout" => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Builds the CORS layer. An empty origin list allows any origin.
fn build_cors(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/scrape", post(scrape::scrape_url))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                )),
        )
}

pub fn build_app(
    state: AppState,
    auth: AuthState,
    rate_limit: RateLimitState,
    cors_origins: &[String],
) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors(cors_origins))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_XSS_PROTECTION,
                    HeaderValue::from_static("1; mode=block"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::STRICT_TRANSPORT_SECURITY,
                    HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
                ))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Limiter for the scrape endpoint: `per_minute` requests per caller.
pub fn scrape_rate_limit_state(per_minute: usize) -> RateLimitState {
    RateLimitState::new(per_minute, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state() -> AppState {
        AppState {
            scraper: Arc::new(
                ProductPageClient::new(1, "wishly-test/0.1").expect("build test client"),
            ),
        }
    }

    fn test_app() -> Router {
        build_app(
            test_state(),
            AuthState::disabled(),
            scrape_rate_limit_state(100),
            &[],
        )
    }

    fn scrape_request(url: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/scrape")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
            .body(Body::from(serde_json::json!({ "url": url }).to_string()))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[test]
    fn api_error_codes_map_to_statuses() {
        let cases = [
            ("validation_error", StatusCode::BAD_REQUEST),
            ("bad_request", StatusCode::BAD_REQUEST),
            ("unauthorized", StatusCode::UNAUTHORIZED),
            ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
            ("upstream_unreachable", StatusCode::BAD_GATEWAY),
            ("upstream_timeout", StatusCode::GATEWAY_TIMEOUT),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            let response = ApiError::new("req-1", code, "message").into_response();
            assert_eq!(response.status(), status, "code {code}");
        }
    }

    #[tokio::test]
    async fn health_returns_ok_with_security_headers() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["x-request-id"], "req-health");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(headers[header::X_XSS_PROTECTION], "1; mode=block");
        assert!(headers.contains_key(header::STRICT_TRANSPORT_SECURITY));

        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-health");
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        let id = response.headers()["x-request-id"]
            .to_str()
            .expect("ascii id")
            .to_owned();
        assert!(uuid::Uuid::parse_str(&id).is_ok(), "not a uuid: {id}");
    }

    #[tokio::test]
    async fn cors_echoes_configured_origin() {
        let app = build_app(
            test_state(),
            AuthState::disabled(),
            scrape_rate_limit_state(100),
            &["https://app.wishly.ng".to_string()],
        );
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header(header::ORIGIN, "https://app.wishly.ng")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.wishly.ng"
        );
    }

    #[tokio::test]
    async fn scrape_returns_product_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/item"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"<meta property="og:title" content="Clay Mug">
                   <meta property="product:price:amount" content="4,500">
                   <meta property="product:price:currency" content="NGN">"#,
                "text/html",
            ))
            .mount(&server)
            .await;

        let url = format!("{}/item", server.uri());
        let response = test_app()
            .oneshot(scrape_request(&url, None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["name"], "Clay Mug");
        assert_eq!(json["data"]["price"], 4500.0);
        assert_eq!(json["data"]["currency"], "NGN");
        assert_eq!(json["data"]["image_url"], "");
        assert_eq!(json["data"]["url"], url.as_str());
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn scrape_rejects_blank_url() {
        let response = test_app()
            .oneshot(scrape_request("   ", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn scrape_invalid_url_is_bad_request() {
        let response = test_app()
            .oneshot(scrape_request("https://", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn scrape_timeout_is_gateway_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let response = test_app()
            .oneshot(scrape_request(&format!("{}/slow", server.uri()), None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "upstream_timeout");
        assert_eq!(
            json["error"]["message"],
            "the product page took too long to respond"
        );
    }

    #[tokio::test]
    async fn scrape_upstream_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let response = test_app()
            .oneshot(scrape_request(&format!("{}/down", server.uri()), None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "upstream_unreachable");
        let message = json["error"]["message"].as_str().expect("message");
        assert!(message.starts_with("could not reach the product page: "));
    }

    #[tokio::test]
    async fn scrape_requires_bearer_token_when_auth_enabled() {
        let auth = AuthState::from_raw("secret-key", false).expect("auth");
        let app = build_app(test_state(), auth, scrape_rate_limit_state(100), &[]);

        let response = app
            .clone()
            .oneshot(scrape_request("https://", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(scrape_request("https://", Some("secret-key")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_is_public_when_auth_enabled() {
        let auth = AuthState::from_raw("secret-key", false).expect("auth");
        let app = build_app(test_state(), auth, scrape_rate_limit_state(100), &[]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn scrape_is_rate_limited_per_api_key() {
        let auth = AuthState::from_raw("key-a,key-b", false).expect("auth");
        let app = build_app(test_state(), auth, scrape_rate_limit_state(1), &[]);

        let first = app
            .clone()
            .oneshot(scrape_request("https://", Some("key-a")))
            .await
            .expect("response");
        assert_eq!(first.status(), StatusCode::BAD_REQUEST);

        let second = app
            .clone()
            .oneshot(scrape_request("https://", Some("key-a")))
            .await
            .expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        let json = json_body(second).await;
        assert_eq!(json["error"]["code"], "rate_limited");

        let other_key = app
            .oneshot(scrape_request("https://", Some("key-b")))
            .await
            .expect("response");
        assert_eq!(other_key.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rotating_tokens_share_one_window_when_auth_disabled() {
        let app = build_app(
            test_state(),
            AuthState::disabled(),
            scrape_rate_limit_state(1),
            &[],
        );

        let first = app
            .clone()
            .oneshot(scrape_request("https://", None))
            .await
            .expect("response");
        assert_eq!(first.status(), StatusCode::BAD_REQUEST);

        for token in ["made-up-1", "made-up-2"] {
            let response = app
                .clone()
                .oneshot(scrape_request("https://", Some(token)))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS, "token {token}");
        }
    }
}
