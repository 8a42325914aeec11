use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Limiter key for requests without a verified bearer token.
const ANONYMOUS_CALLER: &str = "anonymous";

/// Idle caller windows are swept once the table grows past this size.
const MAX_TRACKED_CALLERS: usize = 1024;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Bearer token that passed [`require_bearer_auth`], stored as a request
/// extension. Absent when auth is disabled.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub String);

/// API key auth settings used by middleware.
#[derive(Debug, Clone)]
pub struct AuthState {
    api_keys: Arc<HashSet<String>>,
    pub enabled: bool,
}

impl AuthState {
    /// Builds auth config from `WISHLY_API_KEYS` (comma-separated bearer tokens).
    ///
    /// In development, empty/missing keys disable auth for local iteration.
    /// In non-development envs, empty/missing keys fail startup.
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var("WISHLY_API_KEYS").unwrap_or_default();
        Self::from_raw(&raw, is_development)
    }

    pub(crate) fn from_raw(raw: &str, is_development: bool) -> anyhow::Result<Self> {
        let keys: HashSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        if keys.is_empty() {
            if is_development {
                tracing::warn!(
                    "WISHLY_API_KEYS not set; bearer auth disabled in development environment"
                );
                return Ok(Self::disabled());
            }

            anyhow::bail!(
                "WISHLY_API_KEYS is required outside development; provide comma-separated bearer tokens"
            );
        }

        Ok(Self {
            api_keys: Arc::new(keys),
            enabled: true,
        })
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            api_keys: Arc::new(HashSet::new()),
            enabled: false,
        }
    }

    fn allows(&self, token: &str) -> bool {
        self.api_keys.contains(token)
    }
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter with one window per caller.
///
/// Callers are told apart by their verified bearer token, so the number of
/// windows is bounded by the configured key set. Requests without a verified
/// token (including every request while auth is disabled) share a single
/// anonymous window.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    callers: Arc<Mutex<HashMap<String, RateLimitWindow>>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            callers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Counts one request for `caller`. Returns `false` if the caller has
    /// used up its window.
    async fn admit(&self, caller: &str) -> bool {
        let mut callers = self.callers.lock().await;

        if callers.len() > MAX_TRACKED_CALLERS {
            let window = self.window;
            callers.retain(|_, w| w.started_at.elapsed() < window);
        }

        let entry = callers
            .entry(caller.to_owned())
            .or_insert_with(|| RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            });

        if entry.started_at.elapsed() >= self.window {
            entry.started_at = Instant::now();
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

fn middleware_error(status: StatusCode, code: &'static str, message: &'static str) -> Response {
    (
        status,
        Json(MiddlewareErrorBody {
            error: MiddlewareError { code, message },
        }),
    )
        .into_response()
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing Bearer token auth when enabled.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        return next.run(req).await;
    }

    let verified = extract_bearer_token(req.headers().get(AUTHORIZATION))
        .filter(|token| auth.allows(token))
        .map(ToOwned::to_owned);

    match verified {
        Some(token) => {
            req.extensions_mut().insert(AuthenticatedCaller(token));
            next.run(req).await
        }
        None => middleware_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid bearer token",
        ),
    }
}

/// Middleware enforcing a fixed request-per-window limit for each caller.
///
/// Must run inside [`require_bearer_auth`]; it keys on the token that layer
/// verified, never on the raw `Authorization` header.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let caller = req
        .extensions()
        .get::<AuthenticatedCaller>()
        .map_or_else(|| ANONYMOUS_CALLER.to_owned(), |c| c.0.clone());

    if !rate_limit.admit(&caller).await {
        tracing::warn!("scrape rate limit exceeded");
        return middleware_error(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "rate limit exceeded",
        );
    }

    next.run(req).await
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}
