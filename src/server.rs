use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::{
    cmp::Ordering,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::{net::TcpListener, time::Instant};
use tower_http::services::ServeDir;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Debug)]
struct SiteConfig {
    port: u16,
    dist_dir: PathBuf,
    log_level: LogLevel,
}

impl SiteConfig {
    fn from_env() -> Self {
        Self::from_values(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("SITE_DIST_DIR").ok().as_deref(),
            std::env::var("LOG_LEVEL").ok().as_deref(),
        )
    }

    fn from_values(port: Option<&str>, dist_dir: Option<&str>, log_level: Option<&str>) -> Self {
        Self {
            port: parse_u16_with_bounds(port, DEFAULT_PORT, PORT_BOUNDS),
            dist_dir: non_empty(dist_dir)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR)),
            log_level: parse_log_level(log_level, DEFAULT_LOG_LEVEL),
        }
    }
}

#[derive(Clone)]
struct SiteState {
    config: SiteConfig,
}

#[derive(Serialize)]
struct LogRecord<'a, T: Serialize> {
    ts: u64,
    level: &'static str,
    event: &'a str,
    #[serde(flatten)]
    fields: T,
}

#[derive(Serialize)]
struct RequestFields<'a> {
    request_id: &'a str,
    method: &'a str,
    path: &'a str,
    status: u16,
    duration_ms: u128,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SiteConfig::from_env();
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let local_addr = listener.local_addr()?;

    log_event(
        &config,
        LogLevel::Info,
        "server_started",
        serde_json::json!({
            "addr": local_addr.to_string(),
            "dist_dir": config.dist_dir.display().to_string(),
        }),
    );

    axum::serve(listener, router(config)).await?;
    Ok(())
}

fn router(config: SiteConfig) -> Router {
    let static_service = ServeDir::new(&config.dist_dir);
    let state = SiteState { config };

    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn log_requests(State(state): State<SiteState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();
    let level = if path == "/healthz" && status.is_success() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    log_event(
        &state.config,
        level,
        "http_request",
        RequestFields {
            request_id: &request_id,
            method: &method,
            path: &path,
            status: status.as_u16(),
            duration_ms: started.elapsed().as_millis(),
        },
    );

    with_request_id(response, &request_id)
}

fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn parse_u16_with_bounds(raw: Option<&str>, default: u16, bounds: (u16, u16)) -> u16 {
    raw.and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_log_level(raw: Option<&str>, default: LogLevel) -> LogLevel {
    match non_empty(raw)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(generate_request_id)
}

fn format_log_line<T: Serialize>(level: LogLevel, event: &str, fields: T) -> Option<String> {
    serde_json::to_string(&LogRecord {
        ts: now_unix_seconds(),
        level: level.as_str(),
        event,
        fields,
    })
    .ok()
}

fn log_event<T: Serialize>(config: &SiteConfig, level: LogLevel, event: &str, fields: T) {
    if level < config.log_level {
        return;
    }

    if let Some(line) = format_log_line(level, event, fields) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dist_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "showcase-{name}-{}-{}",
            std::process::id(),
            now_unix_millis()
        ));
        fs::create_dir_all(&dir).expect("create temp dist dir");
        fs::write(dir.join("index.html"), "<!doctype html><div id=\"app\"></div>")
            .expect("write index");
        fs::write(dir.join("styles.css"), "body { margin: 0; }").expect("write stylesheet");
        dir
    }

    async fn spawn_site(dist_dir: PathBuf) -> String {
        let config = SiteConfig {
            port: 0,
            dist_dir,
            log_level: LogLevel::Info,
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, router(config)).await.expect("serve");
        });

        format!("http://{addr}")
    }

    #[test]
    fn config_falls_back_on_invalid_values() {
        let config = SiteConfig::from_values(Some("0"), Some("  "), Some("verbose"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from(DEFAULT_DIST_DIR));
        assert_eq!(config.log_level, LogLevel::Info);

        let config = SiteConfig::from_values(Some("not-a-port"), None, None);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn config_accepts_valid_values() {
        let config = SiteConfig::from_values(Some(" 3000 "), Some("public"), Some("DEBUG"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.dist_dir, PathBuf::from("public"));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn debug_sorts_below_info() {
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[test]
    fn incoming_request_id_is_reused() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(" abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");

        let generated = resolve_request_id(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
    }

    #[test]
    fn log_line_flattens_fields() {
        let line = format_log_line(
            LogLevel::Info,
            "http_request",
            serde_json::json!({ "status": 200 }),
        )
        .expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");

        assert_eq!(value["level"], "info");
        assert_eq!(value["event"], "http_request");
        assert_eq!(value["status"], 200);
        assert!(value["ts"].is_u64());
    }

    #[tokio::test]
    async fn serves_assets_and_rejects_unknown_paths() {
        let base = spawn_site(temp_dist_dir("assets")).await;
        let client = reqwest::Client::new();

        let page = client.get(format!("{base}/")).send().await.expect("index request");
        assert_eq!(page.status(), reqwest::StatusCode::OK);
        assert!(page.text().await.expect("body").contains("id=\"app\""));

        let stylesheet = client
            .get(format!("{base}/styles.css"))
            .send()
            .await
            .expect("stylesheet request");
        assert_eq!(stylesheet.status(), reqwest::StatusCode::OK);
        assert_eq!(stylesheet.text().await.expect("body"), "body { margin: 0; }");

        let unknown = client
            .get(format!("{base}/work/case-study"))
            .send()
            .await
            .expect("unknown path request");
        assert_eq!(unknown.status(), reqwest::StatusCode::NOT_FOUND);
        assert!(unknown.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn health_check_echoes_request_id() {
        let base = spawn_site(temp_dist_dir("health")).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/healthz"))
            .header(REQUEST_ID_HEADER, "req-1")
            .send()
            .await
            .expect("health request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("req-1")
        );
        assert_eq!(response.text().await.expect("body"), "ok");
    }
}
