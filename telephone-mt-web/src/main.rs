use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use telephone_mt::{
    ChainOrchestrator, HopRecord, LibreTranslateConfig, LibreTranslateProvider, MIN_HOP_COUNT,
    MtError, TranslationRequest, TranslationStep,
};

/// Hop ceiling applied when `TELEPHONE_MT_MAX_HOPS` is not set
const DEFAULT_MAX_HOPS: usize = 100;

fn default_hops() -> i64 {
    MIN_HOP_COUNT as i64
}

#[derive(Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub start_language: String,
    pub end_language: String,
    #[serde(default = "default_hops")]
    pub hops: i64,
}

#[derive(Serialize, Deserialize)]
pub struct PlanRequest {
    pub start_language: String,
    pub end_language: String,
    #[serde(default = "default_hops")]
    pub hops: i64,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub translated: String,
    pub source: String,
    pub hops: Vec<HopRecord>,
}

#[derive(Serialize)]
pub struct PlanResponse {
    pub hop_count: usize,
    pub steps: Vec<TranslationStep>,
}

#[derive(Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ChainOrchestrator>,
}

/// Server settings, read from the environment
struct ServiceConfig {
    bind: String,
    libre: LibreTranslateConfig,
    max_hops: usize,
}

impl ServiceConfig {
    fn from_env() -> Result<Self, String> {
        let mut libre = LibreTranslateConfig::default();
        if let Ok(url) = std::env::var("LIBRETRANSLATE_URL") {
            libre.base_url = url;
        }
        libre.api_key = std::env::var("LIBRETRANSLATE_API_KEY").ok();

        let max_hops = match std::env::var("TELEPHONE_MT_MAX_HOPS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("Invalid TELEPHONE_MT_MAX_HOPS '{}': {}", raw, e))?,
            Err(_) => DEFAULT_MAX_HOPS,
        };

        let bind =
            std::env::var("TELEPHONE_MT_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        Ok(Self {
            bind,
            libre,
            max_hops,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;

    let provider = LibreTranslateProvider::new(config.libre.clone())
        .map_err(|e| format!("Failed to initialize translator: {}", e))?;
    info!(
        endpoint = %provider.endpoint(),
        max_hops = config.max_hops,
        "📞 Starting telephone-mt server"
    );

    let orchestrator = ChainOrchestrator::new(Arc::new(provider)).with_max_hops(config.max_hops);
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("🚀 Server running at http://{}", config.bind);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/languages", get(list_languages))
        .route("/api/plan", post(plan_chain))
        .route("/api/translate", post(translate_chain))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn error_response(error: MtError) -> ApiError {
    let status = match &error {
        MtError::InvalidLanguageCode(_) | MtError::HopLimitExceeded { .. } => {
            StatusCode::BAD_REQUEST
        }
        MtError::NetworkError(_) | MtError::ServiceError(_) => StatusCode::BAD_GATEWAY,
        MtError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

async fn list_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: state
            .orchestrator
            .catalog()
            .codes()
            .iter()
            .map(|c| c.to_string())
            .collect(),
    })
}

async fn plan_chain(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let request = TranslationRequest::new(
        String::new(),
        request.start_language,
        request.end_language,
        request.hops,
    );
    let plan = state.orchestrator.plan(&request).map_err(error_response)?;

    Ok(Json(PlanResponse {
        hop_count: request.hop_count(),
        steps: plan.steps().to_vec(),
    }))
}

async fn translate_chain(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    info!(
        start = %request.start_language,
        end = %request.end_language,
        hops = request.hops,
        chars = request.text.chars().count(),
        "Translate request"
    );

    let chain_request = TranslationRequest::new(
        request.text.clone(),
        request.start_language,
        request.end_language,
        request.hops,
    );

    let result = state
        .orchestrator
        .run(&chain_request)
        .await
        .map_err(|e| {
            warn!("Translation chain failed: {}", e);
            error_response(e)
        })?;

    debug!(
        "Successfully translated: {} → {}",
        &request.text, &result.final_text
    );

    Ok(Json(TranslateResponse {
        translated: result.final_text,
        source: request.text,
        hops: result.hops,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use telephone_mt::{MockMode, MockTranslator};
    use tower::ServiceExt;

    fn test_app(mode: MockMode) -> Router {
        let orchestrator = ChainOrchestrator::new(Arc::new(MockTranslator::new(mode)))
            .with_max_hops(DEFAULT_MAX_HOPS);
        app(AppState {
            orchestrator: Arc::new(orchestrator),
        })
    }

    async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_languages() {
        let response = test_app(MockMode::Suffix)
            .oneshot(
                Request::builder()
                    .uri("/api/languages")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["languages"][0], "af");
        assert_eq!(json["languages"].as_array().unwrap().len(), 107);
    }

    #[tokio::test]
    async fn test_translate() {
        let (status, json) = post_json(
            test_app(MockMode::Suffix),
            "/api/translate",
            serde_json::json!({
                "text": "hello",
                "start_language": "en",
                "end_language": "es",
                "hops": 4
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["translated"], "hello_af_am_ar_es");
        assert_eq!(json["source"], "hello");
        assert_eq!(json["hops"].as_array().unwrap().len(), 4);
        assert_eq!(json["hops"][0]["source"], "en");
        assert_eq!(json["hops"][0]["target"], "af");
        assert_eq!(json["hops"][0]["text"], "hello_af");
    }

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_translate_keeps_user_text_out_of_info_logs() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (status, _) = post_json(
            test_app(MockMode::Suffix),
            "/api/translate",
            serde_json::json!({
                "text": "my private note",
                "start_language": "en",
                "end_language": "es",
                "hops": 4
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Translate request"));
        assert!(output.contains("chars=15"));
        assert!(!output.contains("my private note"));
    }

    #[tokio::test]
    async fn test_translate_raises_hops_to_minimum() {
        let (status, json) = post_json(
            test_app(MockMode::Suffix),
            "/api/translate",
            serde_json::json!({
                "text": "hi",
                "start_language": "en",
                "end_language": "es",
                "hops": 1
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["translated"], "hi_af_am_ar_es");
    }

    #[tokio::test]
    async fn test_translate_invalid_language() {
        let (status, json) = post_json(
            test_app(MockMode::Suffix),
            "/api/translate",
            serde_json::json!({
                "text": "hello",
                "start_language": "english",
                "end_language": "es"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("english"));
    }

    #[tokio::test]
    async fn test_translate_over_ceiling() {
        let (status, _) = post_json(
            test_app(MockMode::Suffix),
            "/api/translate",
            serde_json::json!({
                "text": "hello",
                "start_language": "en",
                "end_language": "es",
                "hops": 101
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_translate_service_failure() {
        let (status, json) = post_json(
            test_app(MockMode::Error("upstream down".to_string())),
            "/api/translate",
            serde_json::json!({
                "text": "hello",
                "start_language": "en",
                "end_language": "es",
                "hops": 4
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"].as_str().unwrap().contains("upstream down"));
        assert!(json.get("translated").is_none());
    }

    #[tokio::test]
    async fn test_plan_preview() {
        let (status, json) = post_json(
            test_app(MockMode::Error("must not be called".to_string())),
            "/api/plan",
            serde_json::json!({
                "start_language": "af",
                "end_language": "es",
                "hops": 4
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["hop_count"], 4);
        assert_eq!(
            json["steps"],
            serde_json::json!([
                {"source": "af", "target": "am"},
                {"source": "am", "target": "ar"},
                {"source": "ar", "target": "es"}
            ])
        );
    }
}
