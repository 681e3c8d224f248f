pub mod handlers;
pub mod middleware;
pub mod extractors;
pub mod ui;

use crate::{models::ModelManager, utils::error::RockError, Config, Result, RockModel};
use axum::{
    extract::{DefaultBodyLimit, State},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

/// 所有会话共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub classifier: Arc<dyn RockModel>,
}

impl AppState {
    pub fn new(config: Config, classifier: Arc<dyn RockModel>) -> Self {
        Self { config, classifier }
    }
}

pub async fn serve(config: Config) -> Result<()> {
    // 模型在启动时加载，失败则不提供服务
    let classifier = ModelManager::init(&config)?;

    let app = create_app(AppState::new(config.clone(), classifier));

    // 解析绑定地址
    let addr: SocketAddr = config.bind_addr.parse().map_err(|e| {
        RockError::Config(format!("Invalid bind address {}: {}", config.bind_addr, e))
    })?;

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Routes:");
    tracing::info!("  GET  /         - Web UI");
    tracing::info!("  POST /classify - Multipart image upload");
    tracing::info!("  GET  /health   - Health check");

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        RockError::Internal(format!("Failed to bind to address {}: {}", addr, e))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| RockError::Internal(format!("Server failed to start: {}", e)))?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    let max_request_size = state.config.server_config.max_request_size;
    let request_timeout = Duration::from_secs(state.config.server_config.request_timeout);

    Router::new()
        // Web UI路由
        .route("/", get(handlers::index_handler))
        .route(
            "/classify",
            get(handlers::index_handler).post(handlers::classify_handler),
        )
        // 系统路由
        .route("/health", get(health_handler))
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        // Multipart默认只允许2MB，这里放开到配置值
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(RequestBodyLimitLayer::new(max_request_size))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// 错误以带状态码的HTML页面返回，页面上保留上传表单
impl IntoResponse for RockError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {} ({})", self, status);
        }

        (status, Html(ui::render_error_page(&self))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub model: String,
}

/// 健康检查端点
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        model: state.config.model_path().display().to_string(),
    })
}
