use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{info, warn};

use crate::detection::WorkbenchDetector;
use crate::error::ServiceError;
use crate::service::payload::{process_payload, ErrorBody, ProcessRequest};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Largest accepted request body; base64 photos are big.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

pub fn router(detector: Arc<WorkbenchDetector>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/process", post(process))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(detector)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn process(
    State(detector): State<Arc<WorkbenchDetector>>,
    body: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(request) = body.map_err(|e| ServiceError::InvalidJson(e.body_text()))?;

    let result = tokio::task::spawn_blocking(move || process_payload(&detector, request))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    match result {
        Ok(response) => {
            info!(detections = response.detections.len(), "Processed upload");
            Ok(Json(response).into_response())
        }
        Err(err) => {
            warn!(error = %err, "Rejected upload");
            Err(err)
        }
    }
}

pub async fn serve(detector: WorkbenchDetector, config: ServerConfig) -> anyhow::Result<()> {
    let app = router(Arc::new(detector), config.max_body_bytes);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
