use crate::error::{Error, Result};
use crate::model::{DownloadRequest, InferenceSettings, ModelDescriptor, ModelRegistry};
use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
	Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
	registry: ModelRegistry,
}

impl AppState {
	pub fn new(registry: ModelRegistry) -> Self {
		Self { registry }
	}
}

#[derive(Serialize)]
pub struct HealthResponse {
	pub status: String,
	pub models: usize,
}

#[derive(Deserialize)]
pub struct PromptRequest {
	pub model: String,
	pub prompt: String,
}

#[derive(Serialize)]
pub struct PromptResponse {
	pub model: String,
	pub prompt: String,
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let (status, message) = match self {
			Error::ModelNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
			Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
			_ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
		};

		let body = Json(serde_json::json!({
			"error": message,
		}));

		(status, body).into_response()
	}
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok".to_string(),
		models: state.registry.len(),
	})
}

async fn list_handler(State(state): State<AppState>) -> Json<&'static [ModelDescriptor]> {
	Json(state.registry.list())
}

async fn model_handler(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<&'static ModelDescriptor>> {
	Ok(Json(state.registry.get(&id)?))
}

async fn download_handler(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<DownloadRequest>> {
	Ok(Json(state.registry.get(&id)?.download_request()))
}

async fn inference_handler(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<InferenceSettings>> {
	Ok(Json(state.registry.get(&id)?.inference_settings()))
}

async fn prompt_handler(
	State(state): State<AppState>,
	Json(payload): Json<PromptRequest>,
) -> Result<Json<PromptResponse>> {
	if payload.prompt.trim().is_empty() {
		return Err(Error::InvalidInput("Prompt cannot be empty".to_string()));
	}

	let model = state.registry.get(&payload.model)?;

	Ok(Json(PromptResponse {
		model: model.name().to_string(),
		prompt: model.ui_variant.format_prompt(&payload.prompt),
	}))
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/api/health", get(health_handler))
		.route("/api/models", get(list_handler))
		.route("/api/models/{id}", get(model_handler))
		.route("/api/models/{id}/download", get(download_handler))
		.route("/api/models/{id}/inference", get(inference_handler))
		.route("/api/prompt", post(prompt_handler))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state)
}

pub async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
	let app = create_router(state);
	let addr = format!("{}:{}", host, port);

	tracing::info!("Starting server on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr)
		.await
		.map_err(|e| Error::ConfigError(format!("Failed to bind to {}: {}", addr, e)))?;

	axum::serve(listener, app)
		.await
		.map_err(|e| Error::ConfigError(format!("Server error: {}", e)))?;

	Ok(())
}
