use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::{HeaderName, Method, StatusCode},
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use callscribe_service::{Error as ServiceError, RetrievalRequest, RetrievalResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/recordings", get(list_recordings))
		.route("/v1/recordings/{hash}", get(recordings_by_hash))
		.layer(cors_layer())
		.with_state(state)
}

// The retrieval surface is consumed straight from browsers, so the CORS
// headers are fixed and attached to every response, errors included.
fn cors_layer() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers([
			HeaderName::from_static("content-type"),
			HeaderName::from_static("x-amz-date"),
			HeaderName::from_static("authorization"),
			HeaderName::from_static("x-api-key"),
			HeaderName::from_static("x-amz-security-token"),
		])
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct RetrievalParams {
	hash: Option<String>,
	#[serde(rename = "callId")]
	call_id: Option<String>,
	#[serde(rename = "pageSize")]
	page_size: Option<String>,
	#[serde(rename = "nextToken")]
	next_token: Option<String>,
}

impl RetrievalParams {
	fn into_request(self, path_hash: Option<String>) -> RetrievalRequest {
		RetrievalRequest {
			hash: path_hash.or(self.hash),
			call_id: self.call_id,
			page_size: self.page_size,
			next_token: self.next_token,
		}
	}
}

async fn list_recordings(
	State(state): State<AppState>,
	Query(params): Query<RetrievalParams>,
) -> Result<Json<RetrievalResponse>, ApiError> {
	let response = state.service.retrieve(params.into_request(None)).await?;

	Ok(Json(response))
}

async fn recordings_by_hash(
	State(state): State<AppState>,
	Path(hash): Path<String>,
	Query(params): Query<RetrievalParams>,
) -> Result<Json<RetrievalResponse>, ApiError> {
	let response = state.service.retrieve(params.into_request(Some(hash))).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	message: String,
	#[serde(rename = "searchedHash", skip_serializing_if = "Option::is_none")]
	searched_hash: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error: String,
	message: String,
	searched_hash: Option<String>,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::CursorDecode { .. } => Self {
				status: StatusCode::BAD_REQUEST,
				error: "Invalid pagination token".to_string(),
				message: "The nextToken parameter is malformed or expired".to_string(),
				searched_hash: None,
			},
			ServiceError::NotFound { searched_hash } => Self {
				status: StatusCode::NOT_FOUND,
				error: "No records found".to_string(),
				message: "No call recording analytics found for the given hash".to_string(),
				searched_hash: Some(searched_hash),
			},
			other => Self {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				error: "Internal server error".to_string(),
				message: other.to_string(),
				searched_hash: None,
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody {
			error: self.error,
			message: self.message,
			searched_hash: self.searched_hash,
		};

		(self.status, Json(body)).into_response()
	}
}
