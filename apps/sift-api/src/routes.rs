use axum::{
	Json, Router,
	body::Body,
	extract::{Path, Query, State},
	http::{HeaderMap, Request, StatusCode, header},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use uuid::Uuid;

use sift_domain::content::ContentKind;
use sift_service::{Error as ServiceError, ListParams, ListResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	let v1 = Router::new()
		.route("/v1/workspaces/{workspace_id}/{kind}", get(list_content))
		.route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

	Router::new().route("/health", get(health)).merge(v1).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_content(
	State(state): State<AppState>,
	Path((workspace_id, kind)): Path<(String, String)>,
	Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
	let workspace_id = parse_workspace_id(&workspace_id)?;
	let kind: ContentKind =
		kind.parse().map_err(|message| ServiceError::InvalidRequest { message })?;
	let params = ListParams::from_pairs(pairs);
	let response = state.service.list(kind, workspace_id, &params).await?;

	Ok(Json(response))
}

fn parse_workspace_id(raw: &str) -> Result<Uuid, ApiError> {
	match Uuid::parse_str(raw) {
		Ok(id) if !id.is_nil() => Ok(id),
		_ => Err(json_error(
			StatusCode::UNAUTHORIZED,
			"not_authorized",
			"A valid workspace id is required.",
		)),
	}
}

async fn auth_middleware(
	State(state): State<AppState>,
	req: Request<Body>,
	next: Next,
) -> Response {
	let authorized = match state.auth_token.as_deref() {
		Some(expected) => read_bearer_token(req.headers()) == Some(expected),
		None => true,
	};

	if !authorized {
		tracing::debug!(path = %req.uri().path(), "Rejected request without a valid bearer token.");

		return json_error(
			StatusCode::UNAUTHORIZED,
			"not_authorized",
			"A valid bearer token is required.",
		)
		.into_response();
	}

	next.run(req).await
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let raw = headers.get(header::AUTHORIZATION)?;
	let value = raw.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::NotAuthorized { message } =>
				json_error(StatusCode::UNAUTHORIZED, "not_authorized", message),
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::UpstreamUnavailable { message } => {
				tracing::error!(error = %message, "List request failed upstream.");

				json_error(StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable", message)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}

#[cfg(test)]
mod tests {
	use axum::http::HeaderValue;

	use super::*;

	#[test]
	fn bearer_token_requires_scheme_and_value() {
		let mut headers = HeaderMap::new();

		assert_eq!(read_bearer_token(&headers), None);

		headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer  s3cret "));

		assert_eq!(read_bearer_token(&headers), Some("s3cret"));

		headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic s3cret"));

		assert_eq!(read_bearer_token(&headers), None);

		headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));

		assert_eq!(read_bearer_token(&headers), None);
	}

	#[test]
	fn nil_and_malformed_workspace_ids_are_not_authorized() {
		for raw in ["00000000-0000-0000-0000-000000000000", "workspace-1"] {
			let err = parse_workspace_id(raw).expect_err("Workspace id must be rejected.");

			assert_eq!(err.status, StatusCode::UNAUTHORIZED);
			assert_eq!(err.error_code, "not_authorized");
		}

		assert!(parse_workspace_id("6f1c2a3e-0000-4000-8000-000000000001").is_ok());
	}
}
