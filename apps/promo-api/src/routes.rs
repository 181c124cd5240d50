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

use crate::state::AppState;
use promo_service::{
	DeleteConfirmation, Error, ListRequest, ListResponse, PromotionForm, SubmitRequest,
	SubmitResponse, paths,
};

pub const HEADER_REQUESTED_WITH: &str = "x-requested-with";
pub const SEARCH_PLACEHOLDER: &str = "Search promoted results";

const FRAGMENT_REQUEST_VALUE: &str = "XMLHttpRequest";

pub fn router(state: AppState) -> Router {
	let admin = Router::new()
		.route(paths::INDEX, get(list))
		.route(paths::ADD, get(add_form).post(create))
		.route("/admin/searchpicks/{query_id}/", get(edit_form).post(edit))
		.route("/admin/searchpicks/{query_id}/delete/", get(delete_confirmation).post(delete))
		.route_layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware));

	Router::new().route("/health", get(health)).merge(admin).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Serialize)]
struct SearchForm {
	q: String,
	placeholder: &'static str,
}

#[derive(Debug, Serialize)]
struct ListDocument {
	#[serde(flatten)]
	results: ListResponse,
	#[serde(skip_serializing_if = "Option::is_none")]
	search_form: Option<SearchForm>,
}

async fn list(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
	let fragment = is_fragment_request(&headers);
	let results = state.service.list(list_request(pairs)).await?;
	let search_form = if fragment {
		None
	} else {
		let q = results.query_string.clone().unwrap_or_default();

		Some(SearchForm { q, placeholder: SEARCH_PLACEHOLDER })
	};

	Ok((
		[(header::VARY, "X-Requested-With")],
		Json(ListDocument { results, search_form }),
	)
		.into_response())
}

/// Repeated parameters resolve to their last value.
fn list_request(pairs: Vec<(String, String)>) -> ListRequest {
	let mut req = ListRequest::default();

	for (key, value) in pairs {
		match key.as_str() {
			"q" => req.q = Some(value),
			"p" => req.p = Some(value),
			_ => {},
		}
	}

	req
}

async fn add_form(State(state): State<AppState>) -> Json<PromotionForm> {
	Json(state.service.add_form())
}

async fn create(
	State(state): State<AppState>,
	Json(payload): Json<SubmitRequest>,
) -> Result<Response, ApiError> {
	let response = state.service.create(payload).await?;

	Ok(submit_response(response))
}

async fn edit_form(
	State(state): State<AppState>,
	Path(query_id): Path<String>,
) -> Result<Json<PromotionForm>, ApiError> {
	let form = state.service.edit_form(&query_id).await?;

	Ok(Json(form))
}

async fn edit(
	State(state): State<AppState>,
	Path(query_id): Path<String>,
	Json(payload): Json<SubmitRequest>,
) -> Result<Response, ApiError> {
	let response = state.service.edit(&query_id, payload).await?;

	Ok(submit_response(response))
}

async fn delete_confirmation(
	State(state): State<AppState>,
	Path(query_id): Path<String>,
) -> Result<Json<DeleteConfirmation>, ApiError> {
	let confirmation = state.service.delete_confirmation(&query_id).await?;

	Ok(Json(confirmation))
}

async fn delete(
	State(state): State<AppState>,
	Path(query_id): Path<String>,
) -> Result<Response, ApiError> {
	let response = state.service.delete(&query_id).await?;
	let location = response.redirect_to.clone();

	Ok(see_other(location, &response))
}

fn submit_response(response: SubmitResponse) -> Response {
	match response {
		SubmitResponse::Redirect(redirect) => see_other(redirect.redirect_to.clone(), &redirect),
		SubmitResponse::Form(form) => (StatusCode::OK, Json(form)).into_response(),
	}
}

fn see_other<T>(location: String, body: &T) -> Response
where
	T: Serialize,
{
	(StatusCode::SEE_OTHER, [(header::LOCATION, location)], Json(body)).into_response()
}

fn is_fragment_request(headers: &HeaderMap) -> bool {
	headers
		.get(HEADER_REQUESTED_WITH)
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.trim() == FRAGMENT_REQUEST_VALUE)
}

async fn admin_auth_middleware(
	State(state): State<AppState>,
	req: Request<Body>,
	next: Next,
) -> Response {
	if !is_authorized(req.headers(), state.admin_auth_token.as_deref()) {
		return json_error(
			StatusCode::UNAUTHORIZED,
			"UNAUTHORIZED",
			"Admin routes require a Bearer token.",
			None,
		)
		.into_response();
	}

	next.run(req).await
}

fn is_authorized(headers: &HeaderMap, expected: Option<&str>) -> bool {
	match expected {
		None => true,
		Some(expected) => read_bearer_token(headers).is_some_and(|token| token == expected),
	}
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
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", format!("Not found: {message}."), None),
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			Error::Conflict { message } =>
				json_error(StatusCode::CONFLICT, "CONFLICT", message, None),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage error.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"INTERNAL_ERROR",
					"Internal error.",
					None,
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
