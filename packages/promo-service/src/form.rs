use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
	NotificationEvent, PromoService, Result, SaveOutcome, paths,
	save::SavedSet,
};
use promo_domain::{
	promotion::{FieldError, PromotionInput, ValidationErrors},
	query::{self, QueryStringError},
};
use promo_storage::{
	models::{SearchPromotion, SearchQuery},
	promotions, queries,
};

pub const CREATE_FAILED_MESSAGE: &str = "Recommendations have not been created due to errors";
pub const EDIT_FAILED_MESSAGE: &str = "Recommendations have not been saved due to errors";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
	#[serde(default)]
	pub query_string: String,
	#[serde(default)]
	pub items: Vec<PromotionInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRef {
	pub query_id: Uuid,
	pub query_string: String,
}
impl From<SearchQuery> for QueryRef {
	fn from(query: SearchQuery) -> Self {
		Self { query_id: query.query_id, query_string: query.query_string }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormItem {
	#[serde(flatten)]
	pub input: PromotionInput,
	#[serde(default)]
	pub errors: Vec<FieldError>,
}

/// Everything the add and edit screens show: the query field, the ordered rows, and any errors
/// from the last submission with the submitted values preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionForm {
	/// The query being edited; absent on the add screen.
	pub query: Option<QueryRef>,
	pub query_string: String,
	pub query_errors: Vec<String>,
	pub items: Vec<FormItem>,
	pub collection_errors: Vec<String>,
	pub notification: Option<NotificationEvent>,
}
impl PromotionForm {
	fn from_submission(query: Option<QueryRef>, req: SubmitRequest) -> Self {
		Self {
			query,
			query_string: req.query_string,
			items: req
				.items
				.into_iter()
				.map(|input| FormItem { input, errors: Vec::new() })
				.collect(),
			..Self::default()
		}
	}

	fn with_query_error(mut self, err: QueryStringError) -> Self {
		self.query_errors.push(err.message());

		self
	}

	fn with_validation_errors(mut self, errors: ValidationErrors, fallback: &str) -> Self {
		let text = errors.collection_message().unwrap_or_else(|| fallback.to_string());

		for (index, item) in self.items.iter_mut().enumerate() {
			item.errors = errors.for_item(index).to_vec();
		}

		self.collection_errors = errors.collection;
		self.notification = Some(NotificationEvent::error(text));

		self
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectResponse {
	pub redirect_to: String,
	pub notification: NotificationEvent,
}

#[derive(Debug, Clone)]
pub enum SubmitResponse {
	Redirect(RedirectResponse),
	/// Re-render the form; nothing was persisted.
	Form(PromotionForm),
}

impl PromoService {
	pub fn add_form(&self) -> PromotionForm {
		PromotionForm::default()
	}

	pub async fn create(&self, req: SubmitRequest) -> Result<SubmitResponse> {
		let target = match query::clean_query_string(&req.query_string) {
			Ok(target) => target,
			Err(err) => {
				return Ok(SubmitResponse::Form(
					PromotionForm::from_submission(None, req).with_query_error(err),
				));
			},
		};

		match self.save_promotions(None, &target, &req.items).await? {
			SaveOutcome::Saved(saved) => Ok(SubmitResponse::Redirect(saved_redirect(saved, "created"))),
			SaveOutcome::Rejected(errors) => Ok(SubmitResponse::Form(
				PromotionForm::from_submission(None, req)
					.with_validation_errors(errors, CREATE_FAILED_MESSAGE),
			)),
		}
	}

	pub async fn edit_form(&self, query_id: &str) -> Result<PromotionForm> {
		let query_id = crate::parse_query_id(query_id)?;
		let query = queries::get_query(&self.db.pool, query_id).await?;
		let rows = promotions::list_for_query(&self.db.pool, query.query_id).await?;

		Ok(PromotionForm {
			query_string: query.query_string.clone(),
			query: Some(query.into()),
			items: rows.into_iter().map(|row| FormItem { input: row_input(row), errors: Vec::new() }).collect(),
			..PromotionForm::default()
		})
	}

	pub async fn edit(&self, query_id: &str, req: SubmitRequest) -> Result<SubmitResponse> {
		let query_id = crate::parse_query_id(query_id)?;
		let current = queries::get_query(&self.db.pool, query_id).await?;
		let target = match query::clean_query_string(&req.query_string) {
			Ok(target) => target,
			Err(err) => {
				return Ok(SubmitResponse::Form(
					PromotionForm::from_submission(Some(current.into()), req).with_query_error(err),
				));
			},
		};

		match self.save_promotions(Some(&current), &target, &req.items).await? {
			SaveOutcome::Saved(saved) => Ok(SubmitResponse::Redirect(saved_redirect(saved, "updated"))),
			SaveOutcome::Rejected(errors) => Ok(SubmitResponse::Form(
				PromotionForm::from_submission(Some(current.into()), req)
					.with_validation_errors(errors, EDIT_FAILED_MESSAGE),
			)),
		}
	}
}

fn saved_redirect(saved: SavedSet, verb: &str) -> RedirectResponse {
	let edit_path = paths::edit(saved.query.query_id);
	let notification = NotificationEvent::success(format!(
		"Editor's picks for '{}' {verb}.",
		saved.query.query_string
	))
	.with_link(edit_path.clone(), "Edit");

	RedirectResponse { redirect_to: edit_path, notification }
}

fn row_input(row: SearchPromotion) -> PromotionInput {
	PromotionInput {
		id: Some(row.promotion_id),
		page_id: row.page_id,
		external_link_url: row.external_link_url,
		external_link_text: row.external_link_text,
		description: row.description,
		order: None,
		delete: false,
	}
}
