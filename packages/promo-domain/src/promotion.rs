//! Validation and ordering of a submitted promotion collection.
//!
//! A submission is the full ordered list of promotions an editor wants attached to one query.
//! [`plan_save`] checks it against the promotions the query owns right now and produces a
//! [`SavePlan`] whose surviving rows carry a dense, zero-based `sort_order`.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MINIMUM_PROMOTIONS_MESSAGE: &str =
	"Please specify at least one recommendation for this search term.";
pub const DUPLICATE_PROMOTION_MESSAGE: &str = "Each recommendation may only be submitted once.";
pub const FOREIGN_PROMOTION_MESSAGE: &str =
	"This recommendation does not belong to this search term.";
pub const MISSING_TARGET_MESSAGE: &str = "You must recommend a page OR an external link.";
pub const CONFLICTING_TARGET_MESSAGE: &str =
	"Please only select a page OR enter an external link.";
pub const INVALID_PAGE_MESSAGE: &str = "Select a valid page.";
pub const INVALID_URL_MESSAGE: &str = "Enter a valid URL.";
pub const MISSING_LINK_TEXT_MESSAGE: &str =
	"You must enter an external link text if you enter an external link URL.";

const URL_PATTERN: &str = r"(?i)^https?://[^\s/?#.][^\s/?#]*(:\d{1,5})?([/?#]\S*)?$";

/// One row of a submitted collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionInput {
	/// Existing promotion being edited. `None` for a new row.
	pub id: Option<Uuid>,
	pub page_id: Option<i64>,
	pub external_link_url: Option<String>,
	pub external_link_text: Option<String>,
	pub description: String,
	/// Explicit editorial position. Rows without one keep their submission position.
	pub order: Option<i32>,
	pub delete: bool,
}
impl PromotionInput {
	fn is_blank(&self) -> bool {
		self.id.is_none()
			&& !self.delete
			&& self.page_id.is_none()
			&& self.order.is_none()
			&& is_blank(self.external_link_url.as_deref())
			&& is_blank(self.external_link_text.as_deref())
			&& self.description.trim().is_empty()
	}
}

/// Cleaned payload of a promotion, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionFields {
	pub page_id: Option<i64>,
	pub external_link_url: Option<String>,
	pub external_link_text: Option<String>,
	pub description: String,
}

/// A promotion as currently stored for the query being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingPromotion {
	pub id: Uuid,
	pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
	pub field: String,
	pub message: String,
}
impl FieldError {
	fn new(field: &str, message: &str) -> Self {
		Self { field: field.to_string(), message: message.to_string() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemErrors {
	/// Position of the row in the submission.
	pub index: usize,
	pub errors: Vec<FieldError>,
}

/// Everything wrong with a submission. Collection-level messages are kept apart from the
/// per-row field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
	pub collection: Vec<String>,
	pub items: Vec<ItemErrors>,
}
impl ValidationErrors {
	pub fn is_empty(&self) -> bool {
		self.collection.is_empty() && self.items.is_empty()
	}

	/// Collection-level messages joined for a single notification, if there are any.
	pub fn collection_message(&self) -> Option<String> {
		if self.collection.is_empty() { None } else { Some(self.collection.join(" ")) }
	}

	pub fn for_item(&self, index: usize) -> &[FieldError] {
		self.items
			.iter()
			.find(|item| item.index == index)
			.map(|item| item.errors.as_slice())
			.unwrap_or(&[])
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpdate {
	pub id: Uuid,
	pub fields: PromotionFields,
	pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInsert {
	pub fields: PromotionFields,
	pub sort_order: i32,
}

/// An existing promotion left out of the submission; only its position changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedReorder {
	pub id: Uuid,
	pub sort_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavePlan {
	pub deletions: Vec<Uuid>,
	pub updates: Vec<PlannedUpdate>,
	pub insertions: Vec<PlannedInsert>,
	pub reorders: Vec<PlannedReorder>,
}
impl SavePlan {
	pub fn surviving_count(&self) -> usize {
		self.updates.len() + self.insertions.len() + self.reorders.len()
	}
}

struct Survivor {
	id: Option<Uuid>,
	order: Option<i32>,
	fields: PromotionFields,
}

/// Validates `items` against the promotions the query owns (`existing`) and derives the
/// ordering. Nothing is persisted here.
pub fn plan_save(
	items: &[PromotionInput],
	existing: &[ExistingPromotion],
) -> Result<SavePlan, ValidationErrors> {
	let owned: HashSet<Uuid> = existing.iter().map(|promotion| promotion.id).collect();
	let mut errors = ValidationErrors::default();
	let mut seen = HashSet::new();
	let mut duplicate = false;
	let mut live = 0_usize;
	let mut deletions = Vec::new();
	let mut survivors = Vec::new();

	for (index, item) in items.iter().enumerate() {
		if let Some(id) = item.id {
			if !seen.insert(id) {
				duplicate = true;

				continue;
			}
			if !owned.contains(&id) {
				errors.items.push(ItemErrors {
					index,
					errors: vec![FieldError::new("id", FOREIGN_PROMOTION_MESSAGE)],
				});

				continue;
			}
		}
		if item.delete {
			if let Some(id) = item.id {
				deletions.push(id);
			}

			continue;
		}
		if item.is_blank() {
			continue;
		}

		live += 1;

		match clean_fields(item) {
			Ok(fields) => survivors.push(Survivor { id: item.id, order: item.order, fields }),
			Err(field_errors) => errors.items.push(ItemErrors { index, errors: field_errors }),
		}
	}

	if live == 0 {
		errors.collection.push(MINIMUM_PROMOTIONS_MESSAGE.to_string());
	}
	if duplicate {
		errors.collection.push(DUPLICATE_PROMOTION_MESSAGE.to_string());
	}
	if !errors.is_empty() {
		return Err(errors);
	}

	// Stable: rows sharing an order value, and rows without one, keep submission order.
	survivors.sort_by_key(|survivor| (survivor.order.is_none(), survivor.order.unwrap_or(0)));

	let mut plan = SavePlan { deletions, ..SavePlan::default() };
	let mut next_position = 0_i32;

	for survivor in survivors {
		let sort_order = next_position;

		next_position += 1;

		match survivor.id {
			Some(id) => plan.updates.push(PlannedUpdate { id, fields: survivor.fields, sort_order }),
			None => plan.insertions.push(PlannedInsert { fields: survivor.fields, sort_order }),
		}
	}

	let mut untouched: Vec<(usize, &ExistingPromotion)> =
		existing.iter().enumerate().filter(|(_, promotion)| !seen.contains(&promotion.id)).collect();

	untouched.sort_by_key(|(position, promotion)| (promotion.sort_order, *position));

	for (_, promotion) in untouched {
		plan.reorders.push(PlannedReorder { id: promotion.id, sort_order: next_position });

		next_position += 1;
	}

	Ok(plan)
}

fn clean_fields(item: &PromotionInput) -> Result<PromotionFields, Vec<FieldError>> {
	let url = non_blank(item.external_link_url.as_deref());
	let text = non_blank(item.external_link_text.as_deref());
	let mut errors = Vec::new();

	match (item.page_id, url.as_deref()) {
		(None, None) => errors.push(FieldError::new("page", MISSING_TARGET_MESSAGE)),
		(Some(_), Some(_)) => errors.push(FieldError::new("page", CONFLICTING_TARGET_MESSAGE)),
		_ => {},
	}

	if let Some(page_id) = item.page_id
		&& page_id <= 0
	{
		errors.push(FieldError::new("page", INVALID_PAGE_MESSAGE));
	}
	if let Some(url) = url.as_deref() {
		if !is_valid_url(url) {
			errors.push(FieldError::new("external_link_url", INVALID_URL_MESSAGE));
		}
		if text.is_none() {
			errors.push(FieldError::new("external_link_text", MISSING_LINK_TEXT_MESSAGE));
		}
	}
	if !errors.is_empty() {
		return Err(errors);
	}

	let external_link_text = if url.is_some() { text } else { None };

	Ok(PromotionFields {
		page_id: item.page_id,
		external_link_url: url,
		external_link_text,
		description: item.description.trim().to_string(),
	})
}

fn is_valid_url(url: &str) -> bool {
	Regex::new(URL_PATTERN).map(|re| re.is_match(url)).unwrap_or(false)
}

fn non_blank(value: Option<&str>) -> Option<String> {
	value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}

fn is_blank(value: Option<&str>) -> bool {
	value.map(|value| value.trim().is_empty()).unwrap_or(true)
}
