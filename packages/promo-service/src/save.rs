use sqlx::PgConnection;
use uuid::Uuid;

use crate::{PromoService, Result};
use promo_domain::{
	promotion::{self, ExistingPromotion, PromotionFields, PromotionInput, SavePlan, ValidationErrors},
	query,
};
use promo_storage::{
	models::{SearchPromotion, SearchQuery},
	promotions, queries,
};

/// The promotions of the target query after a successful save, in display order.
#[derive(Debug, Clone)]
pub struct SavedSet {
	pub query: SearchQuery,
	pub promotions: Vec<SearchPromotion>,
}

#[derive(Debug, Clone)]
pub enum SaveOutcome {
	Saved(SavedSet),
	/// Nothing was written, not even a newly resolved query.
	Rejected(ValidationErrors),
}

impl PromoService {
	/// Validates and persists an ordered promotion collection in one transaction.
	///
	/// `current` is the query being edited, or `None` when creating. When the target query
	/// string resolves to a different query, every promotion of `current` moves to the target.
	pub async fn save_promotions(
		&self,
		current: Option<&SearchQuery>,
		target_query_string: &str,
		items: &[PromotionInput],
	) -> Result<SaveOutcome> {
		let mut tx = self.db.pool.begin().await?;
		let normalized = query::normalize_query_string(target_query_string);
		let target = queries::get_or_create_query(&mut tx, &normalized).await?;
		let locked = match current {
			Some(current) => promotions::lock_for_query(&mut tx, current.query_id).await?,
			None => Vec::new(),
		};
		let existing: Vec<ExistingPromotion> = locked
			.iter()
			.map(|row| ExistingPromotion { id: row.promotion_id, sort_order: row.sort_order })
			.collect();
		let plan = match promotion::plan_save(items, &existing) {
			Ok(plan) => plan,
			Err(errors) => {
				tx.rollback().await?;

				tracing::debug!(
					query = %normalized,
					collection_errors = errors.collection.len(),
					item_errors = errors.items.len(),
					"Promotion submission rejected."
				);

				return Ok(SaveOutcome::Rejected(errors));
			},
		};
		let owner = current.map(|query| query.query_id).unwrap_or(target.query_id);
		let target_preexisting = if owner == target.query_id {
			0
		} else {
			promotions::list_for_query(&mut *tx, target.query_id).await?.len()
		};
		let surviving = plan.surviving_count();

		apply_plan(&mut tx, owner, plan).await?;

		if current.is_none() {
			let total = promotions::list_for_query(&mut *tx, target.query_id).await?.len();

			if total > surviving {
				tracing::warn!(
					query_id = %target.query_id,
					added = surviving,
					total,
					"Created promotions share sort_order values with promotions already on the query."
				);
			}
		}
		if owner != target.query_id {
			let moved = promotions::reparent_promotions(&mut tx, owner, target.query_id).await?;

			tracing::info!(
				from_query_id = %owner,
				to_query_id = %target.query_id,
				moved,
				"Moved promotions to a new search query."
			);

			if target_preexisting > 0 {
				tracing::warn!(
					query_id = %target.query_id,
					moved,
					preexisting = target_preexisting,
					"Moved promotions share sort_order values with promotions already on the target query."
				);
			}
		}

		let saved = promotions::list_for_query(&mut *tx, target.query_id).await?;

		tx.commit().await?;

		tracing::info!(
			query_id = %target.query_id,
			promotions = saved.len(),
			"Saved search promotions."
		);

		Ok(SaveOutcome::Saved(SavedSet { query: target, promotions: saved }))
	}
}

async fn apply_plan(conn: &mut PgConnection, owner: Uuid, plan: SavePlan) -> Result<()> {
	let SavePlan { deletions, updates, insertions, reorders } = plan;

	promotions::delete_promotions(conn, owner, &deletions).await?;

	for update in updates {
		promotions::update_promotion(conn, &to_row(update.id, owner, update.sort_order, update.fields))
			.await?;
	}
	for reorder in reorders {
		promotions::set_sort_order(conn, owner, reorder.id, reorder.sort_order).await?;
	}
	for insert in insertions {
		promotions::insert_promotion(
			conn,
			&to_row(Uuid::new_v4(), owner, insert.sort_order, insert.fields),
		)
		.await?;
	}

	Ok(())
}

fn to_row(
	promotion_id: Uuid,
	query_id: Uuid,
	sort_order: i32,
	fields: PromotionFields,
) -> SearchPromotion {
	SearchPromotion {
		promotion_id,
		query_id,
		sort_order,
		page_id: fields.page_id,
		external_link_url: fields.external_link_url,
		external_link_text: fields.external_link_text,
		description: fields.description,
	}
}
