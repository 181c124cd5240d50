use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{Error, Result, models::SearchPromotion};

const PROMOTION_COLUMNS: &str = "promotion_id, query_id, sort_order, page_id, external_link_url, \
	external_link_text, description";

pub async fn list_for_query<'e, E>(executor: E, query_id: Uuid) -> Result<Vec<SearchPromotion>>
where
	E: Executor<'e, Database = Postgres>,
{
	let sql = format!(
		"SELECT {PROMOTION_COLUMNS} FROM search_promotions WHERE query_id = $1 \
		 ORDER BY sort_order, promotion_id"
	);
	let rows = sqlx::query_as::<_, SearchPromotion>(&sql).bind(query_id).fetch_all(executor).await?;

	Ok(rows)
}

/// Loads the promotions of `query_id` and row-locks them until the transaction ends.
pub async fn lock_for_query(
	conn: &mut PgConnection,
	query_id: Uuid,
) -> Result<Vec<SearchPromotion>> {
	let sql = format!(
		"SELECT {PROMOTION_COLUMNS} FROM search_promotions WHERE query_id = $1 \
		 ORDER BY sort_order, promotion_id FOR UPDATE"
	);
	let rows = sqlx::query_as::<_, SearchPromotion>(&sql).bind(query_id).fetch_all(conn).await?;

	Ok(rows)
}

pub async fn insert_promotion(conn: &mut PgConnection, promotion: &SearchPromotion) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO search_promotions (
	promotion_id,
	query_id,
	sort_order,
	page_id,
	external_link_url,
	external_link_text,
	description
)
VALUES ($1,$2,$3,$4,$5,$6,$7)",
	)
	.bind(promotion.promotion_id)
	.bind(promotion.query_id)
	.bind(promotion.sort_order)
	.bind(promotion.page_id)
	.bind(promotion.external_link_url.as_deref())
	.bind(promotion.external_link_text.as_deref())
	.bind(promotion.description.as_str())
	.execute(conn)
	.await?;

	Ok(())
}

/// Rewrites payload and position of an existing promotion still owned by `promotion.query_id`.
pub async fn update_promotion(conn: &mut PgConnection, promotion: &SearchPromotion) -> Result<()> {
	let result = sqlx::query(
		"\
UPDATE search_promotions
SET
	sort_order = $1,
	page_id = $2,
	external_link_url = $3,
	external_link_text = $4,
	description = $5
WHERE promotion_id = $6 AND query_id = $7",
	)
	.bind(promotion.sort_order)
	.bind(promotion.page_id)
	.bind(promotion.external_link_url.as_deref())
	.bind(promotion.external_link_text.as_deref())
	.bind(promotion.description.as_str())
	.bind(promotion.promotion_id)
	.bind(promotion.query_id)
	.execute(conn)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::Conflict(format!(
			"promotion {} is no longer attached to query {}",
			promotion.promotion_id, promotion.query_id
		)));
	}

	Ok(())
}

pub async fn set_sort_order(
	conn: &mut PgConnection,
	query_id: Uuid,
	promotion_id: Uuid,
	sort_order: i32,
) -> Result<()> {
	let result = sqlx::query(
		"UPDATE search_promotions SET sort_order = $1 WHERE promotion_id = $2 AND query_id = $3",
	)
	.bind(sort_order)
	.bind(promotion_id)
	.bind(query_id)
	.execute(conn)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::Conflict(format!(
			"promotion {promotion_id} is no longer attached to query {query_id}"
		)));
	}

	Ok(())
}

pub async fn delete_promotions(
	conn: &mut PgConnection,
	query_id: Uuid,
	promotion_ids: &[Uuid],
) -> Result<u64> {
	if promotion_ids.is_empty() {
		return Ok(0);
	}

	let result = sqlx::query(
		"DELETE FROM search_promotions WHERE query_id = $1 AND promotion_id = ANY($2)",
	)
	.bind(query_id)
	.bind(promotion_ids)
	.execute(conn)
	.await?;

	Ok(result.rows_affected())
}

/// Moves every promotion owned by `from_query_id` onto `to_query_id`. Positions are kept as is.
pub async fn reparent_promotions(
	conn: &mut PgConnection,
	from_query_id: Uuid,
	to_query_id: Uuid,
) -> Result<u64> {
	let result = sqlx::query("UPDATE search_promotions SET query_id = $1 WHERE query_id = $2")
		.bind(to_query_id)
		.bind(from_query_id)
		.execute(conn)
		.await?;

	Ok(result.rows_affected())
}

pub async fn delete_all_for_query(conn: &mut PgConnection, query_id: Uuid) -> Result<u64> {
	let result = sqlx::query("DELETE FROM search_promotions WHERE query_id = $1")
		.bind(query_id)
		.execute(conn)
		.await?;

	Ok(result.rows_affected())
}
