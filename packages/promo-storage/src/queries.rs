use sqlx::{Executor, PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
	Error, Result,
	models::{PromotedQuery, SearchQuery},
};

/// Returns the query stored under `query_string`, creating it when missing.
///
/// `query_string` must already be normalized. Runs on the caller's connection so a rolled back
/// transaction also discards a freshly created query.
pub async fn get_or_create_query(conn: &mut PgConnection, query_string: &str) -> Result<SearchQuery> {
	let query = sqlx::query_as::<_, SearchQuery>(
		"\
INSERT INTO search_queries (query_id, query_string)
VALUES ($1, $2)
ON CONFLICT (query_string) DO UPDATE SET query_string = EXCLUDED.query_string
RETURNING query_id, query_string",
	)
	.bind(Uuid::new_v4())
	.bind(query_string)
	.fetch_one(conn)
	.await?;

	Ok(query)
}

pub async fn get_query<'e, E>(executor: E, query_id: Uuid) -> Result<SearchQuery>
where
	E: Executor<'e, Database = Postgres>,
{
	sqlx::query_as::<_, SearchQuery>(
		"SELECT query_id, query_string FROM search_queries WHERE query_id = $1",
	)
	.bind(query_id)
	.fetch_optional(executor)
	.await?
	.ok_or_else(|| Error::NotFound(format!("search query {query_id}")))
}

pub async fn count_promoted_queries<'e, E>(executor: E, filter: Option<&str>) -> Result<i64>
where
	E: Executor<'e, Database = Postgres>,
{
	let mut builder = QueryBuilder::<Postgres>::new(
		"\
SELECT count(*)
FROM search_queries q
WHERE EXISTS (SELECT 1 FROM search_promotions p WHERE p.query_id = q.query_id)",
	);

	push_filter(&mut builder, filter);

	let count = builder.build_query_scalar::<i64>().fetch_one(executor).await?;

	Ok(count)
}

/// One page of queries owning at least one promotion, ordered by query string then id.
pub async fn list_promoted_queries<'e, E>(
	executor: E,
	filter: Option<&str>,
	offset: i64,
	limit: i64,
) -> Result<Vec<PromotedQuery>>
where
	E: Executor<'e, Database = Postgres>,
{
	if offset < 0 || limit <= 0 {
		return Err(Error::InvalidArgument(format!(
			"offset must be non-negative and limit positive (offset={offset}, limit={limit})"
		)));
	}

	let mut builder = QueryBuilder::<Postgres>::new(
		"\
SELECT q.query_id, q.query_string, count(p.promotion_id) AS promotion_count
FROM search_queries q
JOIN search_promotions p ON p.query_id = q.query_id
WHERE TRUE",
	);

	push_filter(&mut builder, filter);
	builder.push(" GROUP BY q.query_id, q.query_string ORDER BY q.query_string, q.query_id LIMIT ");
	builder.push_bind(limit);
	builder.push(" OFFSET ");
	builder.push_bind(offset);

	let rows = builder.build_query_as::<PromotedQuery>().fetch_all(executor).await?;

	Ok(rows)
}

/// Escapes `LIKE` metacharacters so `filter` is matched literally.
pub fn like_pattern(filter: &str) -> String {
	let mut out = String::with_capacity(filter.len() + 2);

	out.push('%');

	for c in filter.chars() {
		if matches!(c, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(c);
	}

	out.push('%');

	out
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: Option<&str>) {
	if let Some(filter) = filter.filter(|value| !value.is_empty()) {
		builder.push(" AND q.query_string ILIKE ");
		builder.push_bind(like_pattern(filter));
		builder.push(" ESCAPE '\\'");
	}
}
