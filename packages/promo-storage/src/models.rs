use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SearchQuery {
	pub query_id: Uuid,
	pub query_string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SearchPromotion {
	pub promotion_id: Uuid,
	pub query_id: Uuid,
	pub sort_order: i32,
	pub page_id: Option<i64>,
	pub external_link_url: Option<String>,
	pub external_link_text: Option<String>,
	pub description: String,
}

/// A query that owns at least one promotion, as shown in the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PromotedQuery {
	pub query_id: Uuid,
	pub query_string: String,
	pub promotion_count: i64,
}
