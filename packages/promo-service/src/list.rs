use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PromoService, Result};
use promo_domain::pagination::{self, PageWindow};
use promo_storage::{models::PromotedQuery, queries};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequest {
	/// Filter text matched against query strings.
	pub q: Option<String>,
	/// Requested page, as sent by the client.
	pub p: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
	pub query_id: Uuid,
	pub query_string: String,
	pub promotion_count: i64,
}
impl From<PromotedQuery> for ListItem {
	fn from(row: PromotedQuery) -> Self {
		Self {
			query_id: row.query_id,
			query_string: row.query_string,
			promotion_count: row.promotion_count,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
	pub number: u32,
	pub num_pages: u32,
	pub count: u64,
	pub has_previous: bool,
	pub has_next: bool,
}
impl From<PageWindow> for PageInfo {
	fn from(window: PageWindow) -> Self {
		Self {
			number: window.number,
			num_pages: window.num_pages,
			count: window.count,
			has_previous: window.has_previous(),
			has_next: window.has_next(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
	pub items: Vec<ListItem>,
	pub is_searching: bool,
	/// The filter text echoed back, if one was applied.
	pub query_string: Option<String>,
	pub page: PageInfo,
}

impl PromoService {
	/// Lists queries that have promotions, optionally filtered, one page at a time.
	pub async fn list(&self, req: ListRequest) -> Result<ListResponse> {
		let filter = filter_text(req.q);
		let count = queries::count_promoted_queries(&self.db.pool, filter.as_deref()).await?;
		let window = pagination::resolve_page(req.p.as_deref(), u64::try_from(count).unwrap_or(0));
		let rows = queries::list_promoted_queries(
			&self.db.pool,
			filter.as_deref(),
			window.offset(),
			window.limit(),
		)
		.await?;

		tracing::debug!(
			filter = filter.as_deref().unwrap_or(""),
			page = window.number,
			count,
			"Listed promoted search queries."
		);

		Ok(ListResponse {
			items: rows.into_iter().map(ListItem::from).collect(),
			is_searching: filter.is_some(),
			query_string: filter,
			page: window.into(),
		})
	}
}

/// Postgres text cannot hold NUL, so those characters are dropped before matching.
fn filter_text(raw: Option<String>) -> Option<String> {
	raw.map(|q| q.replace('\0', "")).filter(|q| !q.is_empty())
}
