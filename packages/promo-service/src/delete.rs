use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{NotificationEvent, PromoService, QueryRef, Result, paths};
use promo_storage::{promotions, queries};

pub const DELETED_MESSAGE: &str = "Editor's picks deleted.";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteConfirmation {
	pub query: QueryRef,
	pub promotion_count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub query_id: Uuid,
	pub deleted: u64,
	pub redirect_to: String,
	pub notification: NotificationEvent,
}

impl PromoService {
	pub async fn delete_confirmation(&self, query_id: &str) -> Result<DeleteConfirmation> {
		let query_id = crate::parse_query_id(query_id)?;
		let query = queries::get_query(&self.db.pool, query_id).await?;
		let promotion_count = promotions::list_for_query(&self.db.pool, query_id).await?.len();

		Ok(DeleteConfirmation { query: query.into(), promotion_count })
	}

	/// Removes every promotion of the query. The query itself is kept.
	pub async fn delete(&self, query_id: &str) -> Result<DeleteResponse> {
		let query_id = crate::parse_query_id(query_id)?;
		let mut tx = self.db.pool.begin().await?;
		let query = queries::get_query(&mut *tx, query_id).await?;
		let deleted = promotions::delete_all_for_query(&mut tx, query.query_id).await?;

		tx.commit().await?;

		tracing::info!(query_id = %query.query_id, deleted, "Deleted search promotions.");

		Ok(DeleteResponse {
			query_id: query.query_id,
			deleted,
			redirect_to: paths::INDEX.to_string(),
			notification: NotificationEvent::success(DELETED_MESSAGE),
		})
	}
}
