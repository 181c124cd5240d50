pub mod delete;
pub mod form;
pub mod list;
pub mod notification;
pub mod paths;
pub mod save;

mod error;

pub use delete::{DeleteConfirmation, DeleteResponse};
pub use error::{Error, Result};
pub use form::{FormItem, PromotionForm, QueryRef, RedirectResponse, SubmitRequest, SubmitResponse};
pub use list::{ListItem, ListRequest, ListResponse, PageInfo};
pub use notification::{NotificationEvent, NotificationKind, NotificationLink};
pub use promo_domain::promotion::{FieldError, PromotionInput, ValidationErrors};
pub use save::{SaveOutcome, SavedSet};

use promo_storage::db::Db;

pub struct PromoService {
	pub db: Db,
}
impl PromoService {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}

pub(crate) fn parse_query_id(raw: &str) -> Result<uuid::Uuid> {
	uuid::Uuid::parse_str(raw.trim())
		.map_err(|_| Error::NotFound { message: format!("search query {raw}") })
}
