//! Admin URLs used for redirects and notification links.

use uuid::Uuid;

pub const INDEX: &str = "/admin/searchpicks/";
pub const ADD: &str = "/admin/searchpicks/add/";

pub fn edit(query_id: Uuid) -> String {
	format!("{INDEX}{query_id}/")
}
