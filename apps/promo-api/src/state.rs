use std::sync::Arc;

use promo_service::PromoService;
use promo_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PromoService>,
	/// Bearer token required on admin routes, if configured.
	pub admin_auth_token: Option<Arc<str>>,
}
impl AppState {
	pub async fn new(config: &promo_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::with_service(PromoService::new(db), config.security.admin_auth_token.as_deref()))
	}

	pub fn with_service(service: PromoService, admin_auth_token: Option<&str>) -> Self {
		Self { service: Arc::new(service), admin_auth_token: admin_auth_token.map(Arc::from) }
	}
}
