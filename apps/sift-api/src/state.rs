use std::sync::Arc;

use sift_service::SiftService;
use sift_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SiftService>,
	pub auth_token: Option<Arc<str>>,
}
impl AppState {
	pub async fn new(config: sift_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(SiftService::new(config, db)))
	}

	pub fn from_service(service: SiftService) -> Self {
		let auth_token = service.cfg.security.api_auth_token.as_deref().map(Arc::from);

		Self { service: Arc::new(service), auth_token }
	}
}
