use std::sync::Arc;

use callscribe_service::CallscribeService;
use callscribe_storage::{PgRecordStore, db::Db};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CallscribeService>,
}
impl AppState {
	pub async fn new(config: callscribe_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema(&config.storage.table).await?;

		let store = Arc::new(PgRecordStore::new(db, config.storage.table.clone()));
		let service = CallscribeService::new(config, store);

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: CallscribeService) -> Self {
		Self { service: Arc::new(service) }
	}
}
