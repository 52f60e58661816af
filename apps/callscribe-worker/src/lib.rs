pub mod worker;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use callscribe_service::CallscribeService;
use callscribe_storage::{PgRecordStore, db::Db};

#[derive(Debug, Parser)]
#[command(
	version = callscribe_cli::VERSION,
	rename_all = "kebab",
	styles = callscribe_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = callscribe_config::load(&args.config)?;
	let filter = EnvFilter::try_new(&config.service.log_level)
		.unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema(&config.storage.table).await?;

	let store = Arc::new(PgRecordStore::new(db, config.storage.table.clone()));
	let service = CallscribeService::new(config, store);
	let state = worker::WorkerState::new(service);

	worker::run_worker(state).await
}
