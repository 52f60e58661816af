mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Engine, ObjectStore, Pagination, Postgres, Queues, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.region.trim().is_empty() {
		return Err(Error::Validation { message: "region must be non-empty.".to_string() });
	}
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.engine.project_ref.trim().is_empty() {
		return Err(Error::Validation {
			message: "engine.project_ref must be non-empty.".to_string(),
		});
	}
	if cfg.engine.profile_ref.trim().is_empty() {
		return Err(Error::Validation {
			message: "engine.profile_ref must be non-empty.".to_string(),
		});
	}
	if !matches!(cfg.engine.stage.as_str(), "DEVELOPMENT" | "LIVE") {
		return Err(Error::Validation {
			message: "engine.stage must be one of DEVELOPMENT or LIVE.".to_string(),
		});
	}
	if cfg.engine.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "engine.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.object_store.input_bucket.trim().is_empty() {
		return Err(Error::Validation {
			message: "object_store.input_bucket must be non-empty.".to_string(),
		});
	}
	if cfg.object_store.output_bucket.trim().is_empty() {
		return Err(Error::Validation {
			message: "object_store.output_bucket must be non-empty.".to_string(),
		});
	}
	if cfg.object_store.output_prefix.trim().is_empty()
		|| cfg.object_store.output_prefix.starts_with('/')
		|| cfg.object_store.output_prefix.ends_with('/')
	{
		return Err(Error::Validation {
			message: "object_store.output_prefix must be non-empty without leading or trailing slashes.".to_string(),
		});
	}
	if cfg.object_store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "object_store.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.queues.notifications_url.trim().is_empty() {
		return Err(Error::Validation {
			message: "queues.notifications_url must be non-empty.".to_string(),
		});
	}
	if cfg.queues.completions_url.trim().is_empty() {
		return Err(Error::Validation {
			message: "queues.completions_url must be non-empty.".to_string(),
		});
	}
	if cfg.queues.max_messages == 0 {
		return Err(Error::Validation {
			message: "queues.max_messages must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if !is_valid_table_name(&cfg.storage.table) {
		return Err(Error::Validation {
			message: "storage.table must match [a-z_][a-z0-9_]*.".to_string(),
		});
	}
	if cfg.pagination.default_page_size == 0 {
		return Err(Error::Validation {
			message: "pagination.default_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.pagination.max_page_size < cfg.pagination.default_page_size {
		return Err(Error::Validation {
			message: "pagination.max_page_size must be at least pagination.default_page_size."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.engine.endpoint.trim().is_empty() {
		cfg.engine.endpoint =
			format!("https://bedrock-data-automation-runtime.{}.amazonaws.com", cfg.region);
	}
	if cfg.object_store.endpoint.trim().is_empty() {
		cfg.object_store.endpoint = format!("https://s3.{}.amazonaws.com", cfg.region);
	}
	while cfg.engine.endpoint.ends_with('/') {
		cfg.engine.endpoint.pop();
	}
	while cfg.object_store.endpoint.ends_with('/') {
		cfg.object_store.endpoint.pop();
	}
}

// The table name is spliced into SQL text, so it is held to a strict shape
// instead of being bound as a parameter.
fn is_valid_table_name(table: &str) -> bool {
	let mut chars = table.chars();
	let Some(first) = chars.next() else {
		return false;
	};

	(first.is_ascii_lowercase() || first == '_')
		&& chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
