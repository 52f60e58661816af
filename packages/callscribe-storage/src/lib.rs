pub mod db;
pub mod models;
pub mod queries;
pub mod schema;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

use std::{future::Future, pin::Pin};

use crate::{
	db::Db,
	models::{CallRecord, RecordKey, RecordPage},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Port over the wide-column record store. The pipeline stages only ever
/// see this trait, so the backing store is substitutable in tests.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn put<'a>(&'a self, record: &'a CallRecord) -> BoxFuture<'a, Result<()>>;

	fn query_by_hash<'a>(
		&'a self,
		hash: &'a str,
		limit: u32,
		start: Option<&'a RecordKey>,
	) -> BoxFuture<'a, Result<RecordPage>>;

	fn scan<'a>(
		&'a self,
		limit: u32,
		start: Option<&'a RecordKey>,
	) -> BoxFuture<'a, Result<RecordPage>>;
}

/// PostgreSQL-backed store keyed on `(hash, epoch_timestamp)`.
pub struct PgRecordStore {
	db: Db,
	table: String,
}
impl PgRecordStore {
	pub fn new(db: Db, table: impl Into<String>) -> Self {
		Self { db, table: table.into() }
	}
}
impl RecordStore for PgRecordStore {
	fn put<'a>(&'a self, record: &'a CallRecord) -> BoxFuture<'a, Result<()>> {
		Box::pin(queries::put_record(&self.db, &self.table, record))
	}

	fn query_by_hash<'a>(
		&'a self,
		hash: &'a str,
		limit: u32,
		start: Option<&'a RecordKey>,
	) -> BoxFuture<'a, Result<RecordPage>> {
		Box::pin(queries::query_by_hash(&self.db, &self.table, hash, limit, start))
	}

	fn scan<'a>(
		&'a self,
		limit: u32,
		start: Option<&'a RecordKey>,
	) -> BoxFuture<'a, Result<RecordPage>> {
		Box::pin(queries::scan_records(&self.db, &self.table, limit, start))
	}
}
