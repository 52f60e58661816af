pub mod cursor;
pub mod invocation;
pub mod persistence;
pub mod retrieval;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use invocation::InvocationOutcome;
pub use persistence::{CompletionReport, StoredRecord};
pub use retrieval::{PaginationBlock, RecordView, RetrievalRequest, RetrievalResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use callscribe_config::Config;
use callscribe_providers::{
	job_engine::{self, JobRequest, JobSubmission},
	object_store,
};
use callscribe_storage::RecordStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Port over the asynchronous analytics job engine.
pub trait JobEngine
where
	Self: Send + Sync,
{
	fn submit<'a>(
		&'a self,
		cfg: &'a callscribe_config::Engine,
		request: &'a JobRequest,
	) -> BoxFuture<'a, callscribe_providers::Result<JobSubmission>>;
}

/// Port over the object store holding result blobs.
pub trait ObjectStore
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		cfg: &'a callscribe_config::ObjectStore,
		bucket: &'a str,
		key: &'a str,
	) -> BoxFuture<'a, callscribe_providers::Result<String>>;
}

struct DefaultCollaborators;

impl JobEngine for DefaultCollaborators {
	fn submit<'a>(
		&'a self,
		cfg: &'a callscribe_config::Engine,
		request: &'a JobRequest,
	) -> BoxFuture<'a, callscribe_providers::Result<JobSubmission>> {
		Box::pin(job_engine::submit(cfg, request))
	}
}

impl ObjectStore for DefaultCollaborators {
	fn fetch<'a>(
		&'a self,
		cfg: &'a callscribe_config::ObjectStore,
		bucket: &'a str,
		key: &'a str,
	) -> BoxFuture<'a, callscribe_providers::Result<String>> {
		Box::pin(object_store::fetch_object(cfg, bucket, key))
	}
}

#[derive(Clone)]
pub struct Collaborators {
	pub engine: Arc<dyn JobEngine>,
	pub objects: Arc<dyn ObjectStore>,
}
impl Collaborators {
	pub fn new(engine: Arc<dyn JobEngine>, objects: Arc<dyn ObjectStore>) -> Self {
		Self { engine, objects }
	}
}
impl Default for Collaborators {
	fn default() -> Self {
		let collaborator = Arc::new(DefaultCollaborators);

		Self { engine: collaborator.clone(), objects: collaborator }
	}
}

/// The three pipeline stages behind one facade. Stateless apart from the
/// injected configuration and collaborators; every operation is one
/// self-contained unit of work.
pub struct CallscribeService {
	pub cfg: Config,
	pub store: Arc<dyn RecordStore>,
	pub collaborators: Collaborators,
}
impl CallscribeService {
	pub fn new(cfg: Config, store: Arc<dyn RecordStore>) -> Self {
		Self { cfg, store, collaborators: Collaborators::default() }
	}

	pub fn with_collaborators(
		cfg: Config,
		store: Arc<dyn RecordStore>,
		collaborators: Collaborators,
	) -> Self {
		Self { cfg, store, collaborators }
	}
}
