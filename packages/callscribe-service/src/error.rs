pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid notification: {message}")]
	Validation { message: String },
	#[error("Unrecognized envelope shape: {message}")]
	EnvelopeShape { message: String },
	#[error("No call identifier in storage key {key:?}.")]
	Extraction { key: String },
	#[error("Empty result body at s3://{bucket}/{key}.")]
	EmptyBody { bucket: String, key: String },
	#[error("Malformed analytics result: {message}")]
	MalformedResult { message: String },
	#[error("Invalid pagination token: {message}")]
	CursorDecode { message: String },
	#[error("No records found for hash {searched_hash}.")]
	NotFound { searched_hash: String },
	#[error("Upstream call failed: {message}")]
	Upstream { message: String },
	#[error(transparent)]
	Storage(#[from] callscribe_storage::Error),
}

impl From<callscribe_domain::Error> for Error {
	fn from(err: callscribe_domain::Error) -> Self {
		match err {
			callscribe_domain::Error::Validation { message } => Self::Validation { message },
			callscribe_domain::Error::EnvelopeShape { message } => Self::EnvelopeShape { message },
			callscribe_domain::Error::Extraction { key } => Self::Extraction { key },
		}
	}
}

impl From<callscribe_providers::Error> for Error {
	fn from(err: callscribe_providers::Error) -> Self {
		Self::Upstream { message: err.to_string() }
	}
}
