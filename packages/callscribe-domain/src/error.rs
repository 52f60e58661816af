pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid notification: {message}")]
	Validation { message: String },
	#[error("Unrecognized envelope shape: {message}")]
	EnvelopeShape { message: String },
	#[error("No call identifier in storage key {key:?}.")]
	Extraction { key: String },
}
