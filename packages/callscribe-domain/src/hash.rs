/// Correlation key for a business identifier: a deterministic content
/// digest, used as the storage partition key so repeated processing of the
/// same call converges on the same partition.
pub fn correlation_key(call_id: &str) -> String {
	blake3::hash(call_id.as_bytes()).to_hex().to_string()
}
