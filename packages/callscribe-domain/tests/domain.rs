use callscribe_domain::{
	Error,
	envelope::{decode_completion, decode_notification},
	hash::correlation_key,
	keys::{call_id_from_key, is_result_key, normalize_object_key},
};

#[test]
fn notification_round_trip_direct() {
	let body = r#"{
		"callId": "call-42",
		"audioS3Uri": "s3://in-bucket/call-42/audio.wav",
		"timestamp": "2026-01-05T10:00:00Z",
		"metadata": {"agent": "a-7"}
	}"#;
	let notification = decode_notification(body).expect("Direct notification must decode.");

	assert_eq!(notification.call_id, "call-42");
	assert_eq!(notification.audio_s3_uri, "s3://in-bucket/call-42/audio.wav");
	assert!(notification.metadata.is_some());
}

#[test]
fn notification_rejects_oversized_call_id() {
	let call_id = "x".repeat(256);
	let body = format!(
		r#"{{"callId":"{call_id}","audioS3Uri":"s3://in-bucket/a.wav"}}"#
	);

	assert!(matches!(decode_notification(&body), Err(Error::Validation { .. })));
}

#[test]
fn notification_rejects_malformed_audio_uri() {
	let body = r#"{"callId":"call-42","audioS3Uri":"file:///tmp/a.wav"}"#;

	assert!(matches!(decode_notification(body), Err(Error::Validation { .. })));
}

#[test]
fn completion_decodes_direct_records() {
	let body = r#"{
		"Records": [
			{"s3": {"bucket": {"name": "call-analytics-out"},
				"object": {"key": "transcription-outputs/call-42/result.json", "size": 2048}}}
		]
	}"#;
	let events = decode_completion(body).expect("Direct completion must decode.");

	assert_eq!(events.len(), 1);
	assert_eq!(events[0].bucket, "call-analytics-out");
	assert_eq!(events[0].size, Some(2048));
}

#[test]
fn completion_decodes_wrapped_records() {
	let inner = r#"{\"Records\":[{\"s3\":{\"bucket\":{\"name\":\"call-analytics-out\"},\"object\":{\"key\":\"transcription-outputs/call-42/result.json\"}}}]}"#;
	let body = format!(r#"{{"Type":"Notification","Message":"{inner}"}}"#);
	let events = decode_completion(&body).expect("Wrapped completion must decode.");

	assert_eq!(events.len(), 1);
	assert_eq!(events[0].key, "transcription-outputs/call-42/result.json");
	assert_eq!(events[0].size, None);
}

#[test]
fn completion_with_no_records_is_empty_not_an_error() {
	let events = decode_completion(r#"{"Records": []}"#).expect("Empty Records must decode.");

	assert!(events.is_empty());
}

#[test]
fn result_key_chain_from_raw_event_to_call_id() {
	let raw = "transcription-outputs/call%2D42/result.json";
	let key = normalize_object_key(raw).expect("Key must normalize.");

	assert!(is_result_key(&key));
	assert_eq!(call_id_from_key(&key).expect("Key must extract."), "call-42");
}

#[test]
fn correlation_key_matches_between_stages() {
	let from_notification = correlation_key("call-42");
	let key = normalize_object_key("transcription-outputs/call-42/result.json")
		.expect("Key must normalize.");
	let from_completion = correlation_key(call_id_from_key(&key).expect("Key must extract."));

	assert_eq!(from_notification, from_completion);
}
