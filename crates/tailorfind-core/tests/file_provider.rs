#![cfg(feature = "json")]

use std::io::Write;
use tailorfind_core::prelude::*;
use tailorfind_core::source::load_records;

const FIXTURE: &str = r#"[
  {"id": "b", "name": "Bee Stitch", "hasLocation": true, "latitude": null, "longitude": null},
  {"id": "a", "name": "Ace Tailors", "phone": "020 7946 0000", "has_location": true,
   "latitude": 51.5, "longitude": -0.1, "city": "London"}
]"#;

#[tokio::test]
async fn reads_plain_json() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();

    let provider = JsonFileRecordProvider::new(file.path());
    let state = load_records(&provider).await;
    let records = state.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "a");
    assert_eq!(records[0].phone.as_deref(), Some("020 7946 0000"));
    assert!(records[1].claims_location_without_coordinates());
}

#[cfg(feature = "compact")]
#[tokio::test]
async fn reads_gzipped_json() {
    use flate2::{write::GzEncoder, Compression};

    let file = tempfile::Builder::new().suffix(".json.gz").tempfile().unwrap();
    let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
    encoder.write_all(FIXTURE.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let provider = JsonFileRecordProvider::new(file.path());
    let records = provider.fetch_all().await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn missing_file_becomes_failed_state() {
    let dir = tempfile::tempdir().unwrap();
    let provider = JsonFileRecordProvider::new(dir.path().join("nope.json"));
    let state = load_records(&provider).await;
    assert!(state.records().is_empty());
    assert!(state.error().unwrap().contains("nope.json"));
}

#[tokio::test]
async fn malformed_file_becomes_failed_state() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(b"{ not json").unwrap();
    let provider = JsonFileRecordProvider::new(file.path());
    let state = load_records(&provider).await;
    assert!(matches!(state, RecordState::Failed(_)));
}
