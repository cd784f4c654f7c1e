//! Tests for writing result records to files (streaming and batch).

use certhost::export::Emitter;
use certhost::models::{Enrichment, Fingerprints, GeoRecord};
use certhost::{HostRecord, OutputFormat, ResolutionOutcome, Strategy, Target};
use tempfile::TempDir;

fn record(address: &str, host: &str, enrichment: Option<Enrichment>) -> HostRecord {
    let target = Target {
        address: address.to_string(),
        port: "443".to_string(),
    };
    let outcome = ResolutionOutcome {
        hostname: host.to_string(),
        strategy: Strategy::Certificate,
    };
    HostRecord::new(&target, outcome, enrichment)
}

fn enrichment() -> Enrichment {
    Enrichment {
        fingerprints: Fingerprints {
            ctls: Some("error: failed to run ctls: No such file or directory (os error 2)".to_string()),
            ztls: Some("{\"handshake\":\"ok\"}".to_string()),
            openssl: Some("CONNECTED(00000003)\n---\nNo client certificate CA names sent".to_string()),
        },
        geo: GeoRecord {
            network: Some("93.184.216.0/24".to_string()),
            version: Some("IPv4".to_string()),
            city: Some("Norwell".to_string()),
            region: Some("Massachusetts".to_string()),
            region_code: Some("MA".to_string()),
            country: Some("US".to_string()),
            country_name: Some("United States".to_string()),
            country_code: Some("US".to_string()),
            latitude: Some(42.1508),
            longitude: Some(-70.8228),
            timezone: Some("America/New_York".to_string()),
            org: Some("EDGECAST".to_string()),
        },
    }
}

#[test]
fn test_enriched_json_record_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hosts.jsonl");
    let original = record("93.184.216.34", "www.example.org", Some(enrichment()));

    let mut emitter = Emitter::append_to(&path, OutputFormat::Json, true).unwrap();
    emitter.emit(original.clone()).unwrap();
    emitter.finish().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1, "multi-line tool output stays escaped");
    let parsed: HostRecord = serde_json::from_str(contents.trim_end()).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_streaming_runs_append_to_the_same_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hosts.txt");

    for (address, host) in [("192.0.2.1", "a.example"), ("192.0.2.2", "b.example")] {
        let mut emitter = Emitter::append_to(&path, OutputFormat::Text, false).unwrap();
        emitter.emit(record(address, host, None)).unwrap();
        emitter.finish().unwrap();
    }

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "192.0.2.1:443 [a.example]\n192.0.2.2:443 [b.example]\n"
    );
}

#[test]
fn test_batch_replaces_previous_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hosts.json");

    for host in ["first.example", "second.example"] {
        let mut emitter = Emitter::batch_to(&path, OutputFormat::Json, false);
        emitter.emit(record("192.0.2.1", host, None)).unwrap();
        assert_eq!(emitter.finish().unwrap(), 1);
    }

    let parsed: Vec<HostRecord> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].host, "second.example");
}

#[test]
fn test_enriched_text_block() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hosts.txt");

    let mut emitter = Emitter::batch_to(&path, OutputFormat::Text, true);
    emitter
        .emit(record("93.184.216.34", "www.example.org", Some(enrichment())))
        .unwrap();
    emitter.finish().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("93.184.216.34:443 [www.example.org]\nCTLS: error: failed to run ctls"));
    assert!(contents.contains("\nCountryName: United States\n"));
    assert!(contents.contains("\nLatitude: 42.150800\n"));
    assert!(contents.ends_with("Org: EDGECAST\n"));
}
