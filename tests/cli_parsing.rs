//! Tests for CLI option parsing and conversion into the library config.

use clap::Parser;
use certhost::config::{Opt, OutputFormat};
use certhost::Config;
use std::path::PathBuf;
use std::time::Duration;

fn parse(args: &[&str]) -> Result<Opt, clap::Error> {
    Opt::try_parse_from(std::iter::once("certhost").chain(args.iter().copied()))
}

#[test]
fn test_defaults() {
    let config = Config::from(parse(&[]).expect("no arguments should parse"));
    assert!(config.reads_stdin());
    assert_eq!(config.output, None);
    assert_eq!(config.format, OutputFormat::Text);
    assert!(!config.enrich);
    assert!(!config.batch);

    let options = config.resolve_options();
    assert_eq!(options.timeout, Duration::from_secs(5));
    assert_eq!(options.max_attempts, 3);
}

#[test]
fn test_all_flags() {
    let opt = parse(&[
        "-o",
        "hosts.json",
        "--input",
        "targets.txt",
        "--json",
        "--debug",
        "--batch",
        "--timeout",
        "2",
        "--retry",
        "1",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--geoip-url",
        "http://127.0.0.1:9000",
    ])
    .expect("full flag set should parse");
    let config = Config::from(opt);

    assert_eq!(config.output, Some(PathBuf::from("hosts.json")));
    assert_eq!(config.input, PathBuf::from("targets.txt"));
    assert!(!config.reads_stdin());
    assert_eq!(config.format, OutputFormat::Json);
    assert!(config.enrich);
    assert!(config.batch);
    assert_eq!(config.timeout_seconds, 2);
    assert_eq!(config.retry, 1);
    assert_eq!(config.geoip_url, "http://127.0.0.1:9000");
}

#[test]
fn test_long_output_flag() {
    let opt = parse(&["--output", "out.txt"]).expect("--output should parse");
    assert_eq!(opt.output, Some(PathBuf::from("out.txt")));
}

#[test]
fn test_batch_requires_output() {
    assert!(parse(&["--batch"]).is_err());
}

#[test]
fn test_rejects_non_numeric_timeout() {
    assert!(parse(&["--timeout", "soon"]).is_err());
}

#[test]
fn test_rejects_zero_timeout() {
    let err = parse(&["--timeout", "0"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    assert!(parse(&["--timeout", "1"]).is_ok());
}

#[test]
fn test_rejects_unknown_log_level() {
    assert!(parse(&["--log-level", "loud"]).is_err());
}
