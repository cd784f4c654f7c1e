//! Lookup run orchestration.
//!
//! Reads targets line by line, resolves each one, optionally enriches it and
//! emits the record before the next line is read.

mod report;

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::{Config, ResolveOptions, SOA_UPSTREAM};
use crate::dns::DnsReverseResolver;
use crate::engine::{CertificateProber, HostIdentifier, ReverseResolver};
use crate::enrichment::{Enricher, GeoLocator};
use crate::export::Emitter;
use crate::initialization::{init_client, init_prober, init_resolver, init_soa_resolver};
use crate::input::parse_target;
use crate::models::HostRecord;

pub use report::RunReport;

/// Runs a lookup with the provided configuration.
///
/// This is the main entry point for the library. It builds the per-run
/// resources (TLS prober, DNS resolvers and, with enrichment on, the
/// geolocation client), then processes the input strictly in order.
///
/// # Errors
///
/// Returns an error if:
/// - Batch mode is requested without an output file
/// - The output file cannot be opened, or writing a record fails
/// - The input cannot be opened or read (including invalid UTF-8)
/// - A per-run resource cannot be initialized
///
/// # Example
///
/// ```no_run
/// use certhost::{run_lookup, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     input: PathBuf::from("targets.txt"),
///     output: Some(PathBuf::from("hosts.json")),
///     ..Default::default()
/// };
/// let report = run_lookup(config).await?;
/// println!("{} of {} resolved", report.resolved(), report.total_targets);
/// # Ok(())
/// # }
/// ```
pub async fn run_lookup(config: Config) -> Result<RunReport> {
    if config.batch && config.output.is_none() {
        bail!("batch mode requires an output file (-o)");
    }

    let mut emitter = open_emitter(&config)?;

    let prober = init_prober().context("Failed to initialize TLS prober")?;
    let resolver = DnsReverseResolver::new(init_resolver(), init_soa_resolver(SOA_UPSTREAM));
    let identifier = HostIdentifier::new(prober, resolver);

    let enricher = if config.enrich {
        let client = init_client().context("Failed to initialize HTTP client")?;
        Some(Enricher::new(
            GeoLocator::new(client, config.geoip_url.clone()),
            Duration::from_secs(config.timeout_seconds),
        ))
    } else {
        None
    };

    let options = config.resolve_options();
    info!(
        "Starting lookup: timeout {}s, {} TLS attempt(s), enrichment {}",
        options.timeout.as_secs(),
        options.max_attempts,
        if config.enrich { "on" } else { "off" }
    );

    let report = if config.reads_stdin() {
        debug!("Reading targets from stdin");
        let input = BufReader::new(tokio::io::stdin());
        process_targets(input, &identifier, enricher.as_ref(), &options, &mut emitter).await?
    } else {
        let file = tokio::fs::File::open(&config.input)
            .await
            .with_context(|| format!("Failed to open input file {}", config.input.display()))?;
        let input = BufReader::new(file);
        process_targets(input, &identifier, enricher.as_ref(), &options, &mut emitter).await?
    };

    emitter.finish().context("Failed to write output")?;
    Ok(report)
}

/// Builds the emitter for the configured destination.
fn open_emitter(config: &Config) -> Result<Emitter> {
    let enriched = config.enrich;
    let emitter = match (&config.output, config.batch) {
        (Some(path), true) => Emitter::batch_to(path, config.format, enriched),
        (Some(path), false) => Emitter::append_to(path, config.format, enriched)?,
        (None, _) => Emitter::stdout(config.format, enriched),
    };
    Ok(emitter)
}

/// Resolves every target read from `input` and emits one record per target.
///
/// Targets are handled one at a time, in input order; each record is emitted
/// before the next line is read. Blank and comment lines are skipped.
///
/// # Errors
///
/// Returns an error on the first input read failure or output failure.
/// Records emitted before the failure stay emitted.
pub async fn process_targets<In, P, R>(
    input: In,
    identifier: &HostIdentifier<P, R>,
    enricher: Option<&Enricher>,
    options: &ResolveOptions,
    emitter: &mut Emitter,
) -> Result<RunReport>
where
    In: AsyncBufRead + Unpin,
    P: CertificateProber,
    R: ReverseResolver,
{
    let started = Instant::now();
    let mut report = RunReport::default();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let Some(target) = parse_target(&line) else {
            continue;
        };

        let outcome = identifier.resolve(&target, options).await;
        report.record(outcome.strategy);

        let enrichment = match enricher {
            Some(enricher) => Some(enricher.enrich(&target).await),
            None => None,
        };

        emitter.emit(HostRecord::new(&target, outcome, enrichment))?;
        report.records_written += 1;
    }

    report.elapsed_seconds = started.elapsed().as_secs_f64();
    Ok(report)
}
