//! drugscope — ChEMBL approved-drug → UniProt keyword aggregation.
//! Entry point for the batch binary.

mod config;

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use drugscope_ingestion::output::write_output;
use drugscope_ingestion::pacing::FixedDelay;
use drugscope_ingestion::pipeline::{run_aggregation, AggregationJob};
use drugscope_ingestion::progress::TracingProgress;
use drugscope_ingestion::sources::chembl::ChemblClient;
use drugscope_ingestion::sources::uniprot::UniProtClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("drugscope=debug,info")),
        )
        .init();

    info!("drugscope starting up");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = match config::Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Could not load drugscope.toml: {e}; using defaults");
            config::Config::default()
        }
    };

    let chembl = ChemblClient::with_base_url(&config.chembl_base_url)
        .with_page_limit(config.page_limit);
    let uniprot = UniProtClient::with_base_url(&config.uniprot_base_url);
    let pacer = FixedDelay::new(Duration::from_millis(config.pause_ms));
    let observer = TracingProgress;

    let job = AggregationJob {
        recency_threshold: config.recency_threshold,
        progress_interval: config.progress_interval,
    };

    let (document, summary) = run_aggregation(&job, &chembl, &uniprot, &pacer, &observer).await?;

    // The only fatal I/O in the run: failure here aborts with the error.
    write_output(&document, &config.output_path)?;

    info!(
        drugs_total = summary.drugs_total,
        drugs_recent = summary.drugs_recent,
        accession_pairs = summary.accession_pairs,
        keywords_fetched = summary.keywords_fetched,
        errors = summary.errors.len(),
        duration_ms = summary.duration_ms,
        "Data retrieval complete"
    );

    Ok(())
}
