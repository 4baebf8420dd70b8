//! ipinfo - IP geolocation service
//!
//! Composition root: wires the MaxMind store, the LRU cache and the HTTP
//! server together.

use clap::Parser;
use ipinfo::adapters::inbound::HttpServer;
use ipinfo::adapters::outbound::{LruLocationCache, MaxMindLocationStore};
use ipinfo::cli::Cli;
use ipinfo::config::load_config_from;
use ipinfo::render::{text, BuildInfo};
use ipinfo::{AddressExtractor, HeaderFilter, LocationService};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        let mut out = String::new();
        text::version(&mut out, &BuildInfo::current())?;
        print!("{}", out);
        return Ok(());
    }

    let cfg = load_config_from(|key| cli.env_var(key))?;

    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting ipinfo listen={} db={} cache={}",
        cfg.listen_addr,
        cfg.db_path,
        cfg.cache_size
    );

    let store = Arc::new(MaxMindLocationStore::from_file(&cfg.db_path)?);
    tracing::info!("loaded {} database", store.database_type());

    let cache = Arc::new(LruLocationCache::new(cfg.cache_size));
    if !cache.is_enabled() {
        tracing::info!("location cache disabled");
    }

    let extractor = AddressExtractor::new(cfg.ip_header.clone());
    if let Some(header) = extractor.trusted_header() {
        tracing::info!("client address taken from {} header", header);
    }

    let service = Arc::new(LocationService::new(
        store,
        cache,
        extractor,
        HeaderFilter::new(cfg.ignore_set()),
    ));

    HttpServer::new(cfg.listen_addr.clone(), service).run().await
}
