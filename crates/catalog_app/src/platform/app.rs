use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use catalog_core::{CatalogViewModel, CycleStatus};
use catalog_engine::{ReqwestFetcher, Store};
use catalog_logging::{catalog_info, catalog_warn};
use chrono::Utc;

use super::config::{self, AppConfig, CONFIG_FILENAME};
use super::logging;
use super::ui::render::{render, ExpandState};

pub async fn run_app() -> anyhow::Result<()> {
    let loaded = config::load_config(Path::new("."));
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        Ok(None) | Err(_) => AppConfig::default(),
    };

    logging::initialize(config.log, config.log_level());
    match loaded {
        Ok(Some(_)) => catalog_info!("Loaded configuration from {}", CONFIG_FILENAME),
        Ok(None) => catalog_info!("No {} found, using defaults", CONFIG_FILENAME),
        Err(err) => catalog_warn!("{err}; using defaults"),
    }

    let fetcher =
        ReqwestFetcher::new(config.fetch_settings()).context("invalid fetch configuration")?;
    catalog_info!("Catalog source: {}", fetcher.url());

    let mut expand = ExpandState::new(config.expand_groups);
    for group_id in &config.toggled_groups {
        expand.toggle(*group_id);
    }

    let store = Store::start(Arc::new(fetcher), config.policy());
    let mut watcher = store.subscribe();
    present(&watcher.view(), &expand)?;

    let snapshot = watcher.settled().await?;
    store.shutdown();
    present(&watcher.view(), &expand)?;

    match (snapshot.status, snapshot.error) {
        (CycleStatus::Failed, Some(error)) => anyhow::bail!(error),
        _ => Ok(()),
    }
}

fn present(view: &CatalogViewModel, expand: &ExpandState) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for line in render(view, expand, Utc::now()) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
