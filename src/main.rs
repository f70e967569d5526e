//! labdesk server
//!
//! Serves every portal collection over REST. The configuration file is
//! taken from `LABDESK_CONFIG` when set; log filtering follows `RUST_LOG`.

use anyhow::{Context, Result};
use labdesk::demo;
use labdesk::prelude::*;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "LABDESK_CONFIG";
const DEFAULT_LOG_FILTER: &str = "labdesk=info,tower_http=info";

fn load_config() -> Result<PortalConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => PortalConfig::from_yaml_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path)),
        Err(_) => Ok(PortalConfig::default_config()),
    }
}

fn store<T: Record>(seed: bool, records: impl FnOnce() -> Vec<T>) -> InMemoryRecordService<T> {
    if seed {
        InMemoryRecordService::with_records(records())
    } else {
        InMemoryRecordService::new()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config()?;
    let seed = config.seed_demo_data;
    if seed {
        tracing::info!("seeding collections with demo records");
    }

    ServerBuilder::new()
        .with_config(config)
        .register_collection::<NewProject>(store(seed, demo::projects))?
        .register_collection::<NewMember>(store(seed, demo::members))?
        .register_collection::<NewPaper>(store(seed, demo::papers))?
        .register_collection::<NewPatent>(store(seed, demo::patents))?
        .register_collection::<NewAward>(store(seed, demo::awards))?
        .register_collection::<NewBoardPost>(store(seed, demo::board_posts))?
        .register_collection::<NewLeave>(store(seed, demo::leaves))?
        .serve()
        .await
}
