use std::net::SocketAddr;

use anyhow::Context;
use log::{error, info};
use tokio::net::TcpListener;

use netsnap::{collector, config::{Config, DEFAULT_PORT}, server, store::SnapshotStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    )
    .init();

    info!(
        "netsnap starting; netstat={} ss={}",
        config.netstat_bin, config.ss_bin
    );

    let store = match collector::collect(&config).await {
        Ok(records) => SnapshotStore::from_records(records),
        Err(e) => {
            error!("connection collection failed: {e:#}");
            SnapshotStore::empty()
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    server::serve(listener, store).await
}
