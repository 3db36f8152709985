use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use lanid_common::config::Config;
use lanid_core::adapters::{ArpAdapter, DiscoveryAdapter, HostsFileAdapter};
use lanid_core::directory::ClientDirectory;
use lanid_core::refresher::Refresher;
use lanid_core::upstream::AllowAllUpstreams;

/// Runs the background refresher until ctrl-c, then stops it cleanly.
pub async fn watch(interval: u64, offline: bool) -> anyhow::Result<()> {
    let cfg = Config {
        offline,
        refresh_interval: Duration::from_secs(interval),
    };

    let directory = Arc::new(ClientDirectory::new(None, Box::new(AllowAllUpstreams)));

    if cfg.offline {
        info!("offline mode, refresher not started");
        return Ok(());
    }

    let adapters: Vec<Box<dyn DiscoveryAdapter>> =
        vec![Box::new(HostsFileAdapter::new()), Box::new(ArpAdapter::new())];

    let refresher = Refresher::spawn(Arc::clone(&directory), adapters, cfg.refresh_interval);
    info!(
        "refreshing every {}s, press ctrl-c to stop",
        cfg.refresh_interval.as_secs()
    );

    tokio::signal::ctrl_c().await?;
    info!("stopping refresher");
    refresher.stop().await;

    Ok(())
}
