//! # Background Refresher
//!
//! A single periodic task that drives the discovery adapters sequentially
//! and feeds every candidate into the directory. The task is owned by the
//! handle returned from [`Refresher::spawn`]: it stops promptly on
//! [`Refresher::stop`] and also when the handle is dropped, so shutdown
//! never leaks it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::adapters::DiscoveryAdapter;
use crate::directory::ClientDirectory;

/// Handle to the periodic discovery task.
pub struct Refresher {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Refresher {
    /// Starts the refresh loop. The first cycle runs immediately, then once
    /// per `interval`.
    pub fn spawn(
        directory: Arc<ClientDirectory>,
        adapters: Vec<Box<dyn DiscoveryAdapter>>,
        interval: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run(directory, adapters, interval, stop_rx));
        Self { stop_tx, task }
    }

    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.task.await;
    }
}

async fn run(
    directory: Arc<ClientDirectory>,
    adapters: Vec<Box<dyn DiscoveryAdapter>>,
    interval: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    loop {
        refresh_once(&directory, &adapters).await;

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = stop_rx.changed() => {
                // A closed channel means the handle is gone; stop either way.
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
        }
    }
    debug!("discovery refresher stopped");
}

/// Runs one discovery cycle: every adapter in turn, all I/O outside the
/// directory lock, failures absorbed as zero candidates.
pub async fn refresh_once(directory: &ClientDirectory, adapters: &[Box<dyn DiscoveryAdapter>]) {
    for adapter in adapters {
        let candidates = match adapter.candidates().await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("{} discovery failed: {e:#}", adapter.name());
                continue;
            }
        };

        let mut added = 0usize;
        for (addr, host) in candidates {
            if directory.add_host(addr, &host, adapter.priority()) {
                added += 1;
            }
        }
        debug!("added {added} host aliases from {}", adapter.name());
    }
}
