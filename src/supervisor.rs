// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runs the namespace and secret watch loops side by side, restarting each
//! when its watch closes and stopping both once either one stops.

use crate::error::Result;
use crate::kubernetes::ClusterGateway;
use crate::types::OriginRegistry;
use crate::watchers::{LoopOutcome, NamespaceWatcher, SecretWatcher, WatchLoop};
use anyhow::anyhow;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub struct Supervisor {
    loops: Vec<Arc<dyn WatchLoop>>,
    shutdown: CancellationToken,
}

impl Supervisor {
    pub fn new(gateway: Arc<dyn ClusterGateway>, registry: OriginRegistry) -> Self {
        let registry = Arc::new(registry);
        let namespaces: Arc<dyn WatchLoop> =
            Arc::new(NamespaceWatcher::new(gateway.clone(), registry.clone()));
        let secrets: Arc<dyn WatchLoop> = Arc::new(SecretWatcher::new(gateway, registry));

        Self {
            loops: vec![namespaces, secrets],
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops every loop when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Run all loops until they have all stopped.
    ///
    /// Returns an error if any loop stopped because its watch could not be
    /// established, or if a loop task panicked.
    pub async fn run(self) -> anyhow::Result<()> {
        let mut tasks = JoinSet::new();
        for watch_loop in self.loops {
            tasks.spawn(supervise(watch_loop, self.shutdown.clone()));
        }

        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => failures.push(e.to_string()),
                Err(e) => {
                    error!("Watch task aborted: {}", e);
                    self.shutdown.cancel();
                    failures.push(e.to_string());
                }
            }
        }

        if failures.is_empty() {
            info!("All watch loops stopped");
            Ok(())
        } else {
            Err(anyhow!("watch loops failed: {}", failures.join("; ")))
        }
    }
}

/// Keep one loop running until it stops, restarting it after every transient closure.
///
/// Leaving this function, for any reason, cancels `shutdown` so sibling loops wind down too.
async fn supervise(watch_loop: Arc<dyn WatchLoop>, shutdown: CancellationToken) -> Result<()> {
    let _stop_siblings = shutdown.clone().drop_guard();
    let name = watch_loop.name();
    let mut restarts: u64 = 0;

    loop {
        match watch_loop.run_once(&shutdown).await {
            Ok(LoopOutcome::Restart) => {
                restarts += 1;
                debug!("Restarting {} watch (restart #{})", name, restarts);
            }
            Ok(LoopOutcome::Stop) => {
                info!("Stopped watching {} events", name);
                return Ok(());
            }
            Err(e) => {
                error!("Failed to start watching {} events: {}", name, e);
                return Err(e);
            }
        }
    }
}
