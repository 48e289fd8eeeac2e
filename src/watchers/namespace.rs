// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace watch - seeds newly created namespaces with the origin's secrets.

use crate::error::{ReplicatorError, Result};
use crate::kubernetes::ClusterGateway;
use crate::sync::{bootstrap_candidates, replica_for};
use crate::types::{OriginRegistry, ResourceEvent};
use crate::watchers::{LoopOutcome, WatchLoop, WatchSession};
use async_trait::async_trait;
use futures::StreamExt;
use kube::ResourceExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

pub struct NamespaceWatcher {
    gateway: Arc<dyn ClusterGateway>,
    registry: Arc<OriginRegistry>,
}

impl NamespaceWatcher {
    pub fn new(gateway: Arc<dyn ClusterGateway>, registry: Arc<OriginRegistry>) -> Self {
        Self { gateway, registry }
    }

    async fn handle_added(&self, session: &mut WatchSession, namespace: &str) {
        if session.claim_replay(namespace) {
            debug!("Namespace '{}' existed at startup, skipping", namespace);
            return;
        }

        if self.registry.is_ignored_destination(namespace) {
            info!(
                "Namespace '{}' created but is not a destination, skipping",
                namespace
            );
            return;
        }

        self.bootstrap(namespace).await;
    }

    /// Copy every origin secret, except default service account tokens, into a new namespace
    #[instrument(skip(self), fields(origin = %self.registry.origin()))]
    async fn bootstrap(&self, namespace: &str) {
        let origin = self.registry.origin();

        let secrets = match self.gateway.list_secrets(origin).await {
            Ok(s) => bootstrap_candidates(s),
            Err(e) => {
                error!("Failed to list secrets in '{}': {}", origin, e);
                return;
            }
        };

        let mut failed = 0;
        for secret in &secrets {
            let name = secret.name_any();
            if let Err(e) = self
                .gateway
                .create_secret(namespace, &replica_for(secret, namespace))
                .await
            {
                error!(
                    "Failed to create secret '{}' from '{}' in '{}': {}",
                    name, origin, namespace, e
                );
                failed += 1;
            }
        }

        if failed == 0 {
            info!(
                "All {} secrets were copied from '{}' to '{}'",
                secrets.len(),
                origin,
                namespace
            );
        } else {
            warn!(
                "Copied {} of {} secrets from '{}' to '{}'",
                secrets.len() - failed,
                secrets.len(),
                origin,
                namespace
            );
        }
    }
}

#[async_trait]
impl WatchLoop for NamespaceWatcher {
    fn name(&self) -> &'static str {
        "namespace"
    }

    async fn run_once(&self, shutdown: &CancellationToken) -> Result<LoopOutcome> {
        let mut events =
            self.gateway
                .watch_namespaces()
                .await
                .map_err(|e| ReplicatorError::WatchSetup {
                    resource: "namespace",
                    message: e.to_string(),
                })?;

        let existing =
            self.gateway
                .list_namespaces()
                .await
                .map_err(|e| ReplicatorError::WatchSetup {
                    resource: "namespace",
                    message: format!("failed to list namespaces: {}", e),
                })?;
        let mut session = WatchSession::new(existing.iter().map(|ns| ns.name_any()));

        info!("Watching namespaces ({} present at startup)", session.len());

        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Namespace watch cancelled");
                    return Ok(LoopOutcome::Stop);
                }
                event = events.next() => event,
            };

            match event {
                None => {
                    info!("Namespace watch closed, restarting");
                    return Ok(LoopOutcome::Restart);
                }
                Some(Err(e)) => {
                    warn!("Namespace watch interrupted: {}, restarting", e);
                    return Ok(LoopOutcome::Restart);
                }
                Some(Ok(ResourceEvent::Added(ns))) => {
                    self.handle_added(&mut session, &ns.name_any()).await;
                }
                Some(Ok(other)) => {
                    debug!("Ignoring {} event for namespace '{}'", other.kind(), other.name());
                }
            }
        }
    }
}
