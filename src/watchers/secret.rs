// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret watch - mirrors changes to origin secrets into every destination namespace.

use crate::error::{ReplicatorError, Result};
use crate::kubernetes::ClusterGateway;
use crate::sync::{fan_out, Replication};
use crate::types::{OriginRegistry, ResourceEvent};
use crate::watchers::{LoopOutcome, WatchLoop, WatchSession};
use async_trait::async_trait;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::ResourceExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub struct SecretWatcher {
    gateway: Arc<dyn ClusterGateway>,
    registry: Arc<OriginRegistry>,
}

impl SecretWatcher {
    pub fn new(gateway: Arc<dyn ClusterGateway>, registry: Arc<OriginRegistry>) -> Self {
        Self { gateway, registry }
    }

    /// Current destination namespaces. Listed on every event so namespaces
    /// created or removed since the last event are taken into account.
    async fn destinations(&self) -> Result<Vec<String>> {
        let namespaces = self.gateway.list_namespaces().await?;
        Ok(self
            .registry
            .destinations(namespaces.iter().map(|ns| ns.name_any())))
    }

    async fn handle_event(&self, session: &mut WatchSession, event: ResourceEvent<Secret>) {
        let origin = self.registry.origin();
        let name = event.name();

        if self.registry.is_excluded_secret(&name) {
            debug!("Secret '{}' is excluded, ignoring {} event", name, event.kind());
            return;
        }

        // a replay writes nothing, so it is claimed before any namespace lookup
        if matches!(event, ResourceEvent::Added(_)) && session.claim_replay(&name) {
            debug!("Secret '{}' existed at startup, skipping", name);
            return;
        }

        let destinations = match self.destinations().await {
            Ok(d) => d,
            Err(e) => {
                error!(
                    "Failed to list namespaces for {} of secret '{}' in '{}': {}",
                    event.kind(),
                    name,
                    origin,
                    e
                );
                return;
            }
        };

        let replication = match &event {
            ResourceEvent::Added(secret) => Replication::Create(secret),
            ResourceEvent::Modified(secret) => Replication::Update(secret),
            ResourceEvent::Deleted(deleted) => Replication::Delete(deleted),
        };

        info!(
            "Secret '{}' {} in '{}', propagating to {} namespaces",
            name,
            event.kind(),
            origin,
            destinations.len()
        );

        let report = fan_out(self.gateway.as_ref(), origin, replication, &destinations).await;
        if report.failed.is_empty() {
            debug!(
                "Secret '{}': {} applied to {:?}",
                name, replication, report.succeeded
            );
        } else {
            warn!(
                "Secret '{}': {} failed in {} of {} namespaces: {:?}",
                name,
                replication,
                report.failed.len(),
                report.attempted(),
                report.failed
            );
        }
    }
}

#[async_trait]
impl WatchLoop for SecretWatcher {
    fn name(&self) -> &'static str {
        "secret"
    }

    async fn run_once(&self, shutdown: &CancellationToken) -> Result<LoopOutcome> {
        let origin = self.registry.origin();

        let mut events =
            self.gateway
                .watch_secrets(origin)
                .await
                .map_err(|e| ReplicatorError::WatchSetup {
                    resource: "secret",
                    message: e.to_string(),
                })?;

        let existing =
            self.gateway
                .list_secrets(origin)
                .await
                .map_err(|e| ReplicatorError::WatchSetup {
                    resource: "secret",
                    message: format!("failed to list secrets in '{}': {}", origin, e),
                })?;
        let mut session = WatchSession::new(
            existing
                .iter()
                .map(|s| s.name_any())
                .filter(|name| !self.registry.is_excluded_secret(name)),
        );

        info!(
            "Watching secrets in '{}' ({} present at startup)",
            origin,
            session.len()
        );

        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Secret watch cancelled");
                    return Ok(LoopOutcome::Stop);
                }
                event = events.next() => event,
            };

            match event {
                None => {
                    info!("Secret watch closed, restarting");
                    return Ok(LoopOutcome::Restart);
                }
                Some(Err(e)) => {
                    warn!("Secret watch interrupted: {}, restarting", e);
                    return Ok(LoopOutcome::Restart);
                }
                Some(Ok(event)) => self.handle_event(&mut session, event).await,
            }
        }
    }
}
