// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The list/watch/write primitives the replicator needs from the cluster.

use crate::error::Result;
use crate::types::ResourceEvent;
use async_trait::async_trait;
use futures::stream::BoxStream;
use k8s_openapi::api::core::v1::{Namespace, Secret};

/// Stream of events from a single watch request. The stream ends when the
/// server closes the watch.
pub type EventStream<K> = BoxStream<'static, Result<ResourceEvent<K>>>;

#[async_trait]
pub trait ClusterGateway: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>>;

    /// Open a namespace watch. Namespaces that already exist are replayed as `Added`.
    async fn watch_namespaces(&self) -> Result<EventStream<Namespace>>;

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>>;

    /// Open a secret watch scoped to one namespace. Existing secrets are replayed as `Added`.
    async fn watch_secrets(&self, namespace: &str) -> Result<EventStream<Secret>>;

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<()>;

    /// Unconditionally overwrite an existing secret
    async fn update_secret(&self, namespace: &str, secret: &Secret) -> Result<()>;

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<()>;
}
