// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster gateway backed by a kube-rs client

use crate::constants::WATCH_FROM_ANY_VERSION;
use crate::error::Result;
use crate::kubernetes::gateway::{ClusterGateway, EventStream};
use crate::types::ResourceEvent;
use async_trait::async_trait;
use futures::{future, StreamExt};
use k8s_openapi::api::core::v1::{Namespace, Secret};
use kube::api::{DeleteParams, ListParams, PostParams, WatchParams};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct KubeGateway {
    client: Client,
}

impl KubeGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn secrets(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Open a watch and translate its events, dropping bookmarks
async fn open_watch<K>(api: Api<K>) -> Result<EventStream<K>>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + 'static,
{
    let stream = api
        .watch(&WatchParams::default(), WATCH_FROM_ANY_VERSION)
        .await?;

    Ok(stream
        .filter_map(|item| {
            future::ready(match item {
                Ok(event) => ResourceEvent::from_watch_event(event),
                Err(e) => Some(Err(e.into())),
            })
        })
        .boxed())
}

#[async_trait]
impl ClusterGateway for KubeGateway {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        Ok(namespaces.list(&ListParams::default()).await?.items)
    }

    async fn watch_namespaces(&self) -> Result<EventStream<Namespace>> {
        debug!("Opening namespace watch");
        open_watch(Api::<Namespace>::all(self.client.clone())).await
    }

    #[instrument(skip(self))]
    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>> {
        Ok(self.secrets(namespace).list(&ListParams::default()).await?.items)
    }

    async fn watch_secrets(&self, namespace: &str) -> Result<EventStream<Secret>> {
        debug!("Opening secret watch in namespace {}", namespace);
        open_watch(self.secrets(namespace)).await
    }

    #[instrument(skip(self, secret))]
    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        self.secrets(namespace)
            .create(&PostParams::default(), secret)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, secret))]
    async fn update_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        let name = secret.metadata.name.clone().unwrap_or_default();
        self.secrets(namespace)
            .replace(&name, &PostParams::default(), secret)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<()> {
        self.secrets(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}
