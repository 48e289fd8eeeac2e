// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Applying one origin change to every destination namespace

use crate::kubernetes::ClusterGateway;
use crate::sync::secrets::replica_for;
use k8s_openapi::api::core::v1::Secret;
use kube::ResourceExt;
use std::fmt;
use tracing::{error, info, instrument};

/// A write to replay in each destination
#[derive(Debug, Clone, Copy)]
pub enum Replication<'a> {
    Create(&'a Secret),
    Update(&'a Secret),
    Delete(&'a str),
}

impl Replication<'_> {
    pub fn secret_name(&self) -> String {
        match self {
            Replication::Create(secret) | Replication::Update(secret) => secret.name_any(),
            Replication::Delete(name) => name.to_string(),
        }
    }
}

impl fmt::Display for Replication<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Replication::Create(_) => "create",
            Replication::Update(_) => "update",
            Replication::Delete(_) => "delete",
        };
        f.write_str(op)
    }
}

/// Outcome of a fan-out, per destination
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FanOutReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

impl FanOutReport {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Apply `replication` to each destination in turn.
///
/// A failing destination is logged and skipped; it never stops the remaining ones.
#[instrument(
    skip(gateway, replication, destinations),
    fields(op = %replication, secret = %replication.secret_name())
)]
pub async fn fan_out(
    gateway: &dyn ClusterGateway,
    origin: &str,
    replication: Replication<'_>,
    destinations: &[String],
) -> FanOutReport {
    let secret_name = replication.secret_name();
    let mut report = FanOutReport::default();

    for dest in destinations {
        let result = match replication {
            Replication::Create(secret) => {
                gateway.create_secret(dest, &replica_for(secret, dest)).await
            }
            Replication::Update(secret) => {
                gateway.update_secret(dest, &replica_for(secret, dest)).await
            }
            Replication::Delete(name) => gateway.delete_secret(dest, name).await,
        };

        match result {
            Ok(()) => {
                info!(
                    "Secret '{}' from '{}': {} in '{}' succeeded",
                    secret_name, origin, replication, dest
                );
                report.succeeded.push(dest.clone());
            }
            Err(e) => {
                error!(
                    "Failed to {} secret '{}' from '{}' in '{}': {}",
                    replication, secret_name, origin, dest, e
                );
                report.failed.push(dest.clone());
            }
        }
    }

    report
}
