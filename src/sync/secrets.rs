// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret filtering and replica construction

use crate::constants::{DEFAULT_TOKEN_PREFIX, SERVICE_ACCOUNT_TOKEN_TYPE};
use k8s_openapi::api::core::v1::Secret;
use kube::{api::ObjectMeta, ResourceExt};

/// Check if a secret is the token Kubernetes generates for a namespace's default service account
pub fn is_default_token(secret: &Secret) -> bool {
    secret.name_any().starts_with(DEFAULT_TOKEN_PREFIX)
        && secret.type_.as_deref() == Some(SERVICE_ACCOUNT_TOKEN_TYPE)
}

/// Secrets from the origin namespace that a freshly created namespace receives
pub fn bootstrap_candidates(secrets: Vec<Secret>) -> Vec<Secret> {
    secrets
        .into_iter()
        .filter(|s| !is_default_token(s))
        .collect()
}

/// Build the copy of an origin secret that is written into `target_namespace`.
///
/// Only name, type and data are carried over.
pub fn replica_for(secret: &Secret, target_namespace: &str) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: secret.metadata.name.clone(),
            namespace: Some(target_namespace.to_string()),
            ..Default::default()
        },
        data: secret.data.clone(),
        type_: secret.type_.clone(),
        ..Default::default()
    }
}
