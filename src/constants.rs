// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read at startup
pub mod env {
    /// Namespace whose secrets are replicated
    pub const ORIGIN: &str = "K8NSKEL_ORIGIN";
    /// Comma-separated namespaces that never receive copies
    pub const IGNORE_DEST: &str = "K8NSKEL_IGNORE_DEST";
    /// Comma-separated secret names that are not kept in sync
    pub const EXCLUDE_SECRETS: &str = "K8NSKEL_EXCLUDE_SECRETS";
}

/// Defaults used when the environment does not override them
pub mod defaults {
    pub const ORIGIN: &str = "k8nskel-origin";
    pub const IGNORE_DEST: &str = "kube-public,kube-system";
    pub const EXCLUDE_SECRETS: &str = "";
}

/// Name prefix of the token secret Kubernetes creates for the default service account
pub const DEFAULT_TOKEN_PREFIX: &str = "default-token-";

/// Secret type of service account tokens
pub const SERVICE_ACCOUNT_TOKEN_TYPE: &str = "kubernetes.io/service-account-token";

/// Resource version used to open watches; the API server replays existing objects as ADDED
pub const WATCH_FROM_ANY_VERSION: &str = "0";
