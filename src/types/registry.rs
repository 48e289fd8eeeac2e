// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::collections::HashSet;

/// Immutable replication settings: where secrets come from, which namespaces
/// never receive copies, and which secrets are left out of the live sync.
#[derive(Debug, Clone)]
pub struct OriginRegistry {
    origin: String,
    ignore_dest: HashSet<String>,
    exclude_secrets: HashSet<String>,
}

impl OriginRegistry {
    /// Build a registry. The origin is always added to the ignored destinations
    /// and empty names are discarded.
    pub fn new<I, E>(origin: impl Into<String>, ignore_dest: I, exclude_secrets: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let origin = origin.into();

        let mut ignore_dest: HashSet<String> = ignore_dest
            .into_iter()
            .map(Into::into)
            .filter(|ns: &String| !ns.is_empty())
            .collect();
        ignore_dest.insert(origin.clone());

        let exclude_secrets = exclude_secrets
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.is_empty())
            .collect();

        Self {
            origin,
            ignore_dest,
            exclude_secrets,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn is_ignored_destination(&self, namespace: &str) -> bool {
        self.ignore_dest.contains(namespace)
    }

    pub fn is_excluded_secret(&self, name: &str) -> bool {
        self.exclude_secrets.contains(name)
    }

    /// Filter a namespace listing down to the namespaces that receive copies
    pub fn destinations<I>(&self, namespaces: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        namespaces
            .into_iter()
            .filter(|ns| !self.is_ignored_destination(ns))
            .collect()
    }

    pub fn ignored_destinations(&self) -> impl Iterator<Item = &str> {
        self.ignore_dest.iter().map(String::as_str)
    }

    pub fn excluded_secrets(&self) -> impl Iterator<Item = &str> {
        self.exclude_secrets.iter().map(String::as_str)
    }
}
