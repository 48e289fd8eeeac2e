// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{defaults, env as keys};
use crate::error::ReplicatorError;
use crate::types::OriginRegistry;
use anyhow::{Context, Result};
use std::env;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Namespace whose secrets are replicated to every other namespace
    pub origin: String,
    pub ignore_dest: Vec<String>,
    pub exclude_secrets: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
            .context("Failed to load configuration from environment")
    }

    /// Build configuration from any key lookup, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let origin = lookup(keys::ORIGIN)
            .unwrap_or_else(|| defaults::ORIGIN.to_string())
            .trim()
            .to_string();
        if origin.is_empty() {
            return Err(ReplicatorError::InvalidConfig(format!(
                "{} must not be empty",
                keys::ORIGIN
            ))
            .into());
        }

        let ignore_dest = lookup(keys::IGNORE_DEST)
            .map(|v| split_csv(&v))
            .unwrap_or_else(|| split_csv(defaults::IGNORE_DEST));
        let exclude_secrets = lookup(keys::EXCLUDE_SECRETS)
            .map(|v| split_csv(&v))
            .unwrap_or_else(|| split_csv(defaults::EXCLUDE_SECRETS));

        Ok(Config {
            origin,
            ignore_dest,
            exclude_secrets,
        })
    }

    pub fn into_registry(self) -> OriginRegistry {
        OriginRegistry::new(self.origin, self.ignore_dest, self.exclude_secrets)
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
