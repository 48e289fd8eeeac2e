// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch loops that react to namespace and origin-secret events.

pub mod namespace;
pub mod secret;
pub mod session;

pub use namespace::NamespaceWatcher;
pub use secret::SecretWatcher;
pub use session::WatchSession;

use crate::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// How a single watch invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The watch closed on its own; open a new one with a fresh snapshot
    Restart,
    /// Cancellation was observed
    Stop,
}

/// One watch invocation: open the watch, take the startup snapshot, process
/// events until the watch closes or `shutdown` fires.
///
/// An `Err` means the watch could not be set up and is terminal.
#[async_trait]
pub trait WatchLoop: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run_once(&self, shutdown: &CancellationToken) -> Result<LoopOutcome>;
}
