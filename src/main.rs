// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nsskel::config::Config;
use nsskel::kubernetes::KubeGateway;
use nsskel::supervisor::Supervisor;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting nsskel");

    let registry = Config::from_env()?.into_registry();
    info!(
        "Configuration loaded: origin={}, ignore_dest={:?}, exclude_secrets={:?}",
        registry.origin(),
        registry.ignored_destinations().collect::<Vec<_>>(),
        registry.excluded_secrets().collect::<Vec<_>>()
    );

    let client = Client::try_default()
        .await
        .context("Failed to initialize Kubernetes API client")?;
    info!("Connected to Kubernetes cluster");

    let supervisor = Supervisor::new(Arc::new(KubeGateway::new(client)), registry);
    tokio::spawn(cancel_on_signal(supervisor.shutdown_token()));

    supervisor.run().await?;

    info!("nsskel stopped");
    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kube=warn"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Cancel `shutdown` on SIGINT, SIGTERM or SIGQUIT
async fn cancel_on_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        match (
            unix_signal(SignalKind::terminate()),
            unix_signal(SignalKind::quit()),
        ) {
            (Ok(mut term), Ok(mut quit)) => {
                tokio::select! {
                    _ = term.recv() => info!("Received SIGTERM"),
                    _ = quit.recv() => info!("Received SIGQUIT"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => {}
        _ = shutdown.cancelled() => return,
    }

    info!("Shutting down watch loops");
    shutdown.cancel();
}
