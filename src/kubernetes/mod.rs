// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Access to the cluster API: the gateway seam used by the watch loops and its kube-rs implementation.

pub mod client;
pub mod gateway;

pub use client::KubeGateway;
pub use gateway::{ClusterGateway, EventStream};
