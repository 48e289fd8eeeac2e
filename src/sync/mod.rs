// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret replication: building copies and writing them to destination namespaces.

pub mod fanout;
pub mod secrets;

pub use fanout::{fan_out, FanOutReport, Replication};
pub use secrets::{bootstrap_candidates, is_default_token, replica_for};
