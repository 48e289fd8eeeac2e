// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Core value types shared by the gateway, the watch loops and the supervisor.

pub mod event;
pub mod registry;

pub use event::ResourceEvent;
pub use registry::OriginRegistry;
