// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{ReplicatorError, Result};
use kube::api::WatchEvent;
use kube::{Resource, ResourceExt};

/// A change observed on a watched resource.
///
/// Deletions only carry the object name since nothing else is needed to
/// propagate them.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent<K> {
    Added(K),
    Modified(K),
    Deleted(String),
}

impl<K> ResourceEvent<K>
where
    K: Resource,
{
    /// Name of the object the event refers to
    pub fn name(&self) -> String {
        match self {
            ResourceEvent::Added(obj) | ResourceEvent::Modified(obj) => obj.name_any(),
            ResourceEvent::Deleted(name) => name.clone(),
        }
    }

    /// Event kind as the API server spells it, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceEvent::Added(_) => "ADDED",
            ResourceEvent::Modified(_) => "MODIFIED",
            ResourceEvent::Deleted(_) => "DELETED",
        }
    }

    /// Translate a raw watch event.
    ///
    /// Returns `None` for bookmarks and an error for in-band `ERROR` events.
    pub fn from_watch_event(event: WatchEvent<K>) -> Option<Result<Self>> {
        match event {
            WatchEvent::Added(obj) => Some(Ok(ResourceEvent::Added(obj))),
            WatchEvent::Modified(obj) => Some(Ok(ResourceEvent::Modified(obj))),
            WatchEvent::Deleted(obj) => Some(Ok(ResourceEvent::Deleted(obj.name_any()))),
            WatchEvent::Bookmark(_) => None,
            WatchEvent::Error(err) => Some(Err(ReplicatorError::WatchStream(format!(
                "{} ({}): {}",
                err.reason, err.code, err.message
            )))),
        }
    }
}
