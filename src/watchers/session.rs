// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::collections::HashSet;

/// Names that existed when a watch was opened.
///
/// The API server replays every existing object as `ADDED` when a watch
/// starts. Each name in the snapshot swallows exactly one such event; any
/// later `ADDED` for the same name is a real creation.
#[derive(Debug, Default)]
pub struct WatchSession {
    snapshot: HashSet<String>,
}

impl WatchSession {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            snapshot: names.into_iter().collect(),
        }
    }

    /// Returns true if `name` was part of the snapshot, consuming its entry
    pub fn claim_replay(&mut self, name: &str) -> bool {
        self.snapshot.remove(name)
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}
