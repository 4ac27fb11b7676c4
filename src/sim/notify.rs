//! Short-lived status messages for the HUD

use std::collections::VecDeque;

use serde::Serialize;

use crate::consts::MAX_NOTIFICATIONS;

/// Most-recent-first message log, capped at [`MAX_NOTIFICATIONS`]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Notifications {
    log: VecDeque<String>,
    /// Messages pushed over the whole run, including those since evicted
    #[serde(skip)]
    pushed: u64,
}

impl Notifications {
    pub fn push(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::debug!("notify: {}", msg);
        self.log.push_front(msg);
        self.log.truncate(MAX_NOTIFICATIONS);
        self.pushed += 1;
    }

    /// Running total of pushes; survives [`Notifications::clear`]
    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.log.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }
}
