//! 屏幕右上角的临时提示

use std::collections::VecDeque;
use std::time::Duration;

/// 提示显示时长
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// 同时保留的提示数量上限
pub const MAX_NOTIFICATIONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub remaining: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(%text, "notification");
        self.queue.push_back(Notification {
            text,
            remaining: NOTIFICATION_TTL,
        });
        while self.queue.len() > MAX_NOTIFICATIONS {
            self.queue.pop_front();
        }
    }

    /// 推进时间并移除过期提示
    pub fn tick(&mut self, dt: Duration) {
        for n in self.queue.iter_mut() {
            n.remaining = n.remaining.saturating_sub(dt);
        }
        self.queue.retain(|n| !n.remaining.is_zero());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn latest(&self) -> Option<&str> {
        self.queue.back().map(|n| n.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
