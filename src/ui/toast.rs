//! Transient toast notifications

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// Wall-clock time shown next to the message
    pub shown_at: DateTime<Local>,
    created: Instant,
}

impl Toast {
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
}

/// Stack of toasts, newest last
#[derive(Debug, Clone)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
    capacity: usize,
}

impl Notifications {
    pub fn new(lifetime: Duration, capacity: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
            capacity: capacity.max(1),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        if self.toasts.len() == self.capacity {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            kind,
            message,
            shown_at: Local::now(),
            created: Instant::now(),
        });
    }

    /// Drop toasts that have outlived their lifetime
    pub fn prune(&mut self) {
        let lifetime = self.lifetime;
        self.toasts.retain(|toast| toast.age() < lifetime);
    }

    /// Toasts still within their lifetime, oldest first
    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        let lifetime = self.lifetime;
        self.toasts.iter().filter(move |toast| toast.age() < lifetime)
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.active().last()
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_keep_kind_and_order() {
        let mut toasts = Notifications::default();
        toasts.success("connected");
        toasts.error("failed");
        let kinds: Vec<_> = toasts.active().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error]);
        assert_eq!(toasts.latest().unwrap().message, "failed");
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut toasts = Notifications::new(Duration::from_secs(60), 2);
        toasts.success("one");
        toasts.success("two");
        toasts.success("three");
        let messages: Vec<_> = toasts.active().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn expired_toasts_are_hidden_and_pruned() {
        let mut toasts = Notifications::new(Duration::ZERO, 4);
        toasts.error("gone");
        assert!(toasts.is_empty());
        toasts.prune();
        assert_eq!(toasts.toasts.len(), 0);
    }
}
