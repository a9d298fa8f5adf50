//! Toast notifications surfaced to the user.
//!
//! Errors caught at the editor boundary (rejected connections, malformed
//! imports, failed saves) end up here instead of propagating. The host UI
//! reads [`ToastManager::toasts`] to render them and calls
//! [`ToastManager::prune_expired`] once per frame.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastVariant {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastVariant {
    pub fn default_duration(self) -> Duration {
        match self {
            ToastVariant::Success | ToastVariant::Info => Duration::from_secs(3),
            ToastVariant::Warning => Duration::from_secs(4),
            ToastVariant::Error => Duration::from_secs(5),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastVariant::Success => "✓",
            ToastVariant::Info => "ℹ",
            ToastVariant::Warning => "⚠",
            ToastVariant::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub variant: ToastVariant,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            id: 0,
            message: message.into(),
            variant,
            created_at: Instant::now(),
            duration: variant.default_duration(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Error)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Fraction of the display time left, from 1.0 down to 0.0.
    pub fn remaining_percent(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let elapsed = self.created_at.elapsed().as_secs_f32();
        (1.0 - elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Ordered queue of live toasts; ids are assigned on push.
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id assigned to the toast.
    pub fn push(&mut self, mut toast: Toast) -> u64 {
        self.next_id += 1;
        toast.id = self.next_id;
        self.toasts.push(toast);
        self.next_id
    }

    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn count(&self) -> usize {
        self.toasts.len()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Drop expired toasts. Returns true if any were removed.
    pub fn prune_expired(&mut self) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired());
        self.toasts.len() != before
    }
}
