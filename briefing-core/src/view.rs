//! Display handles the page flows render into.
//!
//! Each flow only sees the region it writes to. Front ends implement these
//! traits for their output surface; [`MemoryText`] and [`MemoryList`] keep the
//! rendered state in memory.

use std::sync::{Mutex, PoisonError};

/// A region showing a single block of text. Every write replaces the
/// previous content.
pub trait TextRegion: Send + Sync {
    fn set_text(&self, text: &str);
}

/// A region showing a list of items. Every write replaces all items.
pub trait ListRegion: Send + Sync {
    fn replace_items(&self, items: &[String]);
}

#[derive(Debug, Default)]
pub struct MemoryText {
    history: Mutex<Vec<String>>,
}

impl MemoryText {
    /// Current content; empty if never written.
    pub fn text(&self) -> String {
        self.lock().last().cloned().unwrap_or_default()
    }

    /// Every write, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TextRegion for MemoryText {
    fn set_text(&self, text: &str) {
        self.lock().push(text.to_string());
    }
}

#[derive(Debug, Default)]
pub struct MemoryList {
    items: Mutex<Vec<String>>,
}

impl MemoryList {
    pub fn items(&self) -> Vec<String> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ListRegion for MemoryList {
    fn replace_items(&self, items: &[String]) {
        *self.items.lock().unwrap_or_else(PoisonError::into_inner) = items.to_vec();
    }
}
