//! Navigation collaborator

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A navigation request issued by a route gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub to: String,
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
    /// Location the navigation originated from, if carried
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl Navigation {
    pub fn push(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: false,
            from: None,
        }
    }

    pub fn replace(to: impl Into<String>) -> Self {
        Self {
            replace: true,
            ..Self::push(to)
        }
    }

    pub fn from_location(mut self, from: Option<impl Into<String>>) -> Self {
        self.from = from.map(Into::into);
        self
    }
}

/// Performs navigations on behalf of the access layer
pub trait Navigator: Send + Sync {
    fn navigate(&self, navigation: Navigation);
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    log: Vec<Navigation>,
}

/// In-memory history stack
#[derive(Debug)]
pub struct MemoryHistory {
    inner: Mutex<History>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(History {
                entries: vec![initial.into()],
                log: Vec::new(),
            }),
        }
    }

    pub fn current(&self) -> String {
        self.inner
            .lock()
            .entries
            .last()
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn push(&self, to: impl Into<String>) {
        self.navigate(Navigation::push(to));
    }

    /// Pop the current entry; the first entry is never popped
    pub fn back(&self) -> Option<String> {
        let mut inner = self.inner.lock();
        if inner.entries.len() > 1 {
            inner.entries.pop();
        }
        inner.entries.last().cloned()
    }

    /// Every navigation received, oldest first
    pub fn navigations(&self) -> Vec<Navigation> {
        self.inner.lock().log.clone()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryHistory {
    fn navigate(&self, navigation: Navigation) {
        let mut inner = self.inner.lock();
        if navigation.replace {
            inner.entries.pop();
        }
        inner.entries.push(navigation.to.clone());
        inner.log.push(navigation);
    }
}
