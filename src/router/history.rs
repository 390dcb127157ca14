//! Navigation History
//!
//! The navigable history is process-wide mutable state, so mutation is kept
//! behind a single-writer lock and separate from pure route resolution.
//! [`History`] abstracts the entry stack (in the browser this is the
//! History API); [`MemoryHistory`] is the in-process implementation used by
//! the shell and by tests.

use std::sync::Mutex;

use super::{ResolvedRoute, RouteError, Router};

/// Whether a navigation adds an entry or rewrites the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    Push,
    Replace,
}

/// The navigable-entry stack mutated on successful navigation
pub trait History: Send {
    /// Add a new entry on top of the stack
    fn push(&mut self, path: &str);

    /// Rewrite the current entry without growing the stack
    fn replace(&mut self, path: &str);

    /// The current entry, if any navigation has happened
    fn current(&self) -> Option<&str>;
}

/// Vec-backed [`History`] implementation
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl History for MemoryHistory {
    fn push(&mut self, path: &str) {
        self.entries.push(path.to_string());
    }

    fn replace(&mut self, path: &str) {
        match self.entries.last_mut() {
            Some(last) => *last = path.to_string(),
            None => self.entries.push(path.to_string()),
        }
    }

    fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

/// Couples a [`Router`] with a history backend.
///
/// Resolution happens first; history is mutated only on success, and never
/// on [`RouteError::NoMatch`]. The lock serializes writers, since only one
/// navigation may mutate history state at a time.
pub struct Navigator {
    router: Router,
    history: Mutex<Box<dyn History>>,
}

impl Navigator {
    pub fn new(router: Router, history: impl History + 'static) -> Self {
        Self {
            router,
            history: Mutex::new(Box::new(history)),
        }
    }

    /// Resolve `path` and, on success, record it in history
    pub fn navigate(&self, path: &str, mode: NavigationMode) -> Result<ResolvedRoute, RouteError> {
        let resolved = self.router.resolve(path)?;

        let mut history = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match mode {
            NavigationMode::Push => history.push(path),
            NavigationMode::Replace => history.replace(path),
        }

        tracing::debug!(path = %path, view = %resolved.view, ?mode, "navigated");
        Ok(resolved)
    }

    /// The current history entry
    pub fn current(&self) -> Option<String> {
        let history = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        history.current().map(str::to_string)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::ViewId;

    fn navigator() -> Navigator {
        Navigator::new(Router::with_default_routes(), MemoryHistory::new())
    }

    #[test]
    fn test_push_records_each_entry() {
        let mut history = MemoryHistory::new();
        history.push("/");
        history.push("/query");
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some("/query"));
    }

    #[test]
    fn test_replace_rewrites_current_entry() {
        let mut history = MemoryHistory::new();
        history.push("/");
        history.replace("/manage");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some("/manage"));
    }

    #[test]
    fn test_replace_on_empty_history_creates_entry() {
        let mut history = MemoryHistory::new();
        history.replace("/");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some("/"));
    }

    #[test]
    fn test_navigate_resolves_and_pushes() {
        let nav = navigator();
        let resolved = nav.navigate("/project/42", NavigationMode::Push).unwrap();
        assert_eq!(resolved.view, ViewId::ProjectDetail);
        assert_eq!(nav.current().as_deref(), Some("/project/42"));
    }

    #[test]
    fn test_navigate_replace_does_not_grow_history() {
        let nav = navigator();
        nav.navigate("/", NavigationMode::Push).unwrap();
        nav.navigate("/query", NavigationMode::Replace).unwrap();
        assert_eq!(nav.current().as_deref(), Some("/query"));
    }

    #[test]
    fn test_no_match_leaves_history_untouched() {
        let nav = navigator();
        nav.navigate("/manage", NavigationMode::Push).unwrap();

        let err = nav
            .navigate("/does-not-exist", NavigationMode::Push)
            .unwrap_err();
        assert!(matches!(err, RouteError::NoMatch(_)));
        assert_eq!(nav.current().as_deref(), Some("/manage"));
    }
}
