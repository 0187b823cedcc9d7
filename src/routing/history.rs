//! Session history: push, replace, back and forward.
//!
//! Entries hold final locations, so a redirect is never stored; going back
//! to `/` after the initial load lands on `/scales` directly.

use std::sync::Arc;

use crate::routing::error::RoutingError;
use crate::routing::router::{Navigation, Router};
use crate::routing::view::{EagerViews, ViewLoader};

/// Browser-style history stack driving a shared [`Router`].
pub struct History<L = EagerViews> {
    router: Arc<Router<L>>,
    entries: Vec<String>,
    cursor: usize,
}

impl<L: ViewLoader> History<L> {
    pub fn new(router: Arc<Router<L>>) -> Self {
        Self {
            router,
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Navigate to `location` and record it, dropping any forward entries.
    pub async fn push(&mut self, location: &str) -> Result<Navigation, RoutingError> {
        let nav = self.router.resolve(location).await?;
        if let Navigation::Activated(active) = &nav {
            if self.current() != Some(active.full_path.as_str()) {
                if !self.entries.is_empty() {
                    self.entries.truncate(self.cursor + 1);
                }
                self.entries.push(active.full_path.clone());
                self.cursor = self.entries.len() - 1;
            }
        }
        Ok(nav)
    }

    /// Navigate to `location` and overwrite the current entry.
    pub async fn replace(&mut self, location: &str) -> Result<Navigation, RoutingError> {
        let nav = self.router.resolve(location).await?;
        if let Navigation::Activated(active) = &nav {
            match self.entries.get_mut(self.cursor) {
                Some(entry) => *entry = active.full_path.clone(),
                None => self.entries.push(active.full_path.clone()),
            }
        }
        Ok(nav)
    }

    /// Step back one entry; `None` at the start of the session.
    pub async fn back(&mut self) -> Option<Result<Navigation, RoutingError>> {
        let target = self.cursor.checked_sub(1)?;
        Some(self.go_to(target).await)
    }

    /// Step forward one entry; `None` at the end of the session.
    pub async fn forward(&mut self) -> Option<Result<Navigation, RoutingError>> {
        let target = self.cursor + 1;
        if target >= self.entries.len() {
            return None;
        }
        Some(self.go_to(target).await)
    }

    async fn go_to(&mut self, index: usize) -> Result<Navigation, RoutingError> {
        let location = self.entries[index].clone();
        let nav = self.router.resolve(&location).await?;
        if !nav.is_superseded() {
            self.cursor = index;
        }
        Ok(nav)
    }

    /// The entry the session is on.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn router(&self) -> &Arc<Router<L>> {
        &self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> History {
        History::new(Arc::new(Router::music_app()))
    }

    fn active_view(history: &History) -> String {
        history.router().active().unwrap().view.to_string()
    }

    #[tokio::test]
    async fn test_push_records_final_location() {
        let mut history = history();
        history.push("/").await.unwrap();
        history.push("/chords").await.unwrap();

        assert_eq!(history.entries(), ["/scales", "/chords"]);
        assert_eq!(history.current(), Some("/chords"));
    }

    #[tokio::test]
    async fn test_back_and_forward() {
        let mut history = history();
        history.push("/scales").await.unwrap();
        history.push("/chords").await.unwrap();
        history.push("/metronome").await.unwrap();

        history.back().await.unwrap().unwrap();
        assert_eq!(active_view(&history), "ChordsView");
        history.back().await.unwrap().unwrap();
        assert_eq!(active_view(&history), "ScalesView");
        assert!(history.back().await.is_none());

        history.forward().await.unwrap().unwrap();
        assert_eq!(active_view(&history), "ChordsView");
        assert_eq!(history.current(), Some("/chords"));
    }

    #[tokio::test]
    async fn test_push_after_back_drops_forward_entries() {
        let mut history = history();
        history.push("/scales").await.unwrap();
        history.push("/chords").await.unwrap();
        history.back().await.unwrap().unwrap();

        history.push("/progressions").await.unwrap();
        assert_eq!(history.entries(), ["/scales", "/progressions"]);
        assert!(history.forward().await.is_none());
    }

    #[tokio::test]
    async fn test_repeated_push_and_failures_leave_entries_alone() {
        let mut history = history();
        history.push("/chords").await.unwrap();
        history.push("/chords").await.unwrap();
        assert_eq!(history.entries(), ["/chords"]);

        assert!(history.push("/nope").await.is_err());
        assert_eq!(history.entries(), ["/chords"]);
        assert_eq!(active_view(&history), "ChordsView");
    }

    #[tokio::test]
    async fn test_replace_overwrites_current_entry() {
        let mut history = history();
        history.replace("/scales").await.unwrap();
        history.push("/chords").await.unwrap();
        history.replace("/metronome").await.unwrap();

        assert_eq!(history.entries(), ["/scales", "/metronome"]);
        assert_eq!(active_view(&history), "MetronomeView");
    }
}
