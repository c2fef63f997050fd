use crate::sources::traits::NavigationSink;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;
use tracing::info;

/// Route transition requested by a submitted form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub path: String,
    /// Encoded query string, without the leading `?`
    pub query: String,
}

impl Navigation {
    /// Path with the query appended, e.g. `/search?location=barcelona`
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target())
    }
}

/// Navigation sink that keeps every target in memory
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.visited.lock().ok()?.last().cloned()
    }

    pub fn visited(&self) -> Vec<Navigation> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }
}

impl NavigationSink for RecordingNavigator {
    fn navigate(&self, target: &Navigation) -> Result<()> {
        info!("Navigating to {}", target);
        self.visited
            .lock()
            .map_err(|_| anyhow!("Navigation history lock poisoned"))?
            .push(target.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_appends_query() {
        let nav = Navigation {
            path: "/search".to_string(),
            query: "location=seoul".to_string(),
        };
        assert_eq!(nav.target(), "/search?location=seoul");

        let bare = Navigation {
            path: "/search".to_string(),
            query: String::new(),
        };
        assert_eq!(bare.to_string(), "/search");
    }

    #[test]
    fn recorder_keeps_history() {
        let navigator = RecordingNavigator::new();
        assert!(navigator.last().is_none());

        for query in ["a=1", "a=2"] {
            navigator
                .navigate(&Navigation {
                    path: "/search".to_string(),
                    query: query.to_string(),
                })
                .unwrap();
        }

        assert_eq!(navigator.visited().len(), 2);
        assert_eq!(navigator.last().unwrap().query, "a=2");
    }
}
