//! Live reload: watch the catalog file and report debounced changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use eframe::egui;
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

const DEBOUNCE: Duration = Duration::from_millis(300);

pub struct CatalogWatcher {
    path: PathBuf,
    rx: mpsc::Receiver<Vec<PathBuf>>,
    // Dropping the debouncer stops the watch.
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl CatalogWatcher {
    /// Watch `path`. Editors often replace files instead of writing them in place, so the
    /// parent directory is watched and events are filtered by file name.
    pub fn new(path: &Path, ctx: &egui::Context) -> Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Cannot watch {}", path.display()))?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = mpsc::channel();
        let repaint = ctx.clone();
        let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let paths: Vec<PathBuf> = events.into_iter().map(|e| e.path).collect();
                    if tx.send(paths).is_ok() {
                        repaint.request_repaint();
                    }
                }
                Err(e) => log::warn!("File watcher error: {e:?}"),
            }
        })
        .context("Failed to start file watcher")?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Cannot watch {}", dir.display()))?;

        log::info!("Watching {} for changes", path.display());
        Ok(Self {
            path,
            rx,
            _debouncer: debouncer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events. True if any of them touched the catalog file.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while let Ok(paths) = self.rx.try_recv() {
            changed |= paths.iter().any(|p| touches(&self.path, p));
        }
        changed
    }
}

fn touches(watched: &Path, event_path: &Path) -> bool {
    event_path == watched || event_path.file_name() == watched.file_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_matches_by_name() {
        let watched = Path::new("/decks/product-line.yaml");
        assert!(touches(watched, Path::new("/decks/product-line.yaml")));
        assert!(touches(watched, Path::new("/private/decks/product-line.yaml")));
        assert!(!touches(watched, Path::new("/decks/other.yaml")));
    }

    #[test]
    fn test_missing_file_cannot_be_watched() {
        let ctx = egui::Context::default();
        assert!(CatalogWatcher::new(Path::new("/nonexistent/deck.yaml"), &ctx).is_err());
    }
}
