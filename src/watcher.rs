use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::diff::diff;
use crate::error::WatchError;
use crate::events::ChangeEvent;
use crate::filter::PatternSet;
use crate::snapshot::Snapshot;

/// Drives repeated snapshot-and-diff passes over one directory.
///
/// The watcher owns the previous snapshot; each [`tick`](Self::tick) captures
/// a fresh one, diffs the pair, and installs the new snapshot as the next
/// baseline. The first tick reports every matched file as created, since each
/// run starts from an empty baseline.
#[derive(Debug)]
pub struct PollWatcher {
    root: PathBuf,
    patterns: PatternSet,
    previous: Snapshot,
}

impl PollWatcher {
    pub fn new<P: AsRef<Path>>(root: P, patterns: PatternSet) -> Result<Self, WatchError> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            return Err(WatchError::invalid_root(&root, "path does not exist"));
        }
        if !root.is_dir() {
            return Err(WatchError::invalid_root(&root, "path is not a directory"));
        }

        Ok(Self {
            root,
            patterns,
            previous: Snapshot::empty(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs one poll cycle and returns the observed changes.
    pub fn tick(&mut self) -> Result<Vec<ChangeEvent>, WatchError> {
        let current = Snapshot::capture(&self.root, &self.patterns)?;
        let events = diff(&self.previous, &current);
        self.previous = current;
        Ok(events)
    }

    /// Polls until `running` clears, sleeping `interval` between cycles and
    /// handing each event to `render`.
    ///
    /// Cycle failures are logged and the loop keeps going; the root was
    /// validated at construction, so a failing cycle here is transient
    /// filesystem trouble rather than bad input.
    pub fn run<F>(&mut self, interval: Duration, running: Arc<AtomicBool>, mut render: F)
    where
        F: FnMut(&ChangeEvent),
    {
        tracing::info!(
            "Polling {} every {}ms",
            self.root.display(),
            interval.as_millis()
        );

        while running.load(Ordering::SeqCst) {
            match self.tick() {
                Ok(events) => {
                    for event in &events {
                        render(event);
                    }
                }
                Err(err) => {
                    tracing::warn!("Poll cycle failed: {}", err);
                }
            }

            sleep_while_running(interval, &running);
        }

        tracing::info!("Stopped polling {}", self.root.display());
    }
}

// Sleep in short slices so Ctrl+C takes effect promptly even with long
// polling intervals.
fn sleep_while_running(interval: Duration, running: &AtomicBool) {
    let slice = Duration::from_millis(100);
    let mut remaining = interval;

    while !remaining.is_zero() && running.load(Ordering::SeqCst) {
        let step = remaining.min(slice);
        thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChangeKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_first_tick_reports_existing_files_as_created() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("preexisting.txt"), "here").unwrap();

        let mut watcher = PollWatcher::new(temp_dir.path(), PatternSet::match_all()).unwrap();
        let events = watcher.tick().unwrap();

        assert_eq!(
            events,
            vec![ChangeEvent::new(ChangeKind::Created, "preexisting.txt")]
        );
    }

    #[test]
    fn test_quiet_tick_reports_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("stable.txt"), "unchanged").unwrap();

        let mut watcher = PollWatcher::new(temp_dir.path(), PatternSet::match_all()).unwrap();
        watcher.tick().unwrap();

        assert!(watcher.tick().unwrap().is_empty());
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err =
            PollWatcher::new(temp_dir.path().join("absent"), PatternSet::match_all()).unwrap_err();
        assert!(matches!(err, WatchError::InvalidRoot { .. }));
    }
}
