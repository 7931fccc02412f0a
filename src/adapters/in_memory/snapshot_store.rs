use crate::ports::snapshot_store::{Result, Snapshot, SnapshotStore as SnapshotStoreTrait};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory implementation of SnapshotStore
///
/// Holds the last saved snapshot. Starts empty (first run) unless
/// built with `with_snapshot`. Saves can be made to fail for testing.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshot: Mutex<Option<Snapshot>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds a snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// The last saved snapshot
    pub fn last_saved(&self) -> Option<Snapshot> {
        self.snapshot.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SnapshotStoreTrait for SnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| "snapshot lock poisoned")?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err("simulated save failure".into());
        }
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| "snapshot lock poisoned")?;
        *guard = Some(snapshot.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
