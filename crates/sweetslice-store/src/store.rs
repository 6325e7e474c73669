//! # The Store
//!
//! The single source of truth for users, products and orders.
//!
//! ## Locking Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Mutate-then-persist under ONE lock                     │
//! │                                                                         │
//! │  Thread A: place_order(cake × 5)      Thread B: place_order(cake × 20) │
//! │       │                                    │                            │
//! │       ▼                                    │                            │
//! │  ┌── lock ──────────────────────────┐      │ (blocked)                  │
//! │  │ validate all items               │      │                            │
//! │  │ decrement stocks                 │      │                            │
//! │  │ append order                     │      │                            │
//! │  │ save snapshot to disk            │      │                            │
//! │  └── unlock ────────────────────────┘      ▼                            │
//! │                                       validates against the REAL       │
//! │                                       post-commit stock level          │
//! │                                                                         │
//! │  Holding the lock across the durable write closes the check-then-act   │
//! │  race AND serializes saves (no torn snapshot from concurrent writers). │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! The store is explicitly constructed at the composition root and injected
//! into each service; nothing here is a process-wide singleton. `open` either
//! loads the prior snapshot or seeds and persists the default fixture.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, info};

use crate::error::StoreResult;
use crate::snapshot::{self, Snapshot};
use sweetslice_core::CoreError;

// =============================================================================
// Store
// =============================================================================

/// Durable, lock-guarded entity store.
///
/// ## Thread Safety
/// Uses `Mutex<Snapshot>` because every mutating operation must pair its
/// in-memory change with a full-snapshot write, and both must happen inside
/// one mutual-exclusion scope. Operations are short and local (no network
/// I/O), so a plain mutex is sufficient; nothing blocks indefinitely.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    inner: Mutex<Snapshot>,
}

impl Store {
    /// Opens the store at `path`: load the prior snapshot, or seed and
    /// persist the default fixture when no usable snapshot exists.
    ///
    /// Load failure of any kind (missing file, corrupt data) is non-fatal and
    /// treated as "no prior state".
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let inner = match snapshot::load(&path) {
            Some(snap) => {
                info!(
                    path = %path.display(),
                    users = snap.users.len(),
                    products = snap.products.len(),
                    orders = snap.orders.len(),
                    "Store loaded from snapshot"
                );
                snap
            }
            None => {
                let snap = crate::seed::default_snapshot()?;
                snapshot::save(&path, &snap)?;
                info!(path = %path.display(), "Store seeded with default fixture");
                snap
            }
        };

        Ok(Store {
            path,
            inner: Mutex::new(inner),
        })
    }

    /// Creates an in-memory store from an explicit snapshot, persisted to
    /// `path` on the first commit. Test seam; `open` is the production path.
    #[cfg(test)]
    pub(crate) fn with_snapshot(path: impl Into<PathBuf>, snap: Snapshot) -> Self {
        Store {
            path: path.into(),
            inner: Mutex::new(snap),
        }
    }

    /// Returns the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquires the lock, recovering from poisoning.
    ///
    /// A panic inside a caller's closure poisons the mutex, but the snapshot
    /// it guards is never left half-mutated: `commit` mutates a working copy
    /// and swaps it in only on success, and `read` closures cannot mutate at
    /// all. The guard is therefore safe to take back rather than cascading
    /// the panic into every later store call.
    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a read-only closure against the locked snapshot.
    ///
    /// Callers must copy out what they need; services hand out snapshot
    /// copies, never references into the store.
    pub fn read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        let guard = self.lock();
        f(&guard)
    }

    /// Runs a mutating closure and persists the result, all under one lock.
    ///
    /// ## All-or-nothing
    /// The closure mutates a working copy; the store's own state is replaced
    /// only after the durable write succeeds:
    /// - closure returns `Err` (or panics) → store untouched, nothing written
    /// - snapshot write fails → store untouched, error surfaced
    ///
    /// Memory and disk therefore never diverge permanently, and a caller
    /// seeing an error knows the operation had no effect.
    pub fn commit<R>(
        &self,
        f: impl FnOnce(&mut Snapshot) -> Result<R, CoreError>,
    ) -> StoreResult<R> {
        let mut guard = self.lock();

        let mut working = guard.clone();
        let out = f(&mut working)?;

        if let Err(e) = snapshot::save(&self.path, &working) {
            error!(path = %self.path.display(), error = %e, "Snapshot save failed, commit discarded");
            return Err(e);
        }

        *guard = working;
        Ok(out)
    }

    /// Persists the current state unconditionally (shutdown flush).
    pub fn flush(&self) -> StoreResult<()> {
        let guard = self.lock();
        snapshot::save(&self.path, &guard)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sweetslice_core::{Money, Product};

    fn cake() -> Product {
        Product::new(
            "Chocolate Cake",
            "Delicious dark chocolate cake (8 inch)",
            Money::from_cents(2500),
            15,
            "Cakes",
        )
    }

    #[test]
    fn test_open_seeds_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = Store::open(&path).unwrap();

        assert!(path.exists(), "seed must be persisted immediately");
        store.read(|s| {
            assert_eq!(s.users.len(), 2);
            assert_eq!(s.products.len(), 8);
            assert!(s.orders.is_empty());
        });
    }

    #[test]
    fn test_open_loads_prior_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = Store::open(&path).unwrap();
        let id = store
            .commit(|s| {
                let p = cake();
                let id = p.id;
                s.products.push(p);
                Ok(id)
            })
            .unwrap();

        let reopened = Store::open(&path).unwrap();
        reopened.read(|s| {
            assert!(s.products.iter().any(|p| p.id == id));
        });
    }

    #[test]
    fn test_open_reseeds_on_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"garbage").unwrap();

        let store = Store::open(&path).unwrap();
        store.read(|s| assert_eq!(s.products.len(), 8));
    }

    #[test]
    fn test_commit_error_restores_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::with_snapshot(dir.path().join("store.json"), Snapshot::default());

        let result: StoreResult<()> = store.commit(|s| {
            s.products.push(cake()); // mutate, then fail
            Err(CoreError::InvalidCredentials)
        });

        assert!(result.is_err());
        store.read(|s| assert!(s.products.is_empty()));
    }

    #[test]
    fn test_store_usable_after_panicked_closure() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("store.json")).unwrap();

        std::thread::scope(|scope| {
            let handle = scope.spawn(|| {
                store.commit::<()>(|s| {
                    s.products.clear(); // half-done work that must not land
                    panic!("boom");
                })
            });
            assert!(handle.join().is_err());
        });

        // The poisoned lock is recovered and the pre-panic state is intact.
        store.read(|s| assert_eq!(s.products.len(), 8));
        store
            .commit(|s| {
                s.products.push(cake());
                Ok(())
            })
            .unwrap();
        store.read(|s| assert_eq!(s.products.len(), 9));
    }

    #[test]
    fn test_commit_save_failure_restores_state() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the snapshot path makes the rename fail.
        let path = dir.path().join("store.json");
        std::fs::create_dir(&path).unwrap();

        let store = Store::with_snapshot(&path, Snapshot::default());
        let result = store.commit(|s| {
            s.products.push(cake());
            Ok(())
        });

        assert!(result.is_err());
        store.read(|s| assert!(s.products.is_empty(), "failed save must roll back memory"));
    }
}
