//! # Snapshot Persistence
//!
//! The on-disk format and its load/save primitives.
//!
//! ## Snapshot Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Persistence                                 │
//! │                                                                         │
//! │  The durable state is ONE file holding the whole object graph:         │
//! │                                                                         │
//! │    { "users": [...], "products": [...], "orders": [...] }              │
//! │                                                                         │
//! │  SAVE: full overwrite, never an incremental append                     │
//! │    1. serialize to <path>.tmp                                          │
//! │    2. rename <path>.tmp → <path>        (atomic on POSIX)              │
//! │    A crash mid-save leaves the previous snapshot intact.               │
//! │                                                                         │
//! │  LOAD: any failure is "no prior state"                                 │
//! │    missing file     → None                                             │
//! │    unreadable file  → None (logged)                                    │
//! │    corrupt JSON     → None (logged)                                    │
//! │    The caller reseeds defaults rather than erroring out.               │
//! │                                                                         │
//! │  The format is internal; cross-version compatibility is a non-goal.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreResult;
use sweetslice_core::{Order, Product, User};

// =============================================================================
// Snapshot
// =============================================================================

/// The entire durable state: every entity collection, one document.
///
/// This is the single source of truth; all services operate on it through
/// [`crate::Store`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads a snapshot, treating every failure as absence.
///
/// ## Returns
/// * `Some(Snapshot)` - prior state existed and parsed
/// * `None` - no usable prior state; the caller should seed defaults
pub fn load(path: &Path) -> Option<Snapshot> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No snapshot file, starting fresh");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Snapshot unreadable, starting fresh");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(snapshot) => {
            debug!(path = %path.display(), "Snapshot loaded");
            Some(snapshot)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Snapshot corrupt, starting fresh");
            None
        }
    }
}

/// Saves a snapshot atomically via write-temp-then-rename.
///
/// The rename replaces the previous snapshot in one step, so a failure at any
/// point leaves either the old complete snapshot or the new complete snapshot
/// on disk, never a torn one. Serializing the save calls themselves is the
/// caller's job ([`crate::Store`] holds its lock across this function).
pub fn save(path: &Path, snapshot: &Snapshot) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(snapshot)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;

    debug!(
        path = %path.display(),
        users = snapshot.users.len(),
        products = snapshot.products.len(),
        orders = snapshot.orders.len(),
        "Snapshot saved"
    );
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
