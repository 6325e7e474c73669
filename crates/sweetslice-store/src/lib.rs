//! # sweetslice-store: Persistence and Services for Sweet Slice
//!
//! This crate provides durable state for the Sweet Slice retail backend. The
//! entire store (users, products, orders) lives in memory and is persisted as
//! one JSON snapshot file after every mutating operation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sweet Slice Data Flow                              │
//! │                                                                         │
//! │  Presentation layer (out of tree)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  sweetslice-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │   Services    │    │   Snapshot   │  │   │
//! │  │   │  (store.rs)   │    │ (service/*)   │    │ (snapshot.rs)│  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Mutex guard   │◄───│ Catalog       │    │ JSON load    │  │   │
//! │  │   │ seed-or-load  │    │ Orders        │───►│ atomic save  │  │   │
//! │  │   │ commit+save   │    │ Auth          │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Snapshot file (store.json)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The dependency-injected store with its locking discipline
//! - [`snapshot`] - On-disk format, load-or-absent, atomic save
//! - [`seed`] - Deterministic first-run fixture
//! - [`error`] - Store error types
//! - [`service`] - Catalog, order and auth services
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sweetslice_store::{Store, service::{AuthService, CatalogService, OrderService}};
//!
//! // Composition root: open (seed-or-load) once, inject everywhere.
//! let store = Arc::new(Store::open("store.json")?);
//! let catalog = CatalogService::new(Arc::clone(&store));
//! let orders = OrderService::new(Arc::clone(&store));
//! let auth = AuthService::new(Arc::clone(&store));
//!
//! let user = auth.login("ali@example.com", "pass")?;
//! let order = orders.place_order(&user, cart.items())?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod seed;
pub mod service;
pub mod snapshot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use snapshot::Snapshot;
pub use store::Store;

// Service re-exports for convenience
pub use service::auth::AuthService;
pub use service::catalog::{CatalogService, ProductPatch};
pub use service::orders::OrderService;
