//! # Services
//!
//! The mutating surface of the store, one service per concern:
//!
//! - [`catalog`] - product CRUD and search
//! - [`orders`] - checkout, order history, status lifecycle
//! - [`auth`] - registration and login
//!
//! Each service holds an `Arc<Store>` injected at construction; none of them
//! owns state of its own. All writes go through [`crate::Store::commit`], so
//! every mutation is paired with a durable snapshot write under one lock.

pub mod auth;
pub mod catalog;
pub mod orders;

pub use auth::AuthService;
pub use catalog::{CatalogService, ProductPatch};
pub use orders::OrderService;
