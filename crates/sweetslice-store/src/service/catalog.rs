//! # Catalog Service
//!
//! Product CRUD and search over the store.
//!
//! ## No Aliasing
//! Every read hands out a snapshot *copy*; callers never hold references into
//! the store's own collections. Edits go through [`ProductPatch`], an
//! explicit field-level patch applied under the store lock, which returns the
//! fresh post-edit snapshot. There is no "mutate a shared object, then flush"
//! path.
//!
//! ## Search
//! `search` is a deliberate linear scan: case-insensitive substring match on
//! name OR description, intersected with an exact case-insensitive category
//! match when a category is given. At single-store catalog sizes an index
//! would be over-engineering.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::Store;
use sweetslice_core::validation::{validate_price, validate_product_name};
use sweetslice_core::{CoreError, Money, Product};

// =============================================================================
// Product Patch
// =============================================================================

/// Field-level edit to a product. `None` leaves the field untouched.
///
/// ## Example
/// ```rust,ignore
/// // Re-price the cake, leave everything else alone.
/// catalog.update_product(id, ProductPatch {
///     price: Some(Money::from_cents(2700)),
///     ..ProductPatch::default()
/// })?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<u32>,
    pub category: Option<String>,
}

impl ProductPatch {
    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
    }
}

// =============================================================================
// Catalog Service
// =============================================================================

/// Product CRUD and search.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<Store>,
}

impl CatalogService {
    /// Creates a new CatalogService over an injected store.
    pub fn new(store: Arc<Store>) -> Self {
        CatalogService { store }
    }

    /// Returns a snapshot copy of all products.
    ///
    /// The copy is stable: later catalog mutations are not observable
    /// through a list obtained earlier.
    pub fn list_all(&self) -> Vec<Product> {
        self.store.read(|snap| snap.products.clone())
    }

    /// Creates a product and persists it.
    ///
    /// ## Errors
    /// `Validation` for an empty name or a negative price. Stock is a `u32`,
    /// so a negative stock is rejected by the type system at the same
    /// boundary. Nothing is silently clamped.
    pub fn add_product(
        &self,
        name: &str,
        description: &str,
        price: Money,
        stock: u32,
        category: &str,
    ) -> StoreResult<Product> {
        validate_product_name(name)?;
        validate_price(price)?;

        let product = Product::new(name.trim(), description, price, stock, category);
        let created = self.store.commit(move |snap| {
            snap.products.push(product.clone());
            Ok(product)
        })?;

        info!(product_id = %created.id, name = %created.name, "Product added");
        Ok(created)
    }

    /// Applies a field-level patch and persists, returning the fresh product.
    ///
    /// ## Errors
    /// - `ProductNotFound` if the id is unknown
    /// - `Validation` if the patch carries an empty name or negative price
    pub fn update_product(&self, id: Uuid, patch: ProductPatch) -> StoreResult<Product> {
        if let Some(name) = &patch.name {
            validate_product_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        let updated = self.store.commit(move |snap| {
            let product = snap
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

            patch.apply(product);
            Ok(product.clone())
        })?;

        info!(product_id = %updated.id, name = %updated.name, "Product updated");
        Ok(updated)
    }

    /// Removes a product by id and persists. No-op if the id is unknown.
    ///
    /// Existing orders referencing the product stay valid; their items
    /// snapshot the display fields.
    pub fn remove_product(&self, id: Uuid) -> StoreResult<()> {
        self.store.commit(|snap| {
            let before = snap.products.len();
            snap.products.retain(|p| p.id != id);
            if snap.products.len() < before {
                debug!(product_id = %id, "Product removed");
            }
            Ok(())
        })
    }

    /// Looks up a product by id.
    pub fn find_by_id(&self, id: Uuid) -> Option<Product> {
        self.store
            .read(|snap| snap.products.iter().find(|p| p.id == id).cloned())
    }

    /// Searches the catalog.
    ///
    /// ## Matching Rules
    /// - empty query matches all products
    /// - otherwise: case-insensitive substring on name OR description
    /// - non-empty `category`: additionally require an exact
    ///   case-insensitive category match
    pub fn search(&self, query: &str, category: &str) -> Vec<Product> {
        let query = query.trim().to_lowercase();
        let category = category.trim();

        self.store.read(|snap| {
            snap.products
                .iter()
                .filter(|p| {
                    let text_ok = query.is_empty()
                        || p.name.to_lowercase().contains(&query)
                        || p.description.to_lowercase().contains(&query);
                    let cat_ok =
                        category.is_empty() || p.category.eq_ignore_ascii_case(category);
                    text_ok && cat_ok
                })
                .cloned()
                .collect()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
