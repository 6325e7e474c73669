//! # Shopping Cart
//!
//! The per-session cart. Cart lifetime equals session lifetime: it is built
//! up in memory, consumed at checkout, and never persisted.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Pick product ───────────► add_item() ─────────► merge or push line    │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ─────► qty 0 removes line    │
//! │                                                                         │
//! │  Remove line ────────────► remove_item() ──────► line dropped          │
//! │                                                                         │
//! │  Logout / checkout done ─► clear() ────────────► empty cart            │
//! │                                                                         │
//! │  NOTE: The cart performs NO stock validation. A cart may hold more     │
//! │        of an item than is in stock; the order service at checkout is   │
//! │        the sole enforcement point.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The cart is exclusively owned by one session and is never shared across
//! threads, so it carries no lock of its own.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the shopping cart.
///
/// ## Price Snapshot
/// `name` and `unit_price` are frozen copies taken when the product was
/// added. Later catalog edits do not re-price lines already in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Weak reference to the product (looked up at checkout, not owned).
    pub product_id: Uuid,

    /// Product name at add time (frozen).
    pub name: String,

    /// Unit price at add time (frozen).
    pub unit_price: Money,

    /// Quantity in cart, always >= 1.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new cart line from a product and quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        CartItem {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Returns the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges by
///   summing quantities rather than creating a duplicate line)
/// - Line quantity is always >= 1; setting a quantity to 0 removes the line
/// - Insertion order is preserved for display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart or merges into the existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantities are summed
    /// - Otherwise: a new line is appended, snapshotting the product's
    ///   *current* name and price
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), ValidationError> {
        validate_quantity(quantity)?;

        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product.id) {
            let merged = line.quantity.saturating_add(quantity);
            if merged > MAX_ITEM_QUANTITY {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: MAX_ITEM_QUANTITY as i64,
                });
            }
            line.quantity = merged;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "cart items".to_string(),
                min: 0,
                max: MAX_CART_ITEMS as i64,
            });
        }

        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Unknown product id is a no-op (line already gone)
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: u32) -> Result<(), ValidationError> {
        if quantity == 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        validate_quantity(quantity)?;

        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line by product id. No-op if absent.
    pub fn remove_item(&mut self, product_id: Uuid) {
        self.items.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines (logout, or after a successful checkout).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the total quantity across all lines.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Returns the cart total (sum of line totals).
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
