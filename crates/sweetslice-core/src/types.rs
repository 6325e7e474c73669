//! # Domain Types
//!
//! Core domain types used throughout Sweet Slice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     Product     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  email (unique) │   │  price (Money)  │   │  user_id (weak) │       │
//! │  │  password_hash  │   │  stock (u32)    │   │  items, total   │       │
//! │  │  role           │   │  category       │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Role       │   │   OrderStatus   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Admin          │   │  Pending        │                             │
//! │  │  Customer       │   │  Shipped        │                             │
//! │  └─────────────────┘   │  Delivered      │                             │
//! │                        │  Cancelled      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Weak References
//! `Order.user_id` and `OrderItem.product_id` are identity-only references,
//! never owning pointers. An order stays valid and readable after its product
//! or user is removed, because `OrderItem` snapshots the display fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages the catalog and all orders.
    Admin,
    /// Browses the catalog and places orders.
    Customer,
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// ## Invariants
/// - `email` is stored lowercase and is unique case-insensitively across all
///   users (enforced by the auth service at registration)
/// - Users are never deleted; only name/role/password change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID v4), immutable.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Lowercased email, the login identity.
    pub email: String,

    /// Credential hash (argon2 PHC string, produced by the auth service).
    pub password_hash: String,

    /// Account role.
    pub role: Role,
}

impl User {
    /// Creates a new user with a fresh identity.
    ///
    /// The email is lowercased here so uniqueness checks and login scans can
    /// compare directly. `password_hash` must already be hashed; this crate
    /// never sees plaintext credentials.
    pub fn new(name: impl Into<String>, email: &str, password_hash: String, role: Role) -> Self {
        User {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.to_lowercase(),
            password_hash,
            role,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// ## Invariants
/// - `stock` never goes negative: it is a `u32` and every decrement is
///   validated against the current level before it is applied
/// - `price` is non-negative (validated at the catalog boundary)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4), immutable.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Free-text description, searched together with the name.
    pub description: String,

    /// Current unit price. Carts and orders snapshot this at add time.
    pub price: Money,

    /// Units on hand.
    pub stock: u32,

    /// Free-text category (e.g. "Cakes").
    pub category: String,
}

impl Product {
    /// Creates a new product with a fresh identity.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        stock: u32,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            price,
            stock,
            category: category.into(),
        }
    }

    /// Checks whether `quantity` units can currently be fulfilled.
    #[inline]
    pub fn can_fulfill(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a placed order.
///
/// The intended lifecycle is Pending → Shipped → Delivered, with
/// Pending → Cancelled as the terminal branch. Transitions are not enforced
/// by a table; see the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, stock reserved.
    Pending,
    /// Order handed to delivery.
    Shipped,
    /// Order received by the customer.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Terminal states have no intended outgoing transition.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses the snapshot pattern to freeze product data at placement time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Weak reference to the product; resolved by lookup, never owned.
    pub product_id: Uuid,

    /// Product name at placement time (frozen).
    pub name: String,

    /// Unit price at placement time (frozen).
    pub unit_price: Money,

    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    /// Returns the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// ## Invariants
/// - `items` and `total` are immutable after creation; only `status` changes
/// - `total` equals the sum of line totals captured at creation and is never
///   recomputed, so later product price edits cannot alter it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4), immutable.
    pub id: Uuid,

    /// Weak reference to the owning user.
    pub user_id: Uuid,

    /// Placement timestamp.
    pub created_at: DateTime<Utc>,

    /// Immutable ordered line items.
    pub items: Vec<OrderItem>,

    /// Grand total, fixed at creation.
    pub total: Money,

    /// Lifecycle status, the only mutable field.
    pub status: OrderStatus,
}

impl Order {
    /// Constructs an order from already-validated items.
    ///
    /// The total is computed exactly once, here. Callers (the order service)
    /// are responsible for stock validation before construction.
    pub fn new(user_id: Uuid, items: Vec<OrderItem>) -> Self {
        let total = items.iter().map(OrderItem::line_total).sum();
        Order {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
            items,
            total,
            status: OrderStatus::Pending,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price_cents: i64, qty: u32) -> OrderItem {
        OrderItem {
            product_id: Uuid::new_v4(),
            name: "Test".to_string(),
            unit_price: Money::from_cents(price_cents),
            quantity: qty,
        }
    }

    #[test]
    fn test_user_email_lowercased() {
        let u = User::new("Ali", "Ali@Example.COM", "hash".to_string(), Role::Customer);
        assert_eq!(u.email, "ali@example.com");
    }

    #[test]
    fn test_order_total_fixed_at_creation() {
        let order = Order::new(Uuid::new_v4(), vec![item(2500, 5), item(600, 2)]);
        assert_eq!(order.total.cents(), 12500 + 1200);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_order_total_of_empty_order_is_zero() {
        let order = Order::new(Uuid::new_v4(), Vec::new());
        assert!(order.total.is_zero());
    }

    #[test]
    fn test_can_fulfill() {
        let p = Product::new("Tiramisu", "dessert", Money::from_cents(2800), 12, "Cakes");
        assert!(p.can_fulfill(12));
        assert!(!p.can_fulfill(13));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }
}
