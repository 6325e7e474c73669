//! # Seed Fixture
//!
//! The deterministic default dataset written on first run (or after a
//! corrupt snapshot): one admin, one customer, and the eight-product bakery
//! catalog. Tests rely on these exact price/stock/category values for
//! behavioral parity, so changes here are observable breakage.

use crate::error::StoreResult;
use crate::service::auth::hash_password;
use crate::snapshot::Snapshot;
use sweetslice_core::{Money, Product, Role, User};

/// Email/password of the default admin account.
pub const DEFAULT_ADMIN: (&str, &str) = ("admin@shop.com", "admin123");

/// Email/password of the default customer account.
pub const DEFAULT_CUSTOMER: (&str, &str) = ("ali@example.com", "pass");

/// The default catalog: (name, description, price cents, stock, category).
const DEFAULT_PRODUCTS: &[(&str, &str, i64, u32, &str)] = &[
    (
        "Chocolate Cake",
        "Delicious dark chocolate cake (8 inch)",
        2500,
        15,
        "Cakes",
    ),
    (
        "Vanilla Cupcakes (6)",
        "Soft vanilla cupcakes (pack of 6)",
        1000,
        40,
        "Cupcakes",
    ),
    ("Strawberry Tart", "Fresh strawberry tart", 1800, 10, "Tarts"),
    (
        "Red Velvet Slice",
        "Single slice of red velvet cake",
        600,
        30,
        "Slices",
    ),
    ("Lemon Cheesecake", "Creamy lemon cheesecake", 2200, 8, "Cakes"),
    (
        "Tiramisu",
        "Classic Italian coffee-flavored dessert",
        2800,
        12,
        "Cakes",
    ),
    ("Macarons (12)", "Assorted French macarons", 1500, 25, "Pastries"),
    (
        "Carrot Cake",
        "Moist carrot cake with cream cheese frosting",
        2000,
        18,
        "Cakes",
    ),
];

/// Builds the default snapshot.
///
/// Identities and credential salts are fresh per seed; every displayed field
/// (names, emails, prices, stocks, categories) is fixed.
pub fn default_snapshot() -> StoreResult<Snapshot> {
    let users = vec![
        User::new(
            "Admin",
            DEFAULT_ADMIN.0,
            hash_password(DEFAULT_ADMIN.1)?,
            Role::Admin,
        ),
        User::new(
            "Ali",
            DEFAULT_CUSTOMER.0,
            hash_password(DEFAULT_CUSTOMER.1)?,
            Role::Customer,
        ),
    ];

    let products = DEFAULT_PRODUCTS
        .iter()
        .map(|&(name, desc, cents, stock, category)| {
            Product::new(name, desc, Money::from_cents(cents), stock, category)
        })
        .collect();

    Ok(Snapshot {
        users,
        products,
        orders: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let snap = default_snapshot().unwrap();

        assert_eq!(snap.users.len(), 2);
        assert_eq!(snap.users[0].role, Role::Admin);
        assert_eq!(snap.users[0].email, "admin@shop.com");
        assert_eq!(snap.users[1].role, Role::Customer);
        assert_eq!(snap.products.len(), 8);
        assert!(snap.orders.is_empty());
    }

    #[test]
    fn test_chocolate_cake_values() {
        let snap = default_snapshot().unwrap();
        let cake = snap
            .products
            .iter()
            .find(|p| p.name == "Chocolate Cake")
            .unwrap();

        assert_eq!(cake.price, Money::from_cents(2500));
        assert_eq!(cake.stock, 15);
        assert_eq!(cake.category, "Cakes");
    }

    #[test]
    fn test_no_plaintext_passwords_in_fixture() {
        let snap = default_snapshot().unwrap();
        for user in &snap.users {
            assert!(user.password_hash.starts_with("$argon2"));
        }
    }
}
