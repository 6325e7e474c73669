//! # Order Service
//!
//! Checkout and order history.
//!
//! ## Stock Atomicity
//! `place_order` is all-or-nothing. Inside a single store commit it first
//! validates every requested product against current stock, and only when
//! everything clears does it decrement any stock and append the order. A
//! failed line leaves stock and the ledger exactly as they were:
//!
//! ```text
//!   commit {
//!       aggregate: sum quantities per product id      (no writes)
//!       pass 1: every product -> exists? enough?      (no writes)
//!       pass 2: decrement stocks, append order        (writes)
//!   }
//! ```
//!
//! Quantities are summed per product id before validation, so two lines
//! naming the same product are checked as one demand. Stock can never go
//! negative: each product is decremented once, by the exact quantity that
//! was just validated, under the same lock.
//!
//! ## Price at Order Time
//! Order lines carry the unit price captured when the item entered the cart.
//! Later catalog re-pricing does not rewrite history; an order's total is
//! computed once at placement and stored.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::Store;
use sweetslice_core::error::ValidationError;
use sweetslice_core::{CartItem, CoreError, Order, OrderItem, OrderStatus, User};

// =============================================================================
// Order Service
// =============================================================================

/// Checkout, history, and fulfilment status.
#[derive(Debug, Clone)]
pub struct OrderService {
    store: Arc<Store>,
}

impl OrderService {
    /// Creates a new OrderService over an injected store.
    pub fn new(store: Arc<Store>) -> Self {
        OrderService { store }
    }

    /// Places an order for the given cart lines.
    ///
    /// ## Errors
    /// - `Validation` if `items` is empty
    /// - `ProductNotFound` if any line references a product no longer in the
    ///   catalog
    /// - `InsufficientStock` if any line asks for more than is available
    ///
    /// On any error nothing is decremented and no order is recorded.
    pub fn place_order(&self, user: &User, items: &[CartItem]) -> StoreResult<Order> {
        if items.is_empty() {
            return Err(ValidationError::Required {
                field: "items".into(),
            }
            .into());
        }

        let order_items: Vec<OrderItem> = items
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id,
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();
        let user_id = user.id;

        let order = self.store.commit(move |snap| {
            // Lines may repeat a product id; validate the summed demand.
            let mut requested: Vec<(Uuid, &str, u32)> = Vec::with_capacity(order_items.len());
            for line in &order_items {
                match requested.iter_mut().find(|(id, _, _)| *id == line.product_id) {
                    Some((_, _, total)) => *total = total.saturating_add(line.quantity),
                    None => requested.push((line.product_id, &line.name, line.quantity)),
                }
            }

            // Pass 1: validate every product before touching anything.
            for &(product_id, line_name, quantity) in &requested {
                let product = snap
                    .products
                    .iter()
                    .find(|p| p.id == product_id)
                    .ok_or_else(|| CoreError::ProductNotFound(line_name.to_string()))?;

                if !product.can_fulfill(quantity) {
                    return Err(CoreError::InsufficientStock {
                        name: product.name.clone(),
                        available: product.stock,
                        requested: quantity,
                    });
                }
            }

            // Pass 2: everything cleared; decrement once per product.
            for &(product_id, _, quantity) in &requested {
                if let Some(product) = snap.products.iter_mut().find(|p| p.id == product_id) {
                    product.stock =
                        product.stock.checked_sub(quantity).ok_or_else(|| {
                            CoreError::InsufficientStock {
                                name: product.name.clone(),
                                available: product.stock,
                                requested: quantity,
                            }
                        })?;
                }
            }

            let order = Order::new(user_id, order_items);
            snap.orders.push(order.clone());
            Ok(order)
        })?;

        info!(
            order_id = %order.id,
            user_id = %user_id,
            lines = order.items.len(),
            total = %order.total,
            "Order placed"
        );
        Ok(order)
    }

    /// Returns the orders placed by a user, in placement order.
    pub fn orders_for_user(&self, user_id: Uuid) -> Vec<Order> {
        self.store.read(|snap| {
            snap.orders
                .iter()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect()
        })
    }

    /// Returns every order in the ledger, in placement order.
    pub fn all_orders(&self) -> Vec<Order> {
        self.store.read(|snap| snap.orders.clone())
    }

    /// Sets an order's fulfilment status and persists. No-op if the id is
    /// unknown.
    ///
    /// Any transition is accepted; leaving a terminal status (Delivered or
    /// Cancelled) is logged as suspicious but not rejected.
    pub fn update_order_status(&self, order_id: Uuid, status: OrderStatus) -> StoreResult<()> {
        self.store.commit(|snap| {
            if let Some(order) = snap.orders.iter_mut().find(|o| o.id == order_id) {
                if order.status.is_terminal() && order.status != status {
                    warn!(
                        %order_id,
                        from = ?order.status,
                        to = ?status,
                        "Status change out of a terminal state"
                    );
                }
                order.status = status;
            }
            Ok(())
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
