//! End-to-end checkout flow against a real store file: seed, log in, build a
//! cart, check out, advance fulfilment, then reopen the file and verify
//! everything survived the round trip.

use std::sync::Arc;

use sweetslice_core::{Cart, Money, OrderStatus, Role};
use sweetslice_store::{AuthService, CatalogService, OrderService, Store};

fn open_services(path: &std::path::Path) -> (AuthService, CatalogService, OrderService) {
    let store = Arc::new(Store::open(path).unwrap());
    (
        AuthService::new(Arc::clone(&store)),
        CatalogService::new(Arc::clone(&store)),
        OrderService::new(store),
    )
}

#[test]
fn full_checkout_flow_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let order_id;
    let cake_id;
    {
        let (auth, catalog, orders) = open_services(&path);

        // A fresh customer signs up and shops.
        let user = auth
            .register("Sara Khan", "sara@example.com", "s3cret", Role::Customer)
            .unwrap();

        let cake = catalog
            .search("chocolate", "Cakes")
            .into_iter()
            .next()
            .expect("seeded cake present");
        let macarons = catalog
            .search("macarons", "")
            .into_iter()
            .next()
            .expect("seeded macarons present");
        cake_id = cake.id;

        let mut cart = Cart::new();
        cart.add_item(&cake, 2).unwrap();
        cart.add_item(&macarons, 1).unwrap();
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Money::from_cents(6500));

        let order = orders.place_order(&user, cart.items()).unwrap();
        order_id = order.id;
        cart.clear();

        assert_eq!(order.total, Money::from_cents(6500));
        assert_eq!(catalog.find_by_id(cake.id).unwrap().stock, 13);

        orders
            .update_order_status(order.id, OrderStatus::Shipped)
            .unwrap();
    }

    // Everything above went through the snapshot file; a brand new process
    // opening the same path must see it all.
    let (auth, catalog, orders) = open_services(&path);

    let user = auth.login("sara@example.com", "s3cret").unwrap();
    assert_eq!(user.name, "Sara Khan");

    assert_eq!(catalog.find_by_id(cake_id).unwrap().stock, 13);

    let history = orders.orders_for_user(user.id);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, order_id);
    assert_eq!(history[0].status, OrderStatus::Shipped);
    assert_eq!(history[0].total, Money::from_cents(6500));
    assert_eq!(history[0].items.len(), 2);
}

#[test]
fn seeded_admin_can_manage_orders() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, catalog, orders) = open_services(&dir.path().join("store.json"));

    let admin = auth.login("admin@shop.com", "admin123").unwrap();
    assert_eq!(admin.role, Role::Admin);

    let customer = auth.login("ali@example.com", "pass").unwrap();
    let tart = catalog.search("tart", "").into_iter().next().unwrap();

    let mut cart = Cart::new();
    cart.add_item(&tart, 2).unwrap();
    let order = orders.place_order(&customer, cart.items()).unwrap();

    // Admin sees every order and drives fulfilment.
    let all = orders.all_orders();
    assert_eq!(all.len(), 1);
    orders
        .update_order_status(order.id, OrderStatus::Delivered)
        .unwrap();
    assert_eq!(
        orders.orders_for_user(customer.id)[0].status,
        OrderStatus::Delivered
    );
}
