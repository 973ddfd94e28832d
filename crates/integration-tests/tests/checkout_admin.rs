//! Checkout simulation and the admin console.

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use verde_integration_tests::{TestApp, decimal};

fn checkout_form() -> Value {
    json!({
        "email": "meera@example.com",
        "firstName": "Meera",
        "lastName": "Iyer",
        "phone": "9876543210",
        "address": "14 Residency Rd",
        "city": "Chennai",
        "state": "TN",
        "pincode": "600001",
        "paymentMethod": "upi"
    })
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/checkout", checkout_form()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_checkout_rejects_incomplete_form() {
    let app = TestApp::new();
    app.post(
        "/api/cart/items",
        json!({ "productId": "3", "size": "M", "color": "Navy" }),
    )
    .await;

    let mut form = checkout_form();
    form["city"] = json!("  ");
    let (status, body) = app.post("/api/checkout", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("city"));

    let mut form = checkout_form();
    form["email"] = json!("not-an-email");
    let (status, _) = app.post("/api/checkout", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Cart is untouched by failed attempts
    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["summary"]["itemCount"], 1);
}

#[tokio::test]
async fn test_checkout_places_order_and_files_it() {
    let app = TestApp::new();
    app.post(
        "/api/cart/items",
        json!({ "productId": "3", "size": "M", "color": "Navy", "quantity": 2 }),
    )
    .await;
    app.post("/api/cart/discount", json!({ "code": "VERDE10" }))
        .await;

    let (status, body) = app.post("/api/checkout", checkout_form()).await;
    assert_eq!(status, StatusCode::CREATED);

    let order_number = body["orderNumber"].as_str().unwrap().to_string();
    assert_eq!(order_number.len(), 8);
    assert!(
        order_number
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );

    let order = &body["order"];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["customerName"], "Meera Iyer");
    assert_eq!(order["paymentMethod"], "upi");
    assert_eq!(order["items"][0]["productName"], "Flowy Maxi Dress");
    assert_eq!(order["items"][0]["quantity"], 2);
    // 7998 - 799.8 discount, free shipping
    assert_eq!(decimal(&order["total"]), Decimal::new(71982, 1));

    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(decimal(&cart["summary"]["discount"]), Decimal::ZERO);

    app.login_admin().await;
    let (_, orders) = app.get("/api/admin/orders").await;
    assert_eq!(orders["count"], 6);
    assert_eq!(orders["orders"][0]["id"], order_number.as_str());
}

#[tokio::test]
async fn test_admin_routes_require_login() {
    let app = TestApp::new();

    for uri in [
        "/api/admin/dashboard",
        "/api/admin/orders",
        "/api/admin/products",
    ] {
        let (status, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }

    let (status, _) = app
        .post("/api/admin/login", json!({ "password": "letmein" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.login_admin().await;
    let (status, _) = app.get("/api/admin/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.post("/api/admin/logout", Value::Null).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get("/api/admin/dashboard").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_login_survives_restart() {
    let app = TestApp::new();
    app.login_admin().await;

    let restarted = TestApp::with_store(app.store.clone());
    let (status, _) = restarted.get("/api/admin/dashboard").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_over_demo_orders() {
    let app = TestApp::new();
    app.login_admin().await;

    let (_, stats) = app.get("/api/admin/dashboard").await;
    assert_eq!(stats["totalOrders"], 5);
    assert_eq!(decimal(&stats["totalRevenue"]), Decimal::from(28_591));
    assert_eq!(stats["pendingOrders"], 2);
    assert_eq!(stats["totalProducts"], 16);
    assert_eq!(stats["recentOrders"].as_array().unwrap().len(), 5);

    let breakdown: Vec<(&str, u64)> = stats["statusBreakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| (s["status"].as_str().unwrap(), s["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        breakdown,
        vec![
            ("pending", 1),
            ("processing", 1),
            ("shipped", 1),
            ("delivered", 2)
        ]
    );
}

#[tokio::test]
async fn test_order_filters() {
    let app = TestApp::new();
    app.login_admin().await;

    let (_, by_email) = app.get("/api/admin/orders?search=PRIYA@").await;
    assert_eq!(by_email["count"], 1);
    assert_eq!(by_email["orders"][0]["id"], "ORD-001");

    let (_, delivered) = app.get("/api/admin/orders?status=delivered").await;
    assert_eq!(delivered["count"], 2);

    let (_, all) = app.get("/api/admin/orders?status=all&search=ord-00").await;
    assert_eq!(all["count"], 5);

    let (status, _) = app.get("/api/admin/orders?status=lost").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_table() {
    let app = TestApp::new();
    app.login_admin().await;

    let (_, accessories) = app.get("/api/admin/products?category=accessories").await;
    assert_eq!(accessories["total"], 5);
    assert_eq!(accessories["inStock"], 5);
    assert_eq!(accessories["onSale"], 2);

    let (_, leather) = app.get("/api/admin/products?search=verde%20leather").await;
    assert_eq!(leather["total"], 2);

    let (_, by_sku) = app.get("/api/admin/products?search=vrd-m011").await;
    assert_eq!(by_sku["total"], 1);
    assert_eq!(by_sku["inStock"], 0);
}
