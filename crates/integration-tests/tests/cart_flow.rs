//! Cart, discount and persistence behaviour through the HTTP API.

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use verde_integration_tests::{TestApp, decimal};

fn line(product_id: &str, size: &str, color: &str) -> Value {
    json!({ "productId": product_id, "size": size, "color": color })
}

fn with_quantity(mut body: Value, quantity: i64) -> Value {
    body["quantity"] = json!(quantity);
    body
}

#[tokio::test]
async fn test_empty_cart() {
    let app = TestApp::new();
    let (status, cart) = app.get("/api/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["summary"]["itemCount"], 0);
    assert_eq!(decimal(&cart["summary"]["subtotal"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_repeated_adds_merge_into_one_line() {
    let app = TestApp::new();
    app.post("/api/cart/items", line("1", "M", "Sage")).await;
    let (status, cart) = app
        .post("/api/cart/items", with_quantity(line("1", "M", "Sage"), 2))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 3);
    assert_eq!(cart["summary"]["itemCount"], 3);
    assert_eq!(decimal(&cart["summary"]["subtotal"]), Decimal::from(3 * 1299));
}

#[tokio::test]
async fn test_size_and_color_distinguish_lines() {
    let app = TestApp::new();
    app.post("/api/cart/items", line("1", "M", "Sage")).await;
    app.post("/api/cart/items", line("1", "L", "Sage")).await;
    let (_, cart) = app.post("/api/cart/items", line("1", "M", "Black")).await;

    assert_eq!(cart["items"].as_array().unwrap().len(), 3);
    assert_eq!(cart["summary"]["itemCount"], 3);
}

#[tokio::test]
async fn test_sale_price_takes_precedence() {
    let app = TestApp::new();
    let (_, cart) = app
        .post("/api/cart/items", with_quantity(line("2", "S", "White"), 2))
        .await;

    assert_eq!(decimal(&cart["items"][0]["unitPrice"]), Decimal::from(1999));
    assert_eq!(decimal(&cart["items"][0]["lineTotal"]), Decimal::from(3998));
}

#[tokio::test]
async fn test_rejects_unknown_product_and_options() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/cart/items", line("999", "M", "Red")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));

    let (status, _) = app.post("/api/cart/items", line("1", "XXXL", "Sage")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app.post("/api/cart/items", line("1", "M", "Purple")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_set_quantity_clamps_to_one() {
    let app = TestApp::new();
    app.post("/api/cart/items", with_quantity(line("9", "M", "Navy"), 4))
        .await;

    let (status, cart) = app
        .patch("/api/cart/items", with_quantity(line("9", "M", "Navy"), -3))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 1);

    // Absent key is a no-op
    let (_, cart) = app
        .patch("/api/cart/items", with_quantity(line("9", "S", "Navy"), 5))
        .await;
    assert_eq!(cart["summary"]["itemCount"], 1);
}

#[tokio::test]
async fn test_set_quantity_fractional_input() {
    let app = TestApp::new();
    app.post("/api/cart/items", with_quantity(line("9", "M", "Navy"), 4))
        .await;

    let mut body = line("9", "M", "Navy");
    body["quantity"] = json!(0.5);
    let (status, cart) = app.patch("/api/cart/items", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 1);

    let mut body = line("9", "M", "Navy");
    body["quantity"] = json!(3.7);
    let (_, cart) = app.patch("/api/cart/items", body).await;
    assert_eq!(cart["items"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_quick_add_uses_first_options() {
    let app = TestApp::new();

    let (status, cart) = app
        .post("/api/cart/items", json!({ "productId": "13" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cart["items"][0]["size"], "One Size");
    assert_eq!(cart["items"][0]["color"], "Natural");
    assert_eq!(cart["items"][0]["quantity"], 1);

    // A partial selection fills in only what is missing
    let (_, cart) = app
        .post("/api/cart/items", json!({ "productId": "1", "color": "Sage" }))
        .await;
    assert_eq!(cart["items"][1]["size"], "XS");
    assert_eq!(cart["items"][1]["color"], "Sage");

    // Same defaults merge into the existing line
    let (_, cart) = app
        .post("/api/cart/items", json!({ "productId": "13" }))
        .await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_decrement_and_remove() {
    let app = TestApp::new();
    app.post("/api/cart/items", with_quantity(line("9", "M", "Navy"), 2))
        .await;
    app.post("/api/cart/items", line("1", "S", "White")).await;

    let (_, cart) = app
        .post("/api/cart/items/decrement", line("9", "M", "Navy"))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 1);

    let (_, cart) = app
        .post("/api/cart/items/decrement", line("9", "M", "Navy"))
        .await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["productId"], "1");

    let (_, cart) = app
        .delete("/api/cart/items", Some(line("1", "S", "White")))
        .await;
    assert_eq!(cart["items"], json!([]));

    // Removing again is a no-op
    let (status, _) = app
        .delete("/api/cart/items", Some(line("1", "S", "White")))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_shipping_threshold_is_inclusive() {
    let app = TestApp::new();

    // Woven Leather Belt on sale at 899
    let (_, cart) = app.post("/api/cart/items", line("15", "M", "Brown")).await;
    assert_eq!(decimal(&cart["summary"]["shipping"]), Decimal::from(99));
    assert_eq!(decimal(&cart["summary"]["grandTotal"]), Decimal::from(998));
    assert_eq!(cart["freeShippingHint"], "Add ₹100 more for free shipping");

    app.delete("/api/cart", None).await;

    // Men's V-Neck Tee at exactly 999
    let (_, cart) = app.post("/api/cart/items", line("9", "L", "Grey")).await;
    assert_eq!(decimal(&cart["summary"]["shipping"]), Decimal::ZERO);
    assert_eq!(decimal(&cart["summary"]["grandTotal"]), Decimal::from(999));
    assert!(cart.get("freeShippingHint").is_none());
}

#[tokio::test]
async fn test_discount_code() {
    let app = TestApp::new();
    app.post("/api/cart/items", line("1", "M", "White")).await;

    let (status, body) = app
        .post("/api/cart/discount", json!({ "code": "SAVE50" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid discount code");

    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(decimal(&cart["summary"]["grandTotal"]), Decimal::from(1299));

    let (status, cart) = app
        .post("/api/cart/discount", json!({ "code": " verde10 " }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["summary"]["discountCode"], "VERDE10");
    assert_eq!(decimal(&cart["summary"]["discount"]), Decimal::new(1299, 1));
    assert_eq!(decimal(&cart["summary"]["grandTotal"]), Decimal::new(11691, 1));

    // Re-applying does not stack
    let (_, cart) = app
        .post("/api/cart/discount", json!({ "code": "VERDE10" }))
        .await;
    assert_eq!(decimal(&cart["summary"]["discount"]), Decimal::new(1299, 1));

    let (_, cart) = app.delete("/api/cart/discount", None).await;
    assert_eq!(decimal(&cart["summary"]["discount"]), Decimal::ZERO);
    assert!(cart["summary"].get("discountCode").is_none());
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let app = TestApp::new();
    app.post("/api/cart/items", with_quantity(line("12", "One Size", "Tan"), 2))
        .await;
    app.post("/api/cart/discount", json!({ "code": "VERDE10" }))
        .await;

    let restarted = TestApp::with_store(app.store.clone());
    let (_, cart) = restarted.get("/api/cart").await;

    assert_eq!(cart["items"][0]["name"], "Leather Crossbody Bag");
    assert_eq!(cart["summary"]["itemCount"], 2);
    // The discount lives in memory only
    assert_eq!(decimal(&cart["summary"]["discount"]), Decimal::ZERO);
}
