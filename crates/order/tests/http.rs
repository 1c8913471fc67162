mod common;

use axum::http::StatusCode;
use common::{TestApp, sign};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use shared::cache::Session;

fn address() -> Value {
    json!({
        "fullName": "Asha Menon",
        "phone": "9876543210",
        "line1": "12 MG Road",
        "city": "Kochi",
        "state": "Kerala",
        "pincode": "682001"
    })
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let app = TestApp::with_seeded_cart().await;

    let (status, body) = app.call("GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");

    let (status, _) = app.call("GET", "/api/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tokens_for_unknown_users_are_unauthorized() {
    let app = TestApp::with_seeded_cart().await;

    let (status, _) = app.call("GET", "/api/orders", Some(404), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_need_an_admin_session() {
    let app = TestApp::with_seeded_cart().await;

    let (status, body) = app.call("GET", "/api/admin/orders", Some(1), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "error");

    let (status, body) = app.call("GET", "/api/admin/orders", Some(9), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    assert_eq!(
        app.sessions.get("session:9"),
        Some(Session {
            user_id: 9,
            username: "admin".into(),
            is_admin: true,
        })
    );
}

#[tokio::test]
async fn cod_checkout_over_http() {
    let app = TestApp::with_seeded_cart().await;

    let (status, body) = app
        .call(
            "POST",
            "/api/orders",
            Some(1),
            Some(json!({
                "totalAmount": "10.00",
                "paymentMode": "cod",
                "address": address()
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["status"], "cod_confirmed");
    assert_eq!(decimal(&body["data"]["totalAmount"]), dec!(2000));
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert!(body["data"].get("payment").is_none());

    let (status, cart) = app.call("GET", "/api/cart", Some(1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["data"], json!([]));

    let (status, orders) = app.call("GET", "/api/orders", Some(1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn checkout_validation_and_empty_cart_are_bad_requests() {
    let app = TestApp::with_seeded_cart().await;

    let mut bad_address = address();
    bad_address["pincode"] = json!("1");
    let (status, body) = app
        .call(
            "POST",
            "/api/orders",
            Some(1),
            Some(json!({ "paymentMode": "cod", "address": bad_address })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("address.pincode").is_some());

    let (status, _) = app
        .call(
            "POST",
            "/api/orders",
            Some(1),
            Some(json!({ "paymentMode": "cheque", "address": address() })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .call(
            "POST",
            "/api/orders",
            Some(2),
            Some(json!({ "paymentMode": "cod", "address": address() })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cart is empty");
}

#[tokio::test]
async fn gateway_checkout_and_verification_over_http() {
    let app = TestApp::with_seeded_cart().await;

    let (status, body) = app
        .call(
            "POST",
            "/api/orders",
            Some(1),
            Some(json!({ "paymentMode": "gateway", "address": address() })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["paymentMode"], "razorpay");
    assert_eq!(body["data"]["payment"]["razorpayOrderId"], "order_fake1");
    assert_eq!(body["data"]["payment"]["amount"], 200_000);

    let id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/orders/{id}/verify-payment");

    let (status, body) = app
        .call(
            "POST",
            &uri,
            Some(1),
            Some(json!({
                "razorpayPaymentId": "pay_200",
                "razorpaySignature": sign("order_fake1", "pay_other")
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid payment signature");

    let (status, _) = app
        .call(
            "POST",
            &uri,
            Some(2),
            Some(json!({
                "razorpayPaymentId": "pay_200",
                "razorpaySignature": sign("order_fake1", "pay_200")
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .call(
            "POST",
            &uri,
            Some(1),
            Some(json!({
                "razorpayPaymentId": "pay_200",
                "razorpaySignature": sign("order_fake1", "pay_200")
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["status"], "paid");

    let (status, body) = app
        .call("GET", &format!("/api/orders/{id}"), Some(1), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "paid");
    assert_eq!(body["data"]["paymentId"], "order_fake1");

    let (status, _) = app
        .call("GET", &format!("/api/orders/{id}"), Some(2), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gateway_outage_is_service_unavailable() {
    let app = TestApp::with_seeded_cart().await;
    app.gateway.set_failing(true);

    let (status, body) = app
        .call(
            "POST",
            "/api/orders",
            Some(1),
            Some(json!({ "paymentMode": "razorpay", "address": address() })),
        )
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].as_str().unwrap().contains("order 1"));

    app.gateway.set_failing(false);
    let (status, body) = app
        .call("POST", "/api/orders/1/payment-intent", Some(1), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["razorpayOrderId"], "order_fake1");
    assert_eq!(body["data"]["keyId"], "rzp_test_key");
}

#[tokio::test]
async fn admin_status_updates_and_filters() {
    let app = TestApp::with_seeded_cart().await;

    let (status, _) = app
        .call(
            "POST",
            "/api/orders",
            Some(1),
            Some(json!({ "paymentMode": "cod", "address": address() })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .call(
            "PUT",
            "/api/admin/orders/1/status",
            Some(9),
            Some(json!({ "status": "paid" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("paid"));

    let (status, body) = app
        .call(
            "PUT",
            "/api/admin/orders/1/status",
            Some(9),
            Some(json!({ "status": "shipped" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "shipped");

    let (status, _) = app
        .call(
            "PUT",
            "/api/admin/orders/1/status",
            Some(1),
            Some(json!({ "status": "delivered" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call("GET", "/api/admin/orders?status=shipped&userId=1", Some(9), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user"]["username"], "asha");

    let (status, body) = app
        .call("GET", "/api/admin/orders?status=pending", Some(9), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = app
        .call("GET", "/api/admin/orders?status=refunded", Some(9), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_endpoints_merge_duplicates_and_scope_by_owner() {
    let app = TestApp::with_seeded_cart().await;

    for _ in 0..2 {
        let (status, _) = app
            .call(
                "POST",
                "/api/cart",
                Some(2),
                Some(json!({ "productId": 10 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app
        .call(
            "POST",
            "/api/cart",
            Some(2),
            Some(json!({ "productId": 10, "quantity": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 5);
    let item_id = body["data"]["id"].as_i64().unwrap();

    let (_, cart) = app.call("GET", "/api/cart", Some(2), None).await;
    let lines = cart["data"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["product"]["name"], "Gold Ring");
    assert_eq!(decimal(&lines[0]["product"]["price"]), dec!(500));

    let (status, _) = app
        .call(
            "POST",
            "/api/cart",
            Some(2),
            Some(json!({ "productId": 999 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call(
            "PATCH",
            &format!("/api/cart/{item_id}"),
            Some(2),
            Some(json!({ "quantity": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            "PATCH",
            &format!("/api/cart/{item_id}"),
            Some(1),
            Some(json!({ "quantity": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .call(
            "PATCH",
            &format!("/api/cart/{item_id}"),
            Some(2),
            Some(json!({ "quantity": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 2);

    let (status, _) = app
        .call("DELETE", &format!("/api/cart/{item_id}"), Some(2), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .call("DELETE", &format!("/api/cart/{item_id}"), Some(2), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_endpoint_exposes_service_families() {
    let app = TestApp::with_seeded_cart().await;

    let (status, _) = app.call("GET", "/api/cart", Some(1), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, text) = app.get_text("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("cart_service_request_counter"));
    assert!(text.contains("order_command_service_request_duration"));
}

#[tokio::test]
async fn checkout_against_an_edited_cart_is_a_conflict() {
    let app = TestApp::with_cart_edited_during_checkout().await;

    let (status, body) = app
        .call(
            "POST",
            "/api/orders",
            Some(1),
            Some(json!({ "paymentMode": "cod", "address": address() })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Cart changed during checkout, please retry");
    assert_eq!(app.db.order_count(), 0);
    assert_eq!(app.db.cart_of(1).len(), 1);
}

#[tokio::test]
async fn admin_user_filter_must_be_positive() {
    let app = TestApp::with_seeded_cart().await;

    let (status, body) = app
        .call("GET", "/api/admin/orders?userId=0", Some(9), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, _) = app
        .call("GET", "/api/admin/orders?userId=1", Some(9), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn repeated_adds_stop_at_the_line_cap() {
    let app = TestApp::with_seeded_cart().await;

    for _ in 0..3 {
        let (status, _) = app
            .call(
                "POST",
                "/api/cart",
                Some(2),
                Some(json!({ "productId": 11, "quantity": 60 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, cart) = app.call("GET", "/api/cart", Some(2), None).await;
    let lines = cart["data"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 100);
}
