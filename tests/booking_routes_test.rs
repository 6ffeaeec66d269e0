use actix_web::{test, web, App, HttpResponse};
use serde_json::json;

async fn health_check() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({"status": "ok"})))
}

// Mirrors the enrichment contract the API applies to every booking it
// returns: supplied values are kept, absent ones fall back to the
// percentage defaults derived from the gross amount.
async fn get_bookings() -> actix_web::Result<HttpResponse> {
    let amount: f64 = 450.0;
    Ok(HttpResponse::Ok().json(json!([{
        "booking_number": "BK-A1B2C3D4",
        "guest_name": "Lena Ortiz",
        "check_in": "2025-06-01",
        "check_out": "2025-06-05",
        "amount": amount,
        "status": "confirmed",
        "payment_status": "pending",
        "guestEmail": "",
        "guestPhone": "",
        "guestDocument": "",
        "adults": 1,
        "children": 0,
        "baseRate": amount * 0.80,
        "securityDeposit": 100.0,
        "commission": amount * 0.10,
        "tourismFee": amount * 0.03,
        "vat": amount * 0.05,
        "netToOwner": amount * 0.82,
        "amountPaid": 0.0,
        "pendingAmount": amount,
        "special_requests": "",
        "notes": ""
    }])))
}

async fn get_today_checkins() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!([])))
}

async fn create_booking_conflict() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Conflict()
        .body("Room already booked for these dates (booking BK-A1B2C3D4)"))
}

async fn bad_request() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::BadRequest().body("Invalid booking ID format"))
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app =
        test::init_service(App::new().route("/health", web::get().to(health_check))).await;

    let req = test::TestRequest::get().uri("/health").to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_bookings_are_returned_enriched() {
    let app = test::init_service(
        App::new().route("/api/bookings", web::get().to(get_bookings)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/bookings").to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.is_array());

    let booking = &body[0];
    assert_eq!(booking["amount"], 450.0);
    assert_eq!(booking["commission"], 45.0);
    assert_eq!(booking["tourismFee"], 13.5);
    assert_eq!(booking["vat"], 22.5);
    assert_eq!(booking["netToOwner"], 369.0);
    assert_eq!(booking["baseRate"], 360.0);
    assert_eq!(booking["securityDeposit"], 100.0);
    assert_eq!(booking["pendingAmount"], 450.0);
    assert_eq!(booking["amountPaid"], 0.0);
    assert_eq!(booking["adults"], 1);
    assert_eq!(booking["children"], 0);
    assert_eq!(booking["payment_status"], "pending");

    // Text fields come back as empty strings, never null
    assert_eq!(booking["guestEmail"], "");
    assert_eq!(booking["guestPhone"], "");
    assert_eq!(booking["guestDocument"], "");
    assert!(!booking["guestEmail"].is_null());
}

#[actix_web::test]
async fn test_today_checkins_endpoint() {
    let app = test::init_service(
        App::new().route(
            "/api/bookings/today-checkins",
            web::get().to(get_today_checkins),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/bookings/today-checkins")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.is_array());
}

#[actix_web::test]
async fn test_overlapping_booking_is_rejected() {
    let app = test::init_service(
        App::new().route("/api/bookings", web::post().to(create_booking_conflict)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(&json!({
            "room_id": "65f1a0b2c3d4e5f6a7b8c9d0",
            "guest_name": "Lena Ortiz",
            "check_in": "2025-06-02",
            "check_out": "2025-06-04",
            "amount": 300
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_invalid_booking_id() {
    let app = test::init_service(
        App::new().route("/api/bookings/{id}", web::get().to(bad_request)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/bookings/not-an-object-id")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_cors_headers() {
    let app = test::init_service(
        App::new()
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .route("/health", web::get().to(health_check)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Origin", "http://localhost:3000"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
