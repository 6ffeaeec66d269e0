use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use rand::{distributions::Alphanumeric, Rng};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::bookings::{
    Booking, BookingInput, BookingStatus, BookingUpdate, EnrichedBooking,
};
use crate::models::email_template::EmailTemplate;
use crate::models::room::Room;
use crate::services::audit_service::AuditService;
use crate::services::email_service::EmailService;
use crate::services::finance_service::FinanceService;

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: BookingStatus,
}

fn bookings_collection(client: &Client) -> mongodb::Collection<Booking> {
    client.database("Operations").collection("Bookings")
}

fn generate_booking_number() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("BK-{}", suffix)
}

pub async fn get_all_bookings(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = bookings_collection(&client);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(FinanceService::enrich_all(bookings)),
            Err(err) => {
                eprintln!("Error retrieving bookings: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve bookings")
            }
        },
        Err(err) => {
            eprintln!("Error fetching bookings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch bookings")
        }
    }
}

pub async fn get_booking_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = bookings_collection(&client);

    let booking_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid booking ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    match collection.find_one(doc! { "_id": booking_id }).await {
        Ok(Some(booking)) => HttpResponse::Ok().json(FinanceService::enrich(&booking)),
        Ok(None) => HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Error fetching booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch booking")
        }
    }
}

/// Confirmed arrivals for the current day, enriched for the dashboard.
pub async fn today_checkins(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = bookings_collection(&client);

    let today = Utc::now().date_naive().to_string();
    let filter = doc! { "check_in": &today, "status": "confirmed" };

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(FinanceService::enrich_all(bookings)),
            Err(err) => {
                eprintln!("Error retrieving today's check-ins: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve today's check-ins")
            }
        },
        Err(err) => {
            eprintln!("Error fetching today's check-ins: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch today's check-ins")
        }
    }
}

/// In-house guests due to leave today.
pub async fn today_checkouts(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = bookings_collection(&client);

    let today = Utc::now().date_naive().to_string();
    let filter = doc! { "check_out": &today, "status": "checked-in" };

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(FinanceService::enrich_all(bookings)),
            Err(err) => {
                eprintln!("Error retrieving today's check-outs: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve today's check-outs")
            }
        },
        Err(err) => {
            eprintln!("Error fetching today's check-outs: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch today's check-outs")
        }
    }
}

pub async fn add_booking(
    data: web::Data<Arc<Client>>,
    input: web::Json<BookingInput>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    if input.check_out <= input.check_in {
        return HttpResponse::BadRequest().body("Check-out must be after check-in");
    }

    // Verify the room exists before accepting a booking for it
    let rooms: mongodb::Collection<Room> = client.database("Property").collection("Rooms");
    match rooms.find_one(doc! { "_id": input.room_id }).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Room not found"),
        Err(err) => {
            eprintln!("Error checking room: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to check room");
        }
    }

    let collection = bookings_collection(&client);

    // Reject stays overlapping an active booking for the same room
    let overlap_filter = doc! {
        "room_id": input.room_id,
        "status": { "$in": ["pending", "confirmed", "checked-in"] },
        "check_in": { "$lt": input.check_out.to_string() },
        "check_out": { "$gt": input.check_in.to_string() },
    };

    match collection.find_one(overlap_filter).await {
        Ok(Some(existing)) => {
            return HttpResponse::Conflict().body(format!(
                "Room already booked for these dates (booking {})",
                existing.booking_number
            ));
        }
        Ok(None) => {}
        Err(err) => {
            eprintln!("Error checking for overlapping bookings: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to check for bookings");
        }
    }

    let time = Utc::now();
    let created_by = ObjectId::parse_str(&claims.user_id).ok();

    let booking = Booking {
        id: None,
        room_id: input.room_id,
        booking_number: generate_booking_number(),
        guest_name: input.guest_name,
        check_in: input.check_in,
        check_out: input.check_out,
        amount: input.amount,
        status: input.status.unwrap_or(BookingStatus::Pending),
        payment_status: input.payment_status,
        guest_email: input.guest_email,
        guest_phone: input.guest_phone,
        guest_document: input.guest_document,
        adults: input.adults,
        children: input.children,
        base_rate: input.base_rate,
        security_deposit: input.security_deposit,
        commission: input.commission,
        tourism_fee: input.tourism_fee,
        vat: input.vat,
        net_to_owner: input.net_to_owner,
        amount_paid: input.amount_paid,
        pending_amount: input.pending_amount,
        special_requests: input.special_requests,
        notes: input.notes,
        property_id: input.property_id,
        guest_id: input.guest_id,
        created_by,
        created_at: Some(time),
        updated_at: Some(time),
    };

    match collection.insert_one(&booking).await {
        Ok(insert_result) => {
            let mut stored = booking;
            stored.id = insert_result.inserted_id.as_object_id();

            let enriched = FinanceService::enrich(&stored);

            AuditService::record(
                &client,
                "booking.created",
                "booking",
                &stored.id.map(|id| id.to_string()).unwrap_or_default(),
                created_by,
                Some(doc! { "booking_number": &stored.booking_number }),
            )
            .await;

            if input.send_confirmation {
                send_confirmation_email(&client, &enriched).await;
            }

            HttpResponse::Ok().json(enriched)
        }
        Err(err) => {
            eprintln!("Error creating booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create booking")
        }
    }
}

pub async fn update_booking(
    data: web::Data<Arc<Client>>,
    input: web::Json<BookingUpdate>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection = bookings_collection(&client);

    let booking_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid booking ID format"),
    };

    let mut update_doc = match mongodb::bson::to_document(&input.into_inner()) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("Failed to serialize booking update: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid booking update");
        }
    };

    if update_doc.is_empty() {
        return HttpResponse::BadRequest().body("At least one field must be provided");
    }

    update_doc.insert("updated_at", Utc::now().to_rfc3339());
    let update = doc! { "$set": update_doc };

    match collection.update_one(doc! { "_id": booking_id }, update).await {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Booking not found");
            }

            AuditService::record(
                &client,
                "booking.updated",
                "booking",
                &booking_id.to_string(),
                ObjectId::parse_str(&claims.user_id).ok(),
                None,
            )
            .await;

            HttpResponse::Ok().body("Booking updated")
        }
        Err(err) => {
            eprintln!("Error updating booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update booking")
        }
    }
}

pub async fn update_booking_status(
    data: web::Data<Arc<Client>>,
    input: web::Json<StatusInput>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection = bookings_collection(&client);

    let booking_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid booking ID format"),
    };

    let status = match mongodb::bson::to_bson(&input.status) {
        Ok(status) => status,
        Err(err) => {
            eprintln!("Failed to serialize booking status: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid booking status");
        }
    };

    let update = doc! {
        "$set": {
            "status": status.clone(),
            "updated_at": Utc::now().to_rfc3339()
        }
    };

    match collection.update_one(doc! { "_id": booking_id }, update).await {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Booking not found");
            }

            AuditService::record(
                &client,
                "booking.status_changed",
                "booking",
                &booking_id.to_string(),
                ObjectId::parse_str(&claims.user_id).ok(),
                Some(doc! { "status": status }),
            )
            .await;

            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "booking_id": booking_id.to_string(),
                "status": input.status
            }))
        }
        Err(err) => {
            eprintln!("Error updating booking status: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update booking status")
        }
    }
}

pub async fn remove_booking(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection = bookings_collection(&client);

    let booking_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid booking ID format"),
    };

    match collection.delete_one(doc! { "_id": booking_id }).await {
        Ok(result) => {
            if result.deleted_count == 0 {
                return HttpResponse::NotFound().body("Booking not found");
            }

            AuditService::record(
                &client,
                "booking.deleted",
                "booking",
                &booking_id.to_string(),
                ObjectId::parse_str(&claims.user_id).ok(),
                None,
            )
            .await;

            HttpResponse::Ok().body("Removed booking")
        }
        Err(err) => {
            eprintln!("Error removing booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to remove booking")
        }
    }
}

/// Best-effort confirmation email. A missing template or SendGrid failure
/// is logged; the booking has already been created either way.
async fn send_confirmation_email(client: &Client, booking: &EnrichedBooking) {
    if booking.guest_email.is_empty() {
        println!(
            "Booking {} has no guest email, skipping confirmation",
            booking.booking_number
        );
        return;
    }

    let templates: mongodb::Collection<EmailTemplate> =
        client.database("System").collection("EmailTemplates");

    let template = match templates
        .find_one(doc! { "name": "booking-confirmation" })
        .await
    {
        Ok(Some(template)) => template,
        Ok(None) => {
            eprintln!("No booking-confirmation template configured");
            return;
        }
        Err(err) => {
            eprintln!("Failed to load booking-confirmation template: {:?}", err);
            return;
        }
    };

    let email_service = match EmailService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Email service unavailable: {}", err);
            return;
        }
    };

    let mut values = HashMap::new();
    values.insert("guest_name".to_string(), booking.guest_name.clone());
    values.insert(
        "booking_number".to_string(),
        booking.booking_number.clone(),
    );
    values.insert("check_in".to_string(), booking.check_in.to_string());
    values.insert("check_out".to_string(), booking.check_out.to_string());
    values.insert("amount".to_string(), format!("{:.2}", booking.amount));

    if let Err(err) = email_service
        .send_template(&booking.guest_email, &template, &values)
        .await
    {
        eprintln!(
            "Failed to send confirmation for {}: {}",
            booking.booking_number, err
        );
    }
}
