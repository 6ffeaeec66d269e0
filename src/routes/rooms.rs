use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::room::{Room, RoomInput, RoomStatus, RoomUpdate};
use crate::services::audit_service::AuditService;

#[derive(Debug, Deserialize)]
pub struct RoomStatusInput {
    pub status: RoomStatus,
}

fn rooms_collection(client: &Client) -> mongodb::Collection<Room> {
    client.database("Property").collection("Rooms")
}

pub async fn get_rooms(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = rooms_collection(&client);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Room>>().await {
            Ok(rooms) => HttpResponse::Ok().json(rooms),
            Err(err) => {
                eprintln!("Error retrieving rooms: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve rooms")
            }
        },
        Err(err) => {
            eprintln!("Error fetching rooms: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch rooms")
        }
    }
}

pub async fn get_room_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = rooms_collection(&client);

    let room_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid room ID format"),
    };

    match collection.find_one(doc! { "_id": room_id }).await {
        Ok(Some(room)) => HttpResponse::Ok().json(room),
        Ok(None) => HttpResponse::NotFound().body("Room not found"),
        Err(err) => {
            eprintln!("Error fetching room: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch room")
        }
    }
}

/// Lookup by the human-facing room number, used by the check-in screens.
pub async fn get_room_by_number(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = rooms_collection(&client);

    let number = path.into_inner();

    match collection.find_one(doc! { "number": &number }).await {
        Ok(Some(room)) => HttpResponse::Ok().json(room),
        Ok(None) => HttpResponse::NotFound().body("Room not found"),
        Err(err) => {
            eprintln!("Error fetching room {}: {:?}", number, err);
            HttpResponse::InternalServerError().body("Failed to fetch room")
        }
    }
}

pub async fn create_room(
    data: web::Data<Arc<Client>>,
    input: web::Json<RoomInput>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection = rooms_collection(&client);

    let input = input.into_inner();

    match collection.find_one(doc! { "number": &input.number }).await {
        Ok(Some(_)) => return HttpResponse::Conflict().body("Room number already exists"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("Error checking for existing room: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to check for rooms");
        }
    }

    let time = Utc::now();

    let room = Room {
        id: None,
        number: input.number,
        room_type: input.room_type,
        capacity: input.capacity,
        rate: input.rate,
        status: input.status.unwrap_or(RoomStatus::Available),
        floor: input.floor,
        description: input.description,
        amenities: input.amenities,
        property_id: input.property_id,
        last_cleaned: None,
        next_check_in: None,
        created_at: Some(time),
        updated_at: Some(time),
    };

    match collection.insert_one(&room).await {
        Ok(insert_result) => {
            let room_id = insert_result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_string())
                .unwrap_or_default();

            AuditService::record(
                &client,
                "room.created",
                "room",
                &room_id,
                ObjectId::parse_str(&claims.user_id).ok(),
                Some(doc! { "number": &room.number }),
            )
            .await;

            let mut stored = room;
            stored.id = insert_result.inserted_id.as_object_id();
            HttpResponse::Ok().json(stored)
        }
        Err(err) => {
            eprintln!("Error creating room: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create room")
        }
    }
}

pub async fn update_room(
    data: web::Data<Arc<Client>>,
    input: web::Json<RoomUpdate>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = rooms_collection(&client);

    let room_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid room ID format"),
    };

    let mut update_doc = match mongodb::bson::to_document(&input.into_inner()) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("Failed to serialize room update: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid room update");
        }
    };

    if update_doc.is_empty() {
        return HttpResponse::BadRequest().body("At least one field must be provided");
    }

    update_doc.insert("updated_at", Utc::now().to_rfc3339());

    match collection
        .update_one(doc! { "_id": room_id }, doc! { "$set": update_doc })
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Room not found");
            }
            HttpResponse::Ok().body("Room updated")
        }
        Err(err) => {
            eprintln!("Error updating room: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update room")
        }
    }
}

pub async fn update_room_status(
    data: web::Data<Arc<Client>>,
    input: web::Json<RoomStatusInput>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection = rooms_collection(&client);

    let room_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid room ID format"),
    };

    let status = match mongodb::bson::to_bson(&input.status) {
        Ok(status) => status,
        Err(err) => {
            eprintln!("Failed to serialize room status: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid room status");
        }
    };

    let update = doc! {
        "$set": {
            "status": status.clone(),
            "updated_at": Utc::now().to_rfc3339()
        }
    };

    match collection.update_one(doc! { "_id": room_id }, update).await {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Room not found");
            }

            AuditService::record(
                &client,
                "room.status_changed",
                "room",
                &room_id.to_string(),
                ObjectId::parse_str(&claims.user_id).ok(),
                Some(doc! { "status": status }),
            )
            .await;

            HttpResponse::Ok().body("Room status updated")
        }
        Err(err) => {
            eprintln!("Error updating room status: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update room status")
        }
    }
}
