use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Client;
use std::sync::Arc;

use crate::models::owner::Owner;
use crate::models::property::PropertyOwnership;
use crate::models::room::Room;

fn ownership_collection(client: &Client) -> mongodb::Collection<PropertyOwnership> {
    client.database("Property").collection("Ownership")
}

pub async fn get_property_ownership(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = ownership_collection(&client);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<PropertyOwnership>>().await {
            Ok(records) => HttpResponse::Ok().json(records),
            Err(err) => {
                eprintln!("Error retrieving ownership records: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve ownership records")
            }
        },
        Err(err) => {
            eprintln!("Error fetching ownership records: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch ownership records")
        }
    }
}

pub async fn create_property_ownership(
    data: web::Data<Arc<Client>>,
    input: web::Json<PropertyOwnership>,
) -> impl Responder {
    let client = data.into_inner();

    let mut record = input.into_inner();

    // Contract commission is a fraction of gross, not a percent figure
    if !(0.0..=1.0).contains(&record.commission_rate) {
        return HttpResponse::BadRequest().body("commission_rate must be between 0 and 1");
    }

    let rooms: mongodb::Collection<Room> = client.database("Property").collection("Rooms");
    match rooms.find_one(doc! { "_id": record.room_id }).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Room not found"),
        Err(err) => {
            eprintln!("Error checking room: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to check room");
        }
    }

    let owners: mongodb::Collection<Owner> = client.database("Property").collection("Owners");
    match owners.find_one(doc! { "_id": record.owner_id }).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Owner not found"),
        Err(err) => {
            eprintln!("Error checking owner: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to check owner");
        }
    }

    let collection = ownership_collection(&client);
    let time = Utc::now();
    record.id = None;
    record.created_at = Some(time);
    record.updated_at = Some(time);

    match collection.insert_one(&record).await {
        Ok(insert_result) => {
            record.id = insert_result.inserted_id.as_object_id();
            HttpResponse::Ok().json(record)
        }
        Err(err) => {
            eprintln!("Error creating ownership record: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create ownership record")
        }
    }
}
