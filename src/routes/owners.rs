use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use std::sync::Arc;

use crate::models::owner::{Owner, OwnerUpdate};

fn owners_collection(client: &Client) -> mongodb::Collection<Owner> {
    client.database("Property").collection("Owners")
}

pub async fn get_owners(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = owners_collection(&client);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Owner>>().await {
            Ok(owners) => HttpResponse::Ok().json(owners),
            Err(err) => {
                eprintln!("Error retrieving owners: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve owners")
            }
        },
        Err(err) => {
            eprintln!("Error fetching owners: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch owners")
        }
    }
}

pub async fn create_owner(
    data: web::Data<Arc<Client>>,
    input: web::Json<Owner>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = owners_collection(&client);

    let time = Utc::now();
    let mut owner = input.into_inner();
    owner.id = None;
    owner.created_at = Some(time);
    owner.updated_at = Some(time);

    match collection.insert_one(&owner).await {
        Ok(insert_result) => {
            owner.id = insert_result.inserted_id.as_object_id();
            HttpResponse::Ok().json(owner)
        }
        Err(err) => {
            eprintln!("Error creating owner: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create owner")
        }
    }
}

pub async fn update_owner(
    data: web::Data<Arc<Client>>,
    input: web::Json<OwnerUpdate>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = owners_collection(&client);

    let owner_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid owner ID format"),
    };

    let mut update_doc = match mongodb::bson::to_document(&input.into_inner()) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("Failed to serialize owner update: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid owner update");
        }
    };

    if update_doc.is_empty() {
        return HttpResponse::BadRequest().body("At least one field must be provided");
    }

    update_doc.insert("updated_at", Utc::now().to_rfc3339());

    match collection
        .update_one(doc! { "_id": owner_id }, doc! { "$set": update_doc })
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Owner not found");
            }
            HttpResponse::Ok().body("Owner updated")
        }
        Err(err) => {
            eprintln!("Error updating owner: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update owner")
        }
    }
}
