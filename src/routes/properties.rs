use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Client;
use std::sync::Arc;

use crate::models::property::Property;

fn properties_collection(client: &Client) -> mongodb::Collection<Property> {
    client.database("Property").collection("Properties")
}

pub async fn get_properties(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = properties_collection(&client);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Property>>().await {
            Ok(properties) => HttpResponse::Ok().json(properties),
            Err(err) => {
                eprintln!("Error retrieving properties: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve properties")
            }
        },
        Err(err) => {
            eprintln!("Error fetching properties: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch properties")
        }
    }
}

pub async fn create_property(
    data: web::Data<Arc<Client>>,
    input: web::Json<Property>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = properties_collection(&client);

    let time = Utc::now();
    let mut property = input.into_inner();
    property.id = None;
    property.created_at = Some(time);
    property.updated_at = Some(time);

    match collection.insert_one(&property).await {
        Ok(insert_result) => {
            property.id = insert_result.inserted_id.as_object_id();
            HttpResponse::Ok().json(property)
        }
        Err(err) => {
            eprintln!("Error creating property: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create property")
        }
    }
}
