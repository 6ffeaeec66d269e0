use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::user::{StaffUser, UserRole, UserUpdate};

#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
}

fn users_collection(client: &Client) -> mongodb::Collection<StaffUser> {
    client.database("Account").collection("Users")
}

pub async fn get_users(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = users_collection(&client);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<StaffUser>>().await {
            Ok(users) => {
                // Password hashes never leave the service
                let users: Vec<StaffUser> = users
                    .into_iter()
                    .map(|mut user| {
                        user.password.clear();
                        user
                    })
                    .collect();
                HttpResponse::Ok().json(users)
            }
            Err(err) => {
                eprintln!("Error retrieving users: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve users")
            }
        },
        Err(err) => {
            eprintln!("Error fetching users: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch users")
        }
    }
}

pub async fn create_user(
    data: web::Data<Arc<Client>>,
    input: web::Json<UserInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = users_collection(&client);

    let input = input.into_inner();

    match collection.find_one(doc! { "email": &input.email }).await {
        Ok(Some(_)) => return HttpResponse::Conflict().body("Email already registered"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("Error checking for existing user: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to check for users");
        }
    }

    let time = Utc::now();

    let mut user = StaffUser {
        id: None,
        name: input.name,
        email: input.email,
        password: bcrypt::hash(input.password, bcrypt::DEFAULT_COST).unwrap_or("".to_string()),
        role: input.role,
        status: input.status.unwrap_or_else(|| "active".to_string()),
        avatar_url: input.avatar_url,
        last_active: None,
        failed_signins: None,
        created_at: Some(time),
        updated_at: Some(time),
    };

    match collection.insert_one(&user).await {
        Ok(insert_result) => {
            user.id = insert_result.inserted_id.as_object_id();
            user.password.clear();
            HttpResponse::Ok().json(user)
        }
        Err(err) => {
            eprintln!("Error creating user: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create user")
        }
    }
}

pub async fn update_user(
    data: web::Data<Arc<Client>>,
    input: web::Json<UserUpdate>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = users_collection(&client);

    let user_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID format"),
    };

    let mut update_doc = match mongodb::bson::to_document(&input.into_inner()) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("Failed to serialize user update: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid user update");
        }
    };

    if update_doc.is_empty() {
        return HttpResponse::BadRequest().body("At least one field must be provided");
    }

    update_doc.insert("updated_at", Utc::now().to_rfc3339());

    match collection
        .update_one(doc! { "_id": user_id }, doc! { "$set": update_doc })
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("User not found");
            }
            HttpResponse::Ok().body("User updated")
        }
        Err(err) => {
            eprintln!("Error updating user: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update user")
        }
    }
}
