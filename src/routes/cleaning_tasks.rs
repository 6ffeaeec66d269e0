use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::cleaning::{CleaningStatus, CleaningTask, CleaningTaskInput};
use crate::models::room::Room;
use crate::models::user::UserRole;

#[derive(Debug, Deserialize)]
pub struct CleaningStatusInput {
    pub status: CleaningStatus,
}

fn tasks_collection(client: &Client) -> mongodb::Collection<CleaningTask> {
    client.database("Operations").collection("CleaningTasks")
}

pub async fn get_cleaning_tasks(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = tasks_collection(&client);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<CleaningTask>>().await {
            Ok(tasks) => HttpResponse::Ok().json(tasks),
            Err(err) => {
                eprintln!("Error retrieving cleaning tasks: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve cleaning tasks")
            }
        },
        Err(err) => {
            eprintln!("Error fetching cleaning tasks: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch cleaning tasks")
        }
    }
}

pub async fn create_cleaning_task(
    data: web::Data<Arc<Client>>,
    input: web::Json<CleaningTaskInput>,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    // Tasks are scheduled against a concrete room
    let rooms: mongodb::Collection<Room> = client.database("Property").collection("Rooms");
    match rooms.find_one(doc! { "_id": input.room_id }).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Room not found"),
        Err(err) => {
            eprintln!("Error checking room: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to check room");
        }
    }

    let collection = tasks_collection(&client);
    let time = Utc::now();

    let mut task = CleaningTask {
        id: None,
        room_id: input.room_id,
        date: input.date,
        assigned_to: input.assigned_to,
        status: input.status.unwrap_or(CleaningStatus::Pending),
        notes: input.notes,
        property_id: input.property_id,
        created_at: Some(time),
        updated_at: Some(time),
    };

    match collection.insert_one(&task).await {
        Ok(insert_result) => {
            task.id = insert_result.inserted_id.as_object_id();
            HttpResponse::Ok().json(task)
        }
        Err(err) => {
            eprintln!("Error creating cleaning task: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create cleaning task")
        }
    }
}

pub async fn update_cleaning_task_status(
    data: web::Data<Arc<Client>>,
    input: web::Json<CleaningStatusInput>,
    path: web::Path<String>,
    user: AuthenticatedUser,
) -> impl Responder {
    let client = data.into_inner();
    let collection = tasks_collection(&client);

    let task_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid task ID format"),
    };

    let status = input.status;
    let status_bson = match mongodb::bson::to_bson(&status) {
        Ok(bson) => bson,
        Err(err) => {
            eprintln!("Failed to serialize cleaning status: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid cleaning status");
        }
    };

    let task = match collection.find_one(doc! { "_id": task_id }).await {
        Ok(Some(task)) => task,
        Ok(None) => return HttpResponse::NotFound().body("Cleaning task not found"),
        Err(err) => {
            eprintln!("Error fetching cleaning task: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch cleaning task");
        }
    };

    // Cleaners can only report on tasks assigned to them
    if user.role == UserRole::Cleaner
        && ObjectId::parse_str(&user.user_id).ok() != Some(task.assigned_to)
    {
        return HttpResponse::Forbidden().body("Task is assigned to another cleaner");
    }

    let update = doc! {
        "$set": {
            "status": status_bson,
            "updated_at": Utc::now().to_rfc3339()
        }
    };

    match collection.update_one(doc! { "_id": task_id }, update).await {
        Ok(_) => {
            // A finished clean returns the room to the bookable pool
            if matches!(status, CleaningStatus::Completed | CleaningStatus::Verified) {
                let rooms: mongodb::Collection<Room> =
                    client.database("Property").collection("Rooms");
                let room_update = doc! {
                    "$set": {
                        "status": "available",
                        "lastCleaned": task.date.to_string(),
                        "updated_at": Utc::now().to_rfc3339()
                    }
                };
                if let Err(err) = rooms
                    .update_one(doc! { "_id": task.room_id }, room_update)
                    .await
                {
                    eprintln!("Failed to release room after cleaning: {:?}", err);
                }
            }

            HttpResponse::Ok().body("Cleaning task status updated")
        }
        Err(err) => {
            eprintln!("Error updating cleaning task: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update cleaning task")
        }
    }
}
