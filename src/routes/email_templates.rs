use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use std::sync::Arc;

use crate::models::email_template::{EmailTemplate, EmailTemplateUpdate};

fn templates_collection(client: &Client) -> mongodb::Collection<EmailTemplate> {
    client.database("System").collection("EmailTemplates")
}

pub async fn get_email_templates(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = templates_collection(&client);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<EmailTemplate>>().await {
            Ok(templates) => HttpResponse::Ok().json(templates),
            Err(err) => {
                eprintln!("Error retrieving email templates: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve email templates")
            }
        },
        Err(err) => {
            eprintln!("Error fetching email templates: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch email templates")
        }
    }
}

pub async fn create_email_template(
    data: web::Data<Arc<Client>>,
    input: web::Json<EmailTemplate>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = templates_collection(&client);

    let mut template = input.into_inner();

    match collection.find_one(doc! { "name": &template.name }).await {
        Ok(Some(_)) => return HttpResponse::Conflict().body("Template name already exists"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("Error checking for existing template: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to check for templates");
        }
    }

    let time = Utc::now();
    template.id = None;
    template.created_at = Some(time);
    template.updated_at = Some(time);

    match collection.insert_one(&template).await {
        Ok(insert_result) => {
            template.id = insert_result.inserted_id.as_object_id();
            HttpResponse::Ok().json(template)
        }
        Err(err) => {
            eprintln!("Error creating email template: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create email template")
        }
    }
}

pub async fn update_email_template(
    data: web::Data<Arc<Client>>,
    input: web::Json<EmailTemplateUpdate>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = templates_collection(&client);

    let template_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid template ID format"),
    };

    let mut update_doc = match mongodb::bson::to_document(&input.into_inner()) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("Failed to serialize template update: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid template update");
        }
    };

    if update_doc.is_empty() {
        return HttpResponse::BadRequest().body("At least one field must be provided");
    }

    update_doc.insert("updated_at", Utc::now().to_rfc3339());

    match collection
        .update_one(doc! { "_id": template_id }, doc! { "$set": update_doc })
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Email template not found");
            }
            HttpResponse::Ok().body("Email template updated")
        }
        Err(err) => {
            eprintln!("Error updating email template: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update email template")
        }
    }
}
