use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Client;
use std::sync::Arc;

use crate::models::audit::AuditLog;

pub async fn get_audit_logs(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<AuditLog> =
        client.database("System").collection("AuditLogs");

    match collection
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<AuditLog>>().await {
            Ok(logs) => HttpResponse::Ok().json(logs),
            Err(err) => {
                eprintln!("Error retrieving audit logs: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve audit logs")
            }
        },
        Err(err) => {
            eprintln!("Error fetching audit logs: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch audit logs")
        }
    }
}
