use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::doc, Client};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(client: web::Data<Arc<Client>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_result = check_mongodb(&client).await;
    health
        .services
        .insert("mongodb".to_string(), mongo_result.clone());

    // Email is optional but the dashboard wants to know when it is down
    let sendgrid_result = check_sendgrid();
    health
        .services
        .insert("sendgrid".to_string(), sendgrid_result.clone());

    if mongo_result.status != "ok" || sendgrid_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(client: &web::Data<Arc<Client>>) -> ServiceStatus {
    match client
        .database("Operations")
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to MongoDB".to_string()),
        },
        Err(e) => {
            eprintln!("MongoDB health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    }
}

fn check_sendgrid() -> ServiceStatus {
    // Just validate key existence for basic check
    let api_key = env::var("SENDGRID_API_KEY").ok();
    let from_address = env::var("EMAIL_FROM_ADDRESS").ok();

    if api_key.is_none() || from_address.is_none() {
        let mut missing = Vec::new();

        if api_key.is_none() {
            missing.push("SENDGRID_API_KEY");
        }
        if from_address.is_none() {
            missing.push("EMAIL_FROM_ADDRESS");
        }

        return ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("Missing configuration: {}", missing.join(", "))),
        };
    }

    let key = api_key.unwrap();
    let masked_key = if key.len() > 8 {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "***".to_string()
    };

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "SendGrid configured, key: {}, from: {}",
            masked_key,
            from_address.unwrap()
        )),
    }
}
