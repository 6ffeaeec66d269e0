use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::expense::{Expense, ExpenseUpdate};

fn expenses_collection(client: &Client) -> mongodb::Collection<Expense> {
    client.database("Operations").collection("Expenses")
}

/// Newest first, the order the expense ledger page shows them.
pub async fn get_expenses(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = expenses_collection(&client);

    match collection.find(doc! {}).sort(doc! { "date": -1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Expense>>().await {
            Ok(expenses) => HttpResponse::Ok().json(expenses),
            Err(err) => {
                eprintln!("Error retrieving expenses: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve expenses")
            }
        },
        Err(err) => {
            eprintln!("Error fetching expenses: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch expenses")
        }
    }
}

pub async fn get_expense_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = expenses_collection(&client);

    let expense_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid expense ID format"),
    };

    match collection.find_one(doc! { "_id": expense_id }).await {
        Ok(Some(expense)) => HttpResponse::Ok().json(expense),
        Ok(None) => HttpResponse::NotFound().body("Expense not found"),
        Err(err) => {
            eprintln!("Error fetching expense: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch expense")
        }
    }
}

pub async fn create_expense(
    data: web::Data<Arc<Client>>,
    input: web::Json<Expense>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection = expenses_collection(&client);

    let time = Utc::now();
    let mut expense = input.into_inner();
    expense.id = None;
    expense.created_by = ObjectId::parse_str(&claims.user_id).ok();
    expense.created_at = Some(time);
    expense.updated_at = Some(time);

    match collection.insert_one(&expense).await {
        Ok(insert_result) => {
            expense.id = insert_result.inserted_id.as_object_id();
            HttpResponse::Ok().json(expense)
        }
        Err(err) => {
            eprintln!("Error creating expense: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create expense")
        }
    }
}

pub async fn update_expense(
    data: web::Data<Arc<Client>>,
    input: web::Json<ExpenseUpdate>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = expenses_collection(&client);

    let expense_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid expense ID format"),
    };

    let mut update_doc = match mongodb::bson::to_document(&input.into_inner()) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("Failed to serialize expense update: {:?}", err);
            return HttpResponse::BadRequest().body("Invalid expense update");
        }
    };

    if update_doc.is_empty() {
        return HttpResponse::BadRequest().body("At least one field must be provided");
    }

    update_doc.insert("updated_at", Utc::now().to_rfc3339());

    match collection
        .update_one(doc! { "_id": expense_id }, doc! { "$set": update_doc })
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Expense not found");
            }
            HttpResponse::Ok().body("Expense updated")
        }
        Err(err) => {
            eprintln!("Error updating expense: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update expense")
        }
    }
}
