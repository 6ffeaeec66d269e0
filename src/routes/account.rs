use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::user::{Credentials, StaffUser, UserRole, UserSession};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    auth_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
}

pub async fn signup(
    data: web::Data<Arc<Client>>,
    input: web::Json<SignupInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<StaffUser> =
        client.database("Account").collection("Users");

    let input = input.into_inner();

    if !is_valid_email(&input.email) {
        return HttpResponse::BadRequest().body("Invalid email address");
    }

    match collection.find_one(doc! { "email": &input.email }).await {
        Ok(Some(_)) => return HttpResponse::Conflict().body("Email already registered"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("Failed to check for existing user: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to create account.");
        }
    }

    let curr_time = Utc::now();
    let role = input.role.unwrap_or(UserRole::Staff);

    let user = StaffUser {
        id: None,
        name: input.name,
        email: input.email,
        password: bcrypt::hash(input.password, bcrypt::DEFAULT_COST).unwrap_or("".to_string()),
        role,
        status: "active".to_string(),
        avatar_url: None,
        last_active: None,
        failed_signins: None,
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match collection.insert_one(&user).await {
        Ok(result) => {
            match generate_token(&user.email, result.inserted_id.as_object_id().unwrap(), role) {
                Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
                Err(_) => HttpResponse::InternalServerError().body("Token generation failed"),
            }
        }
        Err(err) => {
            eprintln!("Failed to insert document: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create account.")
        }
    }
}

pub async fn signin(
    data: web::Data<Arc<Client>>,
    input: web::Json<Credentials>,
) -> impl Responder {
    authenticate(data.into_inner().as_ref().clone(), input.into_inner(), None).await
}

/// Sign-in used by the owner portal. Identical to [`signin`] except that
/// only accounts with the `owner` role are accepted.
pub async fn owner_signin(
    data: web::Data<Arc<Client>>,
    input: web::Json<Credentials>,
) -> impl Responder {
    authenticate(data.into_inner().as_ref().clone(), input.into_inner(), Some(UserRole::Owner)).await
}

async fn authenticate(
    client: Arc<Client>,
    credentials: Credentials,
    required_role: Option<UserRole>,
) -> HttpResponse {
    let collection: mongodb::Collection<StaffUser> =
        client.database("Account").collection("Users");

    let email = credentials.email;
    let filter = doc! { "email": &email };

    match collection.find_one(filter).await {
        Ok(Some(user)) => {
            if let Some(required) = required_role {
                if user.role != required {
                    return HttpResponse::Forbidden().body("Not an owner account");
                }
            }

            if bcrypt::verify(&credentials.password, &user.password).unwrap_or(false) {
                let update = doc! {
                    "$set": {
                        "last_active": Utc::now().to_rfc3339(),
                        "failed_signins": 0
                    }
                };

                match collection.update_one(doc! { "email": &email }, update).await {
                    Ok(_) => {
                        let user_id = match user.id {
                            Some(id) => id,
                            None => {
                                return HttpResponse::InternalServerError()
                                    .body("Unable to read user id")
                            }
                        };

                        match generate_token(&email, user_id, user.role) {
                            Ok(token) => {
                                HttpResponse::Ok().json(TokenResponse { auth_token: token })
                            }
                            Err(_) => HttpResponse::InternalServerError()
                                .body("Token generation failed"),
                        }
                    }
                    Err(err) => {
                        eprintln!("Failed to update document: {:?}", err);
                        HttpResponse::InternalServerError().body("Failed to sign in.")
                    }
                }
            } else {
                let failed_signins = user.failed_signins.unwrap_or(0) + 1;
                let update = doc! {
                    "$set": { "failed_signins": failed_signins }
                };

                match collection.update_one(doc! { "email": &email }, update).await {
                    Ok(_) => HttpResponse::Unauthorized().body("Invalid credentials"),
                    Err(err) => {
                        eprintln!("Failed to update failed signins: {:?}", err);
                        HttpResponse::InternalServerError().body("Failed to process signin")
                    }
                }
            }
        }
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            eprintln!("Database error: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to process signin")
        }
    }
}

pub async fn user_session(claims: Claims, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<StaffUser> =
        client.database("Account").collection("Users");

    let user_id = ObjectId::parse_str(&claims.user_id)
        .map_err(|_| HttpResponse::BadRequest().body("Invalid user ID"));
    match user_id {
        Ok(user_id) => match collection.find_one(doc! { "_id": user_id }).await {
            Ok(Some(user)) => {
                let user_session = UserSession {
                    id: user.id.unwrap_or_default(),
                    name: user.name,
                    email: user.email,
                    role: user.role,
                    created_at: user.created_at.unwrap_or_default(),
                };
                HttpResponse::Ok().json(user_session)
            }
            Ok(None) => HttpResponse::NotFound().body("User not found"),
            Err(err) => {
                eprintln!("Failed to fetch user: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch user")
            }
        },
        Err(resp) => resp,
    }
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    re.unwrap().is_match(email)
}

fn generate_token(
    email: &str,
    user_id: ObjectId,
    role: UserRole,
) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let now = Utc::now();

    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        user_id: user_id.to_string(),
        role: Some(role.as_str().to_string()),
    };

    let header = Header::new(Algorithm::HS256);
    encode(&header, &claims, &EncodingKey::from_secret(secret.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("front.desk@hostly.example"));
        assert!(is_valid_email("owner+villa9@gmail.com"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@domain@twice.com"));
        assert!(!is_valid_email("trailing.dot@example."));
    }
}
