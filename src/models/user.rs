use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Staff,
    Cleaner,
    Owner,
    Guest,
}

impl UserRole {
    pub fn from_str_or_guest(role: &str) -> Self {
        match role {
            "admin" => UserRole::Admin,
            "manager" => UserRole::Manager,
            "staff" => UserRole::Staff,
            "cleaner" => UserRole::Cleaner,
            "owner" => UserRole::Owner,
            _ => UserRole::Guest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Staff => "staff",
            UserRole::Cleaner => "cleaner",
            UserRole::Owner => "owner",
            UserRole::Guest => "guest",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub password: String, // Always hashed
    pub role: UserRole,
    pub status: String,
    pub avatar_url: Option<String>,
    // Security related fields
    pub last_active: Option<DateTime<Utc>>,
    pub failed_signins: Option<i32>,
    // We always want these fields, but have them optional so we can set them in the code
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Projection returned by GET /auth/session. Never carries the password hash.
#[derive(Serialize, Deserialize)]
pub struct UserSession {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
