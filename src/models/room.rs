use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
    Maintenance,
    OutOfOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub capacity: i32,
    pub rate: f64,
    pub status: RoomStatus,
    pub floor: String,
    pub description: Option<String>,
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<ObjectId>,
    #[serde(rename = "lastCleaned", skip_serializing_if = "Option::is_none")]
    pub last_cleaned: Option<NaiveDate>,
    #[serde(rename = "nextCheckIn", skip_serializing_if = "Option::is_none")]
    pub next_check_in: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct RoomInput {
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub capacity: i32,
    pub rate: f64,
    pub status: Option<RoomStatus>,
    pub floor: String,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub property_id: Option<ObjectId>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(rename = "lastCleaned", skip_serializing_if = "Option::is_none")]
    pub last_cleaned: Option<NaiveDate>,
    #[serde(rename = "nextCheckIn", skip_serializing_if = "Option::is_none")]
    pub next_check_in: Option<NaiveDate>,
}
