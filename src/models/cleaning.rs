use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleaningStatus {
    Pending,
    InProgress,
    Completed,
    Verified,
    Issues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningTask {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub room_id: ObjectId,
    pub date: NaiveDate,
    pub assigned_to: ObjectId,
    pub status: CleaningStatus,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<ObjectId>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CleaningTaskInput {
    pub room_id: ObjectId,
    pub date: NaiveDate,
    pub assigned_to: ObjectId,
    pub status: Option<CleaningStatus>,
    pub notes: Option<String>,
    pub property_id: Option<ObjectId>,
}
