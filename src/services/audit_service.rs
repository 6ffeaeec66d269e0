use chrono::Utc;
use mongodb::bson::{oid::ObjectId, Document};
use mongodb::Client;

use crate::models::audit::AuditLog;

pub struct AuditService;

impl AuditService {
    /// Append an entry to the audit trail. Failures are logged and
    /// swallowed; the trail never fails the request that produced it.
    pub async fn record(
        client: &Client,
        action: &str,
        resource_type: &str,
        resource_id: &str,
        user_id: Option<ObjectId>,
        details: Option<Document>,
    ) {
        let entry = AuditLog {
            id: None,
            action: action.to_string(),
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            user_id,
            details,
            created_at: Some(Utc::now()),
        };

        let collection: mongodb::Collection<AuditLog> =
            client.database("System").collection("AuditLogs");

        if let Err(err) = collection.insert_one(&entry).await {
            eprintln!("Failed to record audit entry for {}: {:?}", action, err);
        }
    }
}
