use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Partial,
    Refunded,
    Failed,
}

/// Booking record as stored by the backend. Everything beyond the base
/// reservation columns is optional: older records predate the financial
/// fields, and channel imports omit guest contact details entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub room_id: ObjectId,
    pub booking_number: String,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    // Channel feeds have been seen sending the amount as a quoted string
    #[serde(default, deserialize_with = "amount_lenient")]
    pub amount: Option<f64>,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(rename = "guestEmail", skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(rename = "guestPhone", skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(rename = "guestDocument", skip_serializing_if = "Option::is_none")]
    pub guest_document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adults: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<i32>,
    #[serde(rename = "baseRate", skip_serializing_if = "Option::is_none")]
    pub base_rate: Option<f64>,
    #[serde(rename = "securityDeposit", skip_serializing_if = "Option::is_none")]
    pub security_deposit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(rename = "tourismFee", skip_serializing_if = "Option::is_none")]
    pub tourism_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<f64>,
    #[serde(rename = "netToOwner", skip_serializing_if = "Option::is_none")]
    pub net_to_owner: Option<f64>,
    #[serde(rename = "amountPaid", skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
    #[serde(rename = "pendingAmount", skip_serializing_if = "Option::is_none")]
    pub pending_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ObjectId>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fully populated booking handed to clients. Same shape as [`Booking`]
/// but every defaultable field is guaranteed present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBooking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub room_id: ObjectId,
    pub booking_number: String,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub amount: f64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    #[serde(rename = "guestEmail")]
    pub guest_email: String,
    #[serde(rename = "guestPhone")]
    pub guest_phone: String,
    #[serde(rename = "guestDocument")]
    pub guest_document: String,
    pub adults: i32,
    pub children: i32,
    #[serde(rename = "baseRate")]
    pub base_rate: f64,
    #[serde(rename = "securityDeposit")]
    pub security_deposit: f64,
    pub commission: f64,
    #[serde(rename = "tourismFee")]
    pub tourism_fee: f64,
    pub vat: f64,
    #[serde(rename = "netToOwner")]
    pub net_to_owner: f64,
    #[serde(rename = "amountPaid")]
    pub amount_paid: f64,
    #[serde(rename = "pendingAmount")]
    pub pending_amount: f64,
    pub special_requests: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ObjectId>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<EnrichedBooking> for Booking {
    fn from(enriched: EnrichedBooking) -> Self {
        Booking {
            id: enriched.id,
            room_id: enriched.room_id,
            booking_number: enriched.booking_number,
            guest_name: enriched.guest_name,
            check_in: enriched.check_in,
            check_out: enriched.check_out,
            amount: Some(enriched.amount),
            status: enriched.status,
            payment_status: Some(enriched.payment_status),
            guest_email: Some(enriched.guest_email),
            guest_phone: Some(enriched.guest_phone),
            guest_document: Some(enriched.guest_document),
            adults: Some(enriched.adults),
            children: Some(enriched.children),
            base_rate: Some(enriched.base_rate),
            security_deposit: Some(enriched.security_deposit),
            commission: Some(enriched.commission),
            tourism_fee: Some(enriched.tourism_fee),
            vat: Some(enriched.vat),
            net_to_owner: Some(enriched.net_to_owner),
            amount_paid: Some(enriched.amount_paid),
            pending_amount: Some(enriched.pending_amount),
            special_requests: Some(enriched.special_requests),
            notes: Some(enriched.notes),
            property_id: enriched.property_id,
            guest_id: enriched.guest_id,
            created_by: enriched.created_by,
            created_at: enriched.created_at,
            updated_at: enriched.updated_at,
        }
    }
}

/// Body of POST /bookings. The booking number, timestamps and creator are
/// filled in server-side.
#[derive(Debug, Deserialize)]
pub struct BookingInput {
    pub room_id: ObjectId,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default, deserialize_with = "amount_lenient")]
    pub amount: Option<f64>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    #[serde(rename = "guestEmail")]
    pub guest_email: Option<String>,
    #[serde(rename = "guestPhone")]
    pub guest_phone: Option<String>,
    #[serde(rename = "guestDocument")]
    pub guest_document: Option<String>,
    pub adults: Option<i32>,
    pub children: Option<i32>,
    #[serde(rename = "baseRate")]
    pub base_rate: Option<f64>,
    #[serde(rename = "securityDeposit")]
    pub security_deposit: Option<f64>,
    pub commission: Option<f64>,
    #[serde(rename = "tourismFee")]
    pub tourism_fee: Option<f64>,
    pub vat: Option<f64>,
    #[serde(rename = "netToOwner")]
    pub net_to_owner: Option<f64>,
    #[serde(rename = "amountPaid")]
    pub amount_paid: Option<f64>,
    #[serde(rename = "pendingAmount")]
    pub pending_amount: Option<f64>,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
    pub property_id: Option<ObjectId>,
    pub guest_id: Option<ObjectId>,
    #[serde(rename = "sendConfirmation", default)]
    pub send_confirmation: bool,
}

/// Partial update body for PUT /bookings/{id}. Only fields present in the
/// request make it into the `$set` document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "amount_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(rename = "guestEmail", skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(rename = "guestPhone", skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(rename = "guestDocument", skip_serializing_if = "Option::is_none")]
    pub guest_document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adults: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<i32>,
    #[serde(rename = "baseRate", skip_serializing_if = "Option::is_none")]
    pub base_rate: Option<f64>,
    #[serde(rename = "securityDeposit", skip_serializing_if = "Option::is_none")]
    pub security_deposit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(rename = "tourismFee", skip_serializing_if = "Option::is_none")]
    pub tourism_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<f64>,
    #[serde(rename = "netToOwner", skip_serializing_if = "Option::is_none")]
    pub net_to_owner: Option<f64>,
    #[serde(rename = "amountPaid", skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
    #[serde(rename = "pendingAmount", skip_serializing_if = "Option::is_none")]
    pub pending_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Accepts a number, a numeric string, or anything else (treated as absent).
/// Imported feeds are not trusted to send a clean number here.
fn amount_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Number(n)) => Some(n),
        Some(RawAmount::Text(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_json(amount: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "room_id": ObjectId::new(),
            "booking_number": "BK-TEST0001",
            "guest_name": "Dana Reyes",
            "check_in": "2025-06-01",
            "check_out": "2025-06-05",
            "amount": amount,
            "status": "confirmed",
            "created_at": null,
            "updated_at": null
        })
    }

    #[test]
    fn amount_accepts_number() {
        let booking: Booking = serde_json::from_value(booking_json(450.0.into())).unwrap();
        assert_eq!(booking.amount, Some(450.0));
    }

    #[test]
    fn amount_accepts_numeric_string() {
        let booking: Booking = serde_json::from_value(booking_json("450.5".into())).unwrap();
        assert_eq!(booking.amount, Some(450.5));
    }

    #[test]
    fn amount_null_and_garbage_are_absent() {
        let booking: Booking =
            serde_json::from_value(booking_json(serde_json::Value::Null)).unwrap();
        assert_eq!(booking.amount, None);

        let booking: Booking = serde_json::from_value(booking_json("TBD".into())).unwrap();
        assert_eq!(booking.amount, None);
    }

    #[test]
    fn amount_missing_is_absent() {
        let mut value = booking_json(0.into());
        value.as_object_mut().unwrap().remove("amount");
        let booking: Booking = serde_json::from_value(value).unwrap();
        assert_eq!(booking.amount, None);
    }

    #[test]
    fn explicit_zero_commission_survives_deserialization() {
        let mut value = booking_json(200.into());
        value
            .as_object_mut()
            .unwrap()
            .insert("commission".to_string(), 0.into());
        let booking: Booking = serde_json::from_value(value).unwrap();
        assert_eq!(booking.commission, Some(0.0));
    }

    #[test]
    fn status_uses_wire_names() {
        assert_eq!(
            serde_json::to_value(BookingStatus::CheckedIn).unwrap(),
            serde_json::json!("checked-in")
        );
        assert_eq!(
            serde_json::to_value(BookingStatus::NoShow).unwrap(),
            serde_json::json!("no-show")
        );
        assert_eq!(
            serde_json::to_value(PaymentStatus::Partial).unwrap(),
            serde_json::json!("partial")
        );
    }
}
