use crate::models::bookings::{Booking, EnrichedBooking, PaymentStatus};

/// Commission withheld by the agency when none was negotiated per booking.
pub const COMMISSION_RATE: f64 = 0.10;
/// Municipal tourism fee charged on the gross amount.
pub const TOURISM_FEE_RATE: f64 = 0.03;
pub const VAT_RATE: f64 = 0.05;
/// Share remitted to the property owner after commission, fee and VAT.
pub const NET_TO_OWNER_RATE: f64 = 0.82;
/// Nightly base portion of the gross amount, before extras.
pub const BASE_RATE_SHARE: f64 = 0.80;
pub const DEFAULT_SECURITY_DEPOSIT: f64 = 100.0;

pub struct FinanceService;

impl FinanceService {
    /// Fill in every derived or defaultable field of a booking record.
    ///
    /// Presence decides everything: a field that arrived from the store is
    /// kept verbatim, including an explicit 0 or empty string, and only a
    /// genuinely absent field falls back to its derived value. A missing
    /// gross amount counts as 0, which makes every percentage-derived
    /// default 0 as well. Total over any input, never fails.
    pub fn enrich(booking: &Booking) -> EnrichedBooking {
        let amount = booking.amount.unwrap_or(0.0);

        EnrichedBooking {
            id: booking.id,
            room_id: booking.room_id,
            booking_number: booking.booking_number.clone(),
            guest_name: booking.guest_name.clone(),
            check_in: booking.check_in,
            check_out: booking.check_out,
            amount,
            status: booking.status,
            payment_status: booking.payment_status.unwrap_or(PaymentStatus::Pending),
            guest_email: booking.guest_email.clone().unwrap_or_default(),
            guest_phone: booking.guest_phone.clone().unwrap_or_default(),
            guest_document: booking.guest_document.clone().unwrap_or_default(),
            adults: booking.adults.unwrap_or(1),
            children: booking.children.unwrap_or(0),
            base_rate: booking.base_rate.unwrap_or(amount * BASE_RATE_SHARE),
            security_deposit: booking
                .security_deposit
                .unwrap_or(DEFAULT_SECURITY_DEPOSIT),
            commission: booking.commission.unwrap_or(amount * COMMISSION_RATE),
            tourism_fee: booking.tourism_fee.unwrap_or(amount * TOURISM_FEE_RATE),
            vat: booking.vat.unwrap_or(amount * VAT_RATE),
            net_to_owner: booking.net_to_owner.unwrap_or(amount * NET_TO_OWNER_RATE),
            amount_paid: booking.amount_paid.unwrap_or(0.0),
            // Nothing recorded as paid yet means the full amount is outstanding
            pending_amount: booking.pending_amount.unwrap_or(amount),
            special_requests: booking.special_requests.clone().unwrap_or_default(),
            notes: booking.notes.clone().unwrap_or_default(),
            property_id: booking.property_id,
            guest_id: booking.guest_id,
            created_by: booking.created_by,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }

    /// Enrich every record of a fetched list, preserving order.
    pub fn enrich_all(bookings: Vec<Booking>) -> Vec<EnrichedBooking> {
        bookings.iter().map(Self::enrich).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bookings::BookingStatus;
    use chrono::NaiveDate;
    use mongodb::bson::oid::ObjectId;

    fn raw_booking(amount: Option<f64>) -> Booking {
        Booking {
            id: Some(ObjectId::new()),
            room_id: ObjectId::new(),
            booking_number: "BK-A1B2C3D4".to_string(),
            guest_name: "Lena Ortiz".to_string(),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            amount,
            status: BookingStatus::Confirmed,
            payment_status: None,
            guest_email: None,
            guest_phone: None,
            guest_document: None,
            adults: None,
            children: None,
            base_rate: None,
            security_deposit: None,
            commission: None,
            tourism_fee: None,
            vat: None,
            net_to_owner: None,
            amount_paid: None,
            pending_amount: None,
            special_requests: None,
            notes: None,
            property_id: None,
            guest_id: None,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn derives_all_defaults_from_amount() {
        let enriched = FinanceService::enrich(&raw_booking(Some(450.0)));

        assert_eq!(enriched.amount, 450.0);
        assert_eq!(enriched.commission, 45.0);
        assert_eq!(enriched.tourism_fee, 13.5);
        assert_eq!(enriched.vat, 22.5);
        assert_eq!(enriched.net_to_owner, 369.0);
        assert_eq!(enriched.base_rate, 360.0);
        assert_eq!(enriched.security_deposit, 100.0);
        assert_eq!(enriched.pending_amount, 450.0);
        assert_eq!(enriched.amount_paid, 0.0);
        assert_eq!(enriched.adults, 1);
        assert_eq!(enriched.children, 0);
        assert_eq!(enriched.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn missing_amount_zeroes_percentage_fields() {
        let enriched = FinanceService::enrich(&raw_booking(None));

        assert_eq!(enriched.amount, 0.0);
        assert_eq!(enriched.commission, 0.0);
        assert_eq!(enriched.tourism_fee, 0.0);
        assert_eq!(enriched.vat, 0.0);
        assert_eq!(enriched.net_to_owner, 0.0);
        assert_eq!(enriched.base_rate, 0.0);
        assert_eq!(enriched.pending_amount, 0.0);
        // The deposit is a flat default, not derived from the amount
        assert_eq!(enriched.security_deposit, 100.0);
    }

    #[test]
    fn explicit_zero_is_preserved() {
        let mut booking = raw_booking(Some(200.0));
        booking.commission = Some(0.0);
        booking.security_deposit = Some(0.0);

        let enriched = FinanceService::enrich(&booking);
        assert_eq!(enriched.commission, 0.0);
        assert_eq!(enriched.security_deposit, 0.0);
        // Untouched fields still derive from the amount
        assert_eq!(enriched.vat, 10.0);
    }

    #[test]
    fn supplied_values_win_over_derivation() {
        let mut booking = raw_booking(Some(1000.0));
        booking.commission = Some(75.0);
        booking.net_to_owner = Some(900.0);
        booking.adults = Some(4);
        booking.amount_paid = Some(250.0);
        booking.pending_amount = Some(750.0);

        let enriched = FinanceService::enrich(&booking);
        assert_eq!(enriched.commission, 75.0);
        assert_eq!(enriched.net_to_owner, 900.0);
        assert_eq!(enriched.adults, 4);
        assert_eq!(enriched.amount_paid, 250.0);
        assert_eq!(enriched.pending_amount, 750.0);
        assert_eq!(enriched.tourism_fee, 30.0);
    }

    #[test]
    fn string_fields_default_to_empty() {
        let enriched = FinanceService::enrich(&raw_booking(Some(300.0)));
        assert_eq!(enriched.guest_email, "");
        assert_eq!(enriched.guest_phone, "");
        assert_eq!(enriched.guest_document, "");
        assert_eq!(enriched.special_requests, "");
        assert_eq!(enriched.notes, "");
    }

    #[test]
    fn explicit_empty_contact_fields_are_kept() {
        let mut booking = raw_booking(Some(300.0));
        booking.guest_email = Some(String::new());
        booking.guest_phone = Some("+971 50 000 0000".to_string());

        let enriched = FinanceService::enrich(&booking);
        assert_eq!(enriched.guest_email, "");
        assert_eq!(enriched.guest_phone, "+971 50 000 0000");
    }

    #[test]
    fn enrichment_is_idempotent() {
        let mut booking = raw_booking(Some(640.0));
        booking.commission = Some(0.0);
        booking.guest_email = Some("lena@example.com".to_string());

        let once = FinanceService::enrich(&booking);
        let twice = FinanceService::enrich(&Booking::from(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn batch_enrichment_preserves_order() {
        let bookings = vec![raw_booking(Some(100.0)), raw_booking(None)];
        let enriched = FinanceService::enrich_all(bookings);

        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].commission, 10.0);
        assert_eq!(enriched[1].commission, 0.0);
        assert_eq!(enriched[0].pending_amount, 100.0);
        assert_eq!(enriched[1].pending_amount, 0.0);
    }
}
