//! Status rules for the check-in lifecycle. The edges of the state machine
//! live here so handlers only apply transitions this module has approved.

use crate::helper_model::{CheckInServiceInput, WashlineError};
use crate::model::{CheckIn, CheckInStatus, Service, WashType};
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Africa::Lagos;

/// pending -> in_progress -> completed -> paid, with cancellation possible
/// from pending or in_progress only. Cancelled is terminal.
pub fn transition_allowed(from: &CheckInStatus, to: &CheckInStatus) -> bool {
    matches!(
        (from, to),
        (CheckInStatus::Pending, CheckInStatus::InProgress)
            | (CheckInStatus::InProgress, CheckInStatus::Completed)
            | (CheckInStatus::Completed, CheckInStatus::Paid)
            | (CheckInStatus::Pending, CheckInStatus::Cancelled)
            | (CheckInStatus::InProgress, CheckInStatus::Cancelled)
    )
}

/// Instant washes never prompt for a passcode; neither do check-ins that were
/// created without one.
pub fn completion_requires_passcode(wash_type: &WashType, stored: Option<&str>) -> bool {
    if *wash_type == WashType::Instant {
        return false;
    }
    stored.map(|code| !code.is_empty()).unwrap_or(false)
}

pub fn verify_passcode(
    wash_type: &WashType,
    stored: Option<&str>,
    supplied: Option<&str>,
) -> Result<(), WashlineError> {
    if !completion_requires_passcode(wash_type, stored) {
        return Ok(());
    }
    match supplied {
        Some(code) if Some(code) == stored => Ok(()),
        _ => Err(WashlineError::NotAllowed),
    }
}

/// Completion is gated on the customer's passcode (user_code). The security
/// code is a separate credential and never unlocks completion.
pub fn verify_completion_passcode(
    check_in: &CheckIn,
    supplied: Option<&str>,
) -> Result<(), WashlineError> {
    verify_passcode(&check_in.wash_type, check_in.user_code.as_deref(), supplied)
}

/// Effective price of one service line. Zero-priced services must carry a
/// positive custom price; the error names the service for the operator.
pub fn line_effective_price(service: &Service, custom_price: Option<f64>) -> Result<f64, WashlineError> {
    if service.price > 0.0 {
        return Ok(custom_price.unwrap_or(service.price));
    }
    match custom_price {
        Some(price) if price > 0.0 => Ok(price),
        _ => Err(WashlineError::Validation(format!(
            "Custom price is required for service: {}",
            service.name
        ))),
    }
}

/// Total price and estimated duration for a set of selected service lines.
/// The inputs must already be joined to their Service rows, in order.
pub fn price_and_duration(
    lines: &[(CheckInServiceInput, Service)],
) -> Result<(f64, i32), WashlineError> {
    if lines.is_empty() {
        return Err(WashlineError::Validation(String::from(
            "At least one service must be selected.",
        )));
    }
    let mut total = 0.0;
    let mut duration = 0;
    for (input, service) in lines {
        total += line_effective_price(service, input.custom_price)?;
        duration += service.duration_minutes;
    }
    Ok((total, duration))
}

pub fn washer_share(price: f64, washer_commission_percentage: f64) -> f64 {
    price * washer_commission_percentage / 100.0
}

/// UTC bounds of the current business-local calendar day. Duplicate plate
/// detection compares against check-ins inside this window.
pub fn business_day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_date = now.with_timezone(&Lagos).date_naive();
    let start_local = Lagos
        .from_local_datetime(&local_date.and_hms_opt(0, 0, 0).unwrap())
        .single()
        .unwrap();
    let start = start_local.with_timezone(&Utc);
    (start, start + Duration::days(1))
}

/// Whether an assigned stock line can absorb another usage entry once the
/// quantity already logged against it is accounted for.
pub fn stock_covers(stock_quantity: i32, already_used: i64, requested: i32) -> bool {
    i64::from(requested) <= i64::from(stock_quantity) - already_used
}

pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PaymentStatus, PublishCheckIn, ServiceCategory};

    fn service(name: &str, price: f64, duration: i32) -> Service {
        Service {
            id: 1,
            name: name.to_string(),
            description: None,
            price,
            duration_minutes: duration,
            category: ServiceCategory::Exterior,
            washer_commission_percentage: 40.0,
            company_commission_percentage: 60.0,
            max_washers_per_service: 1,
            commission_notes: None,
            is_active: true,
        }
    }

    fn line(custom_price: Option<f64>) -> CheckInServiceInput {
        CheckInServiceInput {
            service_id: 1,
            washer_id: 7,
            custom_price,
        }
    }

    #[test]
    fn forward_edges_only() {
        assert!(transition_allowed(&CheckInStatus::Pending, &CheckInStatus::InProgress));
        assert!(transition_allowed(&CheckInStatus::InProgress, &CheckInStatus::Completed));
        assert!(transition_allowed(&CheckInStatus::Completed, &CheckInStatus::Paid));
        assert!(!transition_allowed(&CheckInStatus::Pending, &CheckInStatus::Completed));
        assert!(!transition_allowed(&CheckInStatus::Completed, &CheckInStatus::InProgress));
        assert!(!transition_allowed(&CheckInStatus::Paid, &CheckInStatus::Cancelled));
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(transition_allowed(&CheckInStatus::Pending, &CheckInStatus::Cancelled));
        assert!(transition_allowed(&CheckInStatus::InProgress, &CheckInStatus::Cancelled));
        assert!(!transition_allowed(&CheckInStatus::Cancelled, &CheckInStatus::Pending));
        assert!(!transition_allowed(&CheckInStatus::Cancelled, &CheckInStatus::InProgress));
        assert!(!transition_allowed(&CheckInStatus::Cancelled, &CheckInStatus::Paid));
    }

    #[test]
    fn instant_wash_skips_passcode() {
        assert!(!completion_requires_passcode(&WashType::Instant, Some("1234")));
        assert!(verify_passcode(&WashType::Instant, Some("1234"), None).is_ok());
    }

    #[test]
    fn delayed_wash_without_stored_passcode_completes_freely() {
        assert!(!completion_requires_passcode(&WashType::Delayed, None));
        assert!(!completion_requires_passcode(&WashType::Delayed, Some("")));
        assert!(verify_passcode(&WashType::Delayed, None, None).is_ok());
    }

    #[test]
    fn delayed_wash_gates_on_passcode() {
        assert!(completion_requires_passcode(&WashType::Delayed, Some("1234")));
        assert!(verify_passcode(&WashType::Delayed, Some("1234"), Some("1234")).is_ok());
        assert_eq!(
            verify_passcode(&WashType::Delayed, Some("1234"), Some("9999")),
            Err(WashlineError::NotAllowed)
        );
        assert_eq!(
            verify_passcode(&WashType::Delayed, Some("1234"), None),
            Err(WashlineError::NotAllowed)
        );
    }

    fn delayed_check_in_row() -> CheckIn {
        CheckIn {
            id: 42,
            confirmation: String::from("WL4X9T2B"),
            customer_id: Some(3),
            license_plate: String::from("ABC123DE"),
            vehicle_type: String::from("SUV"),
            vehicle_color: String::from("Black"),
            vehicle_model: Some(String::from("RAV4")),
            status: CheckInStatus::InProgress,
            wash_type: WashType::Delayed,
            valuable_items: String::from("None declared"),
            security_code: Some(String::from("GATE42")),
            user_code: Some(String::from("1234")),
            check_in_process: Some(String::from("Keys at the front desk")),
            check_in_time: Utc::now(),
            completed_time: None,
            paid_time: None,
            assigned_washer_id: Some(7),
            assigned_admin_id: 2,
            estimated_duration: 45,
            actual_duration: None,
            total_price: 2000.0,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            reason: None,
        }
    }

    #[test]
    fn completion_checks_customer_passcode_not_security_code() {
        let row = delayed_check_in_row();
        assert!(verify_completion_passcode(&row, Some("1234")).is_ok());
        assert_eq!(
            verify_completion_passcode(&row, Some("GATE42")),
            Err(WashlineError::NotAllowed)
        );
        assert_eq!(
            verify_completion_passcode(&row, None),
            Err(WashlineError::NotAllowed)
        );
    }

    #[test]
    fn published_check_in_drops_both_codes() {
        let published = PublishCheckIn::from(delayed_check_in_row());
        let json = serde_json::to_value(&published).unwrap();
        let fields = json.as_object().unwrap();
        assert!(!fields.contains_key("security_code"));
        assert!(!fields.contains_key("user_code"));
        assert_eq!(published.confirmation, "WL4X9T2B");
        assert_eq!(published.status, CheckInStatus::InProgress);
    }

    #[test]
    fn stock_accounts_for_prior_usage() {
        assert!(stock_covers(10, 0, 10));
        assert!(stock_covers(10, 4, 6));
        assert!(!stock_covers(10, 4, 7));
        assert!(!stock_covers(10, 10, 1));
    }

    #[test]
    fn zero_price_service_needs_custom_price() {
        let complementary = service("Tyre Shine", 0.0, 10);
        let err = line_effective_price(&complementary, None).unwrap_err();
        match err {
            WashlineError::Validation(msg) => {
                assert_eq!(msg, "Custom price is required for service: Tyre Shine")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(line_effective_price(&complementary, Some(1500.0)).unwrap(), 1500.0);
    }

    #[test]
    fn priced_service_custom_price_overrides() {
        let wash = service("Full Wash", 2000.0, 45);
        assert_eq!(line_effective_price(&wash, None).unwrap(), 2000.0);
        assert_eq!(line_effective_price(&wash, Some(2500.0)).unwrap(), 2500.0);
    }

    #[test]
    fn totals_sum_over_lines() {
        let lines = vec![
            (line(None), service("Full Wash", 2000.0, 45)),
            (line(Some(1500.0)), service("Tyre Shine", 0.0, 10)),
        ];
        let (total, duration) = price_and_duration(&lines).unwrap();
        assert_eq!(total, 3500.0);
        assert_eq!(duration, 55);
    }

    #[test]
    fn empty_selection_rejected() {
        assert!(price_and_duration(&[]).is_err());
    }

    #[test]
    fn commission_share() {
        assert_eq!(washer_share(2000.0, 40.0), 800.0);
        assert_eq!(washer_share(1500.0, 100.0), 1500.0);
    }

    #[test]
    fn day_bounds_cover_one_day() {
        let now = Utc::now();
        let (start, end) = business_day_bounds(now);
        assert!(start <= now && now < end);
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn plates_normalize_for_comparison() {
        assert_eq!(normalize_plate("abc-123 de"), "ABC123DE");
        assert_eq!(normalize_plate("ABC123DE"), "ABC123DE");
    }
}
