//! Deduction accounting for washer payment requests. Figures are recomputed
//! from the unreturned inventory rows on every call, never cached.

use crate::POOL;
use crate::helper_model::{DeductionReply, DeductionSummary, UnreturnedItem, WashlineError};
use crate::model::{PaymentRequestStatus, WasherMaterial, WasherTool};
use diesel::prelude::*;

pub fn item_value(quantity: i32, unit_value: f64) -> f64 {
    quantity as f64 * unit_value
}

/// Sum the replacement value of everything the washer still holds. Returned
/// rows are skipped; the caller usually filters them out in SQL already.
pub fn summarize_deductions(
    tools: &[WasherTool],
    materials: &[WasherMaterial],
) -> (DeductionSummary, Vec<UnreturnedItem>) {
    let mut items = Vec::new();
    let mut tool_deductions = 0.0;
    let mut material_deductions = 0.0;

    for tool in tools.iter().filter(|t| !t.is_returned) {
        let value = item_value(tool.quantity, tool.unit_value);
        tool_deductions += value;
        items.push(UnreturnedItem {
            id: tool.id,
            kind: String::from("tool"),
            name: tool.tool_name.clone(),
            quantity: tool.quantity,
            unit_value: tool.unit_value,
            value,
        });
    }
    for material in materials.iter().filter(|m| !m.is_returned) {
        let value = item_value(material.quantity, material.unit_value);
        material_deductions += value;
        items.push(UnreturnedItem {
            id: material.id,
            kind: String::from("material"),
            name: material.material_name.clone(),
            quantity: material.quantity,
            unit_value: material.unit_value,
            value,
        });
    }

    let summary = DeductionSummary {
        material_deductions,
        tool_deductions,
        total_deductions: material_deductions + tool_deductions,
    };
    (summary, items)
}

/// Live deduction picture for one washer. Earnings already spoken for by a
/// pending, approved or paid request are not available again.
pub async fn washer_deduction_state(washer_id: i32) -> QueryResult<DeductionReply> {
    let mut pool = POOL.clone().get().unwrap();
    tokio::task::spawn_blocking(move || {
        use crate::schema::payment_requests::dsl as request_q;
        use crate::schema::washer_materials::dsl as material_q;
        use crate::schema::washer_profiles::dsl as profile_q;
        use crate::schema::washer_tools::dsl as tool_q;

        let profile = profile_q::washer_profiles
            .filter(profile_q::user_id.eq(washer_id))
            .get_result::<crate::model::WasherProfile>(&mut pool)?;
        let tools = tool_q::washer_tools
            .filter(tool_q::washer_id.eq(washer_id))
            .filter(tool_q::is_returned.eq(false))
            .get_results::<WasherTool>(&mut pool)?;
        let materials = material_q::washer_materials
            .filter(material_q::washer_id.eq(washer_id))
            .filter(material_q::is_returned.eq(false))
            .get_results::<WasherMaterial>(&mut pool)?;
        let prior_requests = request_q::payment_requests
            .filter(request_q::washer_id.eq(washer_id))
            .filter(request_q::status.ne(PaymentRequestStatus::Rejected))
            .get_results::<crate::model::PaymentRequest>(&mut pool)?;

        let (deductions, unreturned_items) = summarize_deductions(&tools, &materials);
        let committed: f64 = prior_requests.iter().map(|r| r.amount).sum();
        let has_unreturned_tools = !unreturned_items.is_empty();
        Ok(DeductionReply {
            deductions,
            unreturned_items,
            has_unreturned_tools,
            available_earnings: profile.total_earnings - committed,
        })
    })
    .await
    .unwrap()
}

/// requested + deductions must not exceed what the washer can still claim;
/// exactly equal passes.
pub fn validate_payment_request(
    requested_amount: f64,
    deductions: &DeductionSummary,
    available_earnings: f64,
    has_unreturned_items: bool,
) -> Result<(), WashlineError> {
    if has_unreturned_items {
        return Err(WashlineError::NotAllowed);
    }
    if requested_amount <= 0.0 {
        return Err(WashlineError::Validation(String::from(
            "Requested amount must be greater than zero.",
        )));
    }
    if requested_amount + deductions.total_deductions > available_earnings {
        return Err(WashlineError::Validation(String::from(
            "Requested amount plus deductions exceeds your available earnings.",
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tool(id: i32, quantity: i32, unit_value: f64, is_returned: bool) -> WasherTool {
        WasherTool {
            id,
            washer_id: 7,
            tool_name: format!("Pressure Hose {}", id),
            tool_type: String::from("hose"),
            quantity,
            unit_value,
            assigned_date: Utc::now(),
            is_returned,
            returned_date: if is_returned { Some(Utc::now()) } else { None },
        }
    }

    fn material(id: i32, quantity: i32, unit_value: f64, is_returned: bool) -> WasherMaterial {
        WasherMaterial {
            id,
            washer_id: 7,
            material_name: format!("Shampoo {}", id),
            material_type: String::from("consumable"),
            quantity,
            unit_value,
            assigned_date: Utc::now(),
            is_returned,
            returned_date: if is_returned { Some(Utc::now()) } else { None },
        }
    }

    #[test]
    fn sums_unreturned_rows_only() {
        let tools = vec![tool(1, 1, 2000.0, false), tool(2, 2, 500.0, true)];
        let materials = vec![material(3, 3, 100.0, false)];
        let (summary, items) = summarize_deductions(&tools, &materials);
        assert_eq!(summary.tool_deductions, 2000.0);
        assert_eq!(summary.material_deductions, 300.0);
        assert_eq!(summary.total_deductions, 2300.0);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn everything_returned_means_no_deductions() {
        let tools = vec![tool(1, 1, 2000.0, true)];
        let (summary, items) = summarize_deductions(&tools, &[]);
        assert_eq!(summary.total_deductions, 0.0);
        assert!(items.is_empty());
    }

    #[test]
    fn unreturned_items_block_requests_outright() {
        let summary = DeductionSummary {
            material_deductions: 0.0,
            tool_deductions: 2000.0,
            total_deductions: 2000.0,
        };
        assert_eq!(
            validate_payment_request(100.0, &summary, 100000.0, true),
            Err(WashlineError::NotAllowed)
        );
    }

    #[test]
    fn ceiling_is_inclusive() {
        let summary = DeductionSummary {
            material_deductions: 300.0,
            tool_deductions: 700.0,
            total_deductions: 1000.0,
        };
        // exactly equal passes
        assert!(validate_payment_request(4000.0, &summary, 5000.0, false).is_ok());
        // one unit over fails
        assert!(validate_payment_request(4001.0, &summary, 5000.0, false).is_err());
    }

    #[test]
    fn requested_amount_must_be_positive() {
        let summary = DeductionSummary {
            material_deductions: 0.0,
            tool_deductions: 0.0,
            total_deductions: 0.0,
        };
        assert!(validate_payment_request(0.0, &summary, 5000.0, false).is_err());
        assert!(validate_payment_request(-10.0, &summary, 5000.0, false).is_err());
    }
}
