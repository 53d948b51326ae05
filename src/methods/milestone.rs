use crate::model::{Customer, Milestone, MilestoneType};

/// Operators accepted in milestone conditions.
pub fn condition_met(operator: &str, actual: f64, value: f64) -> bool {
    match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        "=" => actual == value,
        ">" => actual > value,
        "<" => actual < value,
        _ => false,
    }
}

/// The customer figure a milestone measures. Custom milestones fall back to
/// visit count.
pub fn measured_value(milestone_type: &MilestoneType, customer: &Customer) -> f64 {
    match milestone_type {
        MilestoneType::Visits => customer.total_visits as f64,
        MilestoneType::Spending => customer.total_spent,
        MilestoneType::Custom => customer.total_visits as f64,
    }
}

pub fn customer_qualifies(milestone: &Milestone, customer: &Customer) -> Option<f64> {
    let actual = measured_value(&milestone.milestone_type, customer);
    if condition_met(&milestone.condition_operator, actual, milestone.condition_value) {
        Some(actual)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(total_visits: i32, total_spent: f64) -> Customer {
        Customer {
            id: 1,
            name: String::from("Ada"),
            email: None,
            phone: String::from("0801234567"),
            is_registered: true,
            total_visits,
            total_spent,
        }
    }

    fn milestone(milestone_type: MilestoneType, operator: &str, value: f64) -> Milestone {
        Milestone {
            id: 1,
            name: String::from("Regular"),
            description: None,
            milestone_type,
            condition_operator: operator.to_string(),
            condition_value: value,
            reward: Some(1000.0),
            is_active: true,
        }
    }

    #[test]
    fn all_operators() {
        assert!(condition_met(">=", 5.0, 5.0));
        assert!(condition_met("<=", 4.0, 5.0));
        assert!(condition_met("=", 5.0, 5.0));
        assert!(condition_met(">", 6.0, 5.0));
        assert!(condition_met("<", 4.0, 5.0));
        assert!(!condition_met(">", 5.0, 5.0));
        assert!(!condition_met("!!", 5.0, 5.0));
    }

    #[test]
    fn visits_milestone_at_threshold() {
        let m = milestone(MilestoneType::Visits, ">=", 5.0);
        assert_eq!(customer_qualifies(&m, &customer(5, 0.0)), Some(5.0));
        // dropping below the threshold drops the customer from the live view,
        // whatever achievement rows may exist
        assert_eq!(customer_qualifies(&m, &customer(4, 0.0)), None);
    }

    #[test]
    fn spending_milestone_uses_total_spent() {
        let m = milestone(MilestoneType::Spending, ">", 10000.0);
        assert_eq!(customer_qualifies(&m, &customer(0, 10001.0)), Some(10001.0));
        assert_eq!(customer_qualifies(&m, &customer(100, 10000.0)), None);
    }
}
