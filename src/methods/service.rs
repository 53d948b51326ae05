use crate::helper_model::WashlineError;

/// The washer and company shares must split the full price between them.
pub fn validate_commission_split(
    washer_commission_percentage: f64,
    company_commission_percentage: f64,
) -> Result<(), WashlineError> {
    if (washer_commission_percentage + company_commission_percentage - 100.0).abs() > f64::EPSILON {
        return Err(WashlineError::Validation(String::from(
            "Washer and company commission percentages must sum to 100.",
        )));
    }
    if washer_commission_percentage < 0.0 || company_commission_percentage < 0.0 {
        return Err(WashlineError::Validation(String::from(
            "Commission percentages cannot be negative.",
        )));
    }
    Ok(())
}

pub fn validate_service_fields(
    name: &str,
    duration_minutes: i32,
    max_washers_per_service: i32,
) -> Result<(), WashlineError> {
    if name.trim().is_empty() {
        return Err(WashlineError::Validation(String::from("Service name is required.")));
    }
    if duration_minutes <= 0 {
        return Err(WashlineError::Validation(String::from(
            "Duration must be greater than zero.",
        )));
    }
    if max_washers_per_service < 1 {
        return Err(WashlineError::Validation(String::from(
            "At least one washer must be allowed per service.",
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_must_sum_to_hundred() {
        assert!(validate_commission_split(40.0, 60.0).is_ok());
        assert!(validate_commission_split(0.0, 100.0).is_ok());
        assert!(validate_commission_split(50.0, 49.0).is_err());
        assert!(validate_commission_split(150.0, -50.0).is_err());
    }

    #[test]
    fn field_rules() {
        assert!(validate_service_fields("Full Wash", 45, 1).is_ok());
        assert!(validate_service_fields("", 45, 1).is_err());
        assert!(validate_service_fields("Full Wash", 0, 1).is_err());
        assert!(validate_service_fields("Full Wash", 45, 0).is_err());
    }
}
