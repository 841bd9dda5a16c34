use crate::db::models::purchase_request::{CreatePurchaseRequest, LineItemInput, UpdatePurchaseRequest};
use crate::error::AppError;

const MAX_ITEMS: usize = 200;

/// Largest value a request, or any of its line totals, may carry.
pub const MAX_VALUE: f64 = 1e12;

pub fn validate_line_items(items: &[LineItemInput]) -> Result<(), AppError> {
    if items.len() > MAX_ITEMS {
        return Err(AppError::validation(format!(
            "Too many line items (max {})",
            MAX_ITEMS
        )));
    }

    for (i, item) in items.iter().enumerate() {
        if item.description.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Item {} description is required",
                i + 1
            )));
        }
        if !item.quantity.is_finite() || item.quantity <= 0.0 {
            return Err(AppError::validation(format!(
                "Item {} quantity must be greater than zero",
                i + 1
            )));
        }
        if !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(AppError::validation(format!(
                "Item {} unit price cannot be negative",
                i + 1
            )));
        }
        if item.quantity * item.unit_price > MAX_VALUE {
            return Err(AppError::validation(format!(
                "Item {} total exceeds the maximum of {}",
                i + 1,
                MAX_VALUE
            )));
        }
    }

    let total: f64 = items.iter().map(|item| item.quantity * item.unit_price).sum();
    if total > MAX_VALUE {
        return Err(AppError::validation(format!(
            "Items total exceeds the maximum of {}",
            MAX_VALUE
        )));
    }
    Ok(())
}

fn validate_value(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation("Total value must be greater than zero"));
    }
    if value > MAX_VALUE {
        return Err(AppError::validation(format!(
            "Total value exceeds the maximum of {}",
            MAX_VALUE
        )));
    }
    Ok(())
}

pub fn validate_create_purchase_request(req: &CreatePurchaseRequest) -> Result<(), AppError> {
    if req.description.trim().is_empty() {
        return Err(AppError::validation("Description is required"));
    }
    if req.funding_source.trim().is_empty() {
        return Err(AppError::validation("Funding source is required"));
    }

    validate_line_items(&req.items)?;

    // Without items the value has to be given explicitly.
    if req.items.is_empty() {
        match req.total_value {
            Some(value) => validate_value(value)?,
            None => {
                return Err(AppError::validation(
                    "Total value is required when no items are given",
                ));
            }
        }
    }
    Ok(())
}

pub fn validate_update_purchase_request(req: &UpdatePurchaseRequest) -> Result<(), AppError> {
    if req.description.is_none()
        && req.justification.is_none()
        && req.sector_id.is_none()
        && req.funding_source.is_none()
        && req.total_value.is_none()
        && req.priority.is_none()
        && req.items.is_none()
    {
        return Err(AppError::validation("No update data provided"));
    }

    if let Some(description) = &req.description {
        if description.trim().is_empty() {
            return Err(AppError::validation("Description cannot be empty"));
        }
    }
    if let Some(source) = &req.funding_source {
        if source.trim().is_empty() {
            return Err(AppError::validation("Funding source cannot be empty"));
        }
    }
    if let Some(items) = &req.items {
        validate_line_items(items)?;
    }
    if let Some(value) = req.total_value {
        validate_value(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn item(quantity: f64, unit_price: f64) -> LineItemInput {
        LineItemInput {
            description: "Resma de papel A4".to_string(),
            quantity,
            unit: "cx".to_string(),
            unit_price,
        }
    }

    fn create(items: Vec<LineItemInput>, total_value: Option<f64>) -> CreatePurchaseRequest {
        CreatePurchaseRequest {
            description: "Material de expediente".to_string(),
            justification: None,
            sector_id: Uuid::new_v4(),
            funding_source: "Recursos próprios".to_string(),
            total_value,
            priority: None,
            items,
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(validate_create_purchase_request(&create(vec![item(10.0, 25.5)], None)).is_ok());
        assert!(validate_create_purchase_request(&create(vec![], Some(1500.0))).is_ok());

        assert!(validate_create_purchase_request(&create(vec![], None)).is_err());
        assert!(validate_create_purchase_request(&create(vec![], Some(0.0))).is_err());
        assert!(validate_create_purchase_request(&create(vec![item(0.0, 10.0)], None)).is_err());
        assert!(validate_create_purchase_request(&create(vec![item(1.0, -1.0)], None)).is_err());
        assert!(validate_create_purchase_request(&create(vec![item(f64::NAN, 1.0)], None)).is_err());

        let mut blank = create(vec![], Some(10.0));
        blank.description = "   ".to_string();
        assert!(validate_create_purchase_request(&blank).is_err());
    }

    #[test]
    fn test_update_validation() {
        assert!(validate_update_purchase_request(&UpdatePurchaseRequest::default()).is_err());

        let req = UpdatePurchaseRequest {
            description: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(validate_update_purchase_request(&req).is_err());

        let req = UpdatePurchaseRequest {
            items: Some(vec![item(2.0, 3.0)]),
            ..Default::default()
        };
        assert!(validate_update_purchase_request(&req).is_ok());

        let req = UpdatePurchaseRequest {
            total_value: Some(-5.0),
            ..Default::default()
        };
        assert!(validate_update_purchase_request(&req).is_err());
    }

    #[test]
    fn values_above_the_maximum_are_rejected() {
        assert!(validate_create_purchase_request(&create(vec![], Some(MAX_VALUE))).is_ok());
        assert!(validate_create_purchase_request(&create(vec![], Some(1e17))).is_err());
        assert!(validate_create_purchase_request(&create(vec![item(1e6, 1e7)], None)).is_err());

        let halves = vec![item(1.0, MAX_VALUE * 0.6), item(1.0, MAX_VALUE * 0.6)];
        assert!(validate_create_purchase_request(&create(halves, None)).is_err());

        let req = UpdatePurchaseRequest {
            total_value: Some(1e13),
            ..Default::default()
        };
        assert!(validate_update_purchase_request(&req).is_err());
    }

    #[test]
    fn too_many_items_is_rejected() {
        let items: Vec<_> = (0..=MAX_ITEMS).map(|_| item(1.0, 1.0)).collect();
        assert!(validate_line_items(&items).is_err());
    }
}
