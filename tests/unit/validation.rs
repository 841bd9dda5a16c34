use chrono::NaiveDate;
use gecom::db::models::purchase_request::{CreatePurchaseRequest, LineItemInput};
use gecom::validation::mayor::{terms_overlap, validate_term};
use gecom::validation::purchase_request::validate_create_purchase_request;
use gecom::validation::rules::{normalize_cnpj, validate_cnpj, validate_state_code};
use uuid::Uuid;

fn create(total_value: Option<f64>, items: Vec<LineItemInput>) -> CreatePurchaseRequest {
    CreatePurchaseRequest {
        description: "Aquisição de merenda escolar".to_string(),
        justification: None,
        sector_id: Uuid::new_v4(),
        funding_source: "FUNDEB".to_string(),
        total_value,
        priority: None,
        items,
    }
}

#[test]
fn validate_purchase_request_value_rules() {
    assert!(validate_create_purchase_request(&create(Some(1500.0), vec![])).is_ok());
    assert!(validate_create_purchase_request(&create(None, vec![])).is_err());
    assert!(validate_create_purchase_request(&create(Some(0.0), vec![])).is_err());

    let item = LineItemInput {
        description: "Arroz 5kg".to_string(),
        quantity: 10.0,
        unit: "UN".to_string(),
        unit_price: 25.9,
    };
    assert!(validate_create_purchase_request(&create(None, vec![item.clone()])).is_ok());

    let bad = LineItemInput {
        quantity: 0.0,
        ..item
    };
    assert!(validate_create_purchase_request(&create(None, vec![bad])).is_err());
}

#[test]
fn validate_registry_fields() {
    assert!(validate_cnpj("11.222.333/0001-81").is_ok());
    assert!(validate_cnpj("11.222.333/0001-82").is_err());
    assert_eq!(normalize_cnpj("11.222.333/0001-81"), "11222333000181");
    assert!(validate_state_code("sp").is_ok());
    assert!(validate_state_code("XX").is_err());
}

#[test]
fn validate_mayor_terms() {
    let d = |s: &str| s.parse::<NaiveDate>().unwrap();
    assert!(validate_term(d("2025-01-01"), d("2028-12-31")).is_ok());
    assert!(validate_term(d("2025-01-01"), d("2025-01-01")).is_err());
    assert!(terms_overlap(
        (d("2021-01-01"), d("2024-12-31")),
        (d("2024-12-31"), d("2028-12-31"))
    ));
    assert!(!terms_overlap(
        (d("2021-01-01"), d("2024-12-31")),
        (d("2025-01-01"), d("2028-12-31"))
    ));
}
