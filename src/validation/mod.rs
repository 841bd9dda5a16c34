pub mod mayor;
pub mod purchase_request;

use axum::{
    Json, async_trait,
    extract::FromRequest,
    http::Request,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{db::models::api::ErrorDetail, error::AppError};

/// JSON extractor that runs `validator` rules before the handler sees the
/// payload.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(format!("Invalid JSON payload: {}", rejection)))?;

        value.validate().map_err(|errors| {
            let details: Vec<ErrorDetail> = errors
                .field_errors()
                .iter()
                .flat_map(|(field, field_errors)| {
                    field_errors.iter().map(move |error| ErrorDetail {
                        field: Some(field.to_string()),
                        code: error.code.to_string(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
                    })
                })
                .collect();
            AppError::InvalidFields(details)
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Field rules shared by the request DTOs
pub mod rules {
    use validator::ValidationError;

    fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    }

    /// At least three of: length >= 8, lowercase, uppercase, digit, symbol.
    pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
        let checks = [
            password.chars().count() >= 8,
            password.chars().any(|c| c.is_lowercase()),
            password.chars().any(|c| c.is_uppercase()),
            password.chars().any(|c| c.is_numeric()),
            password.chars().any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)),
        ];
        let score = checks.iter().filter(|ok| **ok).count();

        if password.chars().count() < 8 || score < 3 {
            return Err(rule_error("weak_password", "Password must have 8+ characters mixing case, digits or symbols"));
        }
        Ok(())
    }

    /// CNPJ with or without punctuation; both check digits must match.
    pub fn validate_cnpj(cnpj: &str) -> Result<(), ValidationError> {
        let digits: Vec<u32> = cnpj
            .chars()
            .filter(|c| !matches!(c, '.' | '/' | '-' | ' '))
            .map(|c| c.to_digit(10).ok_or_else(|| ValidationError::new("invalid_cnpj")))
            .collect::<Result<_, _>>()?;

        if digits.len() != 14 || digits.iter().all(|d| *d == digits[0]) {
            return Err(rule_error("invalid_cnpj", "CNPJ must have 14 digits"));
        }

        let check_digit = |body: &[u32]| {
            const WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
            let offset = WEIGHTS.len() - body.len();
            let sum: u32 = body.iter().zip(&WEIGHTS[offset..]).map(|(d, w)| d * w).sum();
            match sum % 11 {
                0 | 1 => 0,
                r => 11 - r,
            }
        };

        if check_digit(&digits[..12]) != digits[12] || check_digit(&digits[..13]) != digits[13] {
            return Err(rule_error("invalid_cnpj", "CNPJ check digits do not match"));
        }
        Ok(())
    }

    pub fn normalize_cnpj(cnpj: &str) -> String {
        cnpj.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    const STATE_CODES: [&str; 27] = [
        "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
        "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
    ];

    pub fn validate_state_code(state: &str) -> Result<(), ValidationError> {
        if !STATE_CODES.contains(&state.to_ascii_uppercase().as_str()) {
            return Err(rule_error("invalid_state", "Unknown state code"));
        }
        Ok(())
    }

    /// Brazilian phone: 10 to 13 digits (country code optional) once
    /// punctuation is stripped.
    pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        let only_phone_chars = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '(' | ')' | '-' | '+'));
        if !only_phone_chars || !(10..=13).contains(&digits) {
            return Err(rule_error("invalid_phone", "Invalid phone number"));
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn password_strength() {
            assert!(validate_password_strength("Compras2026").is_ok());
            assert!(validate_password_strength("compras-municipais").is_ok());
            assert!(validate_password_strength("short1A").is_err());
            assert!(validate_password_strength("abcdefghij").is_err());
        }

        #[test]
        fn cnpj_check_digits() {
            assert!(validate_cnpj("11.222.333/0001-81").is_ok());
            assert!(validate_cnpj("11222333000181").is_ok());
            assert!(validate_cnpj("11.222.333/0001-82").is_err());
            assert!(validate_cnpj("11111111111111").is_err());
            assert!(validate_cnpj("1122233300018").is_err());
            assert!(validate_cnpj("11a22333000181").is_err());
            assert_eq!(normalize_cnpj("11.222.333/0001-81"), "11222333000181");
        }

        #[test]
        fn state_codes() {
            assert!(validate_state_code("SP").is_ok());
            assert!(validate_state_code("mg").is_ok());
            assert!(validate_state_code("XX").is_err());
        }

        #[test]
        fn phones() {
            assert!(validate_phone("(11) 98765-4321").is_ok());
            assert!(validate_phone("+55 11 3333-4444").is_ok());
            assert!(validate_phone("1234").is_err());
            assert!(validate_phone("11 9876x4321").is_err());
        }
    }
}
