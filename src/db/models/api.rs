use serde::Serialize;

// Envelope shared by every JSON response
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Debug, Default)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };
        Self {
            page,
            per_page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(success: bool, code: u16, message: &str) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, message: &str, field: Option<String>, error_code: &str) -> Self {
        Self {
            errors: Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            ..Self::build(false, code, message)
        }
    }

    pub fn success(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            ..Self::build(true, 200, message)
        }
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
            ..Self::build(true, 200, message)
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            ..Self::build(true, 201, message)
        }
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message)
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::build(false, 400, "Validation failed")
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, message, None, error_codes::BAD_REQUEST)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, message, None, error_codes::UNAUTHORIZED)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::failure(403, message, None, error_codes::FORBIDDEN)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, message, None, error_codes::NOT_FOUND)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, message, field, error_code)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, message, None, error_codes::INTERNAL_ERROR)
    }
}

// Business error codes
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

    pub const USER_EMAIL_EXISTS: &str = "USER_001";

    pub const DFD_NUMBER_EXISTS: &str = "DFD_001";
    pub const DFD_STATUS_FINAL: &str = "DFD_002";

    pub const MUNICIPALITY_CNPJ_EXISTS: &str = "MUNICIPALITY_001";
    pub const SECTOR_NAME_EXISTS: &str = "SECTOR_001";
    pub const MANAGER_EMAIL_EXISTS: &str = "MANAGER_001";
    pub const MAYOR_TERM_OVERLAP: &str = "MAYOR_001";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_pages_up() {
        let p = Pagination::new(1, 20, 41);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);

        let p = Pagination::new(3, 20, 41);
        assert!(!p.has_next);
        assert!(p.has_prev);

        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
    }

    #[test]
    fn failure_envelope_carries_error_detail() {
        let response = ApiResponse::<()>::conflict("CNPJ already registered", Some("cnpj".into()), error_codes::MUNICIPALITY_CNPJ_EXISTS);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 409);
        assert_eq!(json["errors"][0]["field"], "cnpj");
        assert_eq!(json["errors"][0]["code"], "MUNICIPALITY_001");
        assert!(json.get("data").is_none());
    }
}
