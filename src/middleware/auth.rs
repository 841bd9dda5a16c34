use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::config::AuthConfig;
use crate::db::enums::UserRole;
use crate::db::models::auth::AuthenticatedUser;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub sector_ids: Vec<Uuid>,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

/// Issues and verifies HS256 access tokens. The token carries everything
/// permission checks need, so requests are authorized without a lookup.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expires_in: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expires_in: config.access_token_expires_in,
        }
    }

    /// Lifetime of issued tokens in seconds.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn issue(&self, user: &AuthenticatedUser) -> AppResult<String> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            sector_ids: user.sector_ids.clone(),
            exp: now + self.expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    pub fn verify(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::auth("Invalid or expired access token"))?;

        let claims = data.claims;
        Ok(AuthenticatedUser {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            sector_ids: claims.sector_ids,
        })
    }
}

/// Requires a valid bearer token and stores the caller in the request
/// extensions for the `AuthenticatedUser` extractor.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::auth("Missing bearer token"))?;

    let user = state.tokens.verify(bearer.token())?;
    tracing::debug!(user_id = %user.id, role = %user.role, "Authenticated request");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            access_token_expires_in: 3600,
        })
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "gestor@prefeitura.gov.br".to_string(),
            name: "Gestor".to_string(),
            role: UserRole::Manager,
            sector_ids: vec![Uuid::new_v4()],
        }
    }

    #[test]
    fn issued_token_verifies_to_same_user() {
        let tokens = service("a-long-enough-test-secret");
        let user = user();
        let token = tokens.issue(&user).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), user);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = service("first-secret-0123456789").issue(&user()).unwrap();
        let err = service("second-secret-0123456789").verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Auth { .. }));
    }
}
