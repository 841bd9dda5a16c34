use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::db::models::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::middleware::extract_request_id;

/// Who is calling, and under which request id. Built from the extensions
/// the auth and tracking middleware leave behind.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user: AuthenticatedUser,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(user: AuthenticatedUser) -> Self {
        Self {
            user,
            request_id: None,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        Ok(Self {
            user,
            request_id: extract_request_id(&parts.headers),
        })
    }
}
