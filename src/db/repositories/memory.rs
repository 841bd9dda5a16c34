use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::purchase_requests::{
    Page, PurchaseRequestFilter, PurchaseRequestRepository, format_number, sequence_of,
};
use crate::db::models::api::error_codes;
use crate::db::models::purchase_request::PurchaseRequest;
use crate::error::{AppError, AppResult};

/// Process-local request store, used by tests and database-less tooling.
#[derive(Default)]
pub struct InMemoryPurchaseRequestRepository {
    requests: RwLock<HashMap<Uuid, PurchaseRequest>>,
}

impl InMemoryPurchaseRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requests(requests: impl IntoIterator<Item = PurchaseRequest>) -> Self {
        Self {
            requests: RwLock::new(requests.into_iter().map(|r| (r.id, r)).collect()),
        }
    }
}

#[async_trait]
impl PurchaseRequestRepository for InMemoryPurchaseRequestRepository {
    async fn list(&self, filter: &PurchaseRequestFilter) -> AppResult<Page<PurchaseRequest>> {
        let requests = self.requests.read().await;
        let mut matching: Vec<PurchaseRequest> = requests
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.number.cmp(&a.number))
        });

        let total = matching.len() as i64;
        let items = match filter.page {
            Some(page) => matching
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.per_page as usize)
                .collect(),
            None => matching,
        };
        Ok(Page { items, total })
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<PurchaseRequest>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn add(&self, request: PurchaseRequest) -> AppResult<PurchaseRequest> {
        let mut requests = self.requests.write().await;
        if requests.values().any(|r| r.id == request.id || r.number == request.number) {
            return Err(AppError::conflict_with_code(
                "A purchase request with this number already exists",
                Some("number".to_string()),
                error_codes::DFD_NUMBER_EXISTS,
            ));
        }
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn update(&self, request: PurchaseRequest) -> AppResult<PurchaseRequest> {
        let mut requests = self.requests.write().await;
        match requests.get_mut(&request.id) {
            Some(stored) => {
                *stored = request.clone();
                Ok(request)
            }
            None => Err(AppError::not_found("purchase request")),
        }
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.requests.write().await.remove(&id).is_some())
    }

    async fn next_number(&self, year: i32) -> AppResult<String> {
        let requests = self.requests.read().await;
        let last = requests
            .values()
            .filter_map(|r| sequence_of(&r.number, year))
            .max()
            .unwrap_or(0);
        Ok(format_number(year, last + 1))
    }
}
