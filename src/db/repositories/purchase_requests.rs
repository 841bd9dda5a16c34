use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::enums::RequestStatus;
use crate::db::models::purchase_request::{LineItemRow, PurchaseRequest, PurchaseRequestRow};
use crate::db::models::workflow::{WorkflowStepRow, workflow_rows};
use crate::db::{DbPool, with_conn};
use crate::error::{AppError, AppResult};

/// Storage for purchase requests together with their items and workflow.
///
/// Writes are last-write-wins; there is no version check.
#[async_trait]
pub trait PurchaseRequestRepository: Send + Sync {
    async fn list(&self, filter: &PurchaseRequestFilter) -> AppResult<Page<PurchaseRequest>>;

    async fn find(&self, id: Uuid) -> AppResult<Option<PurchaseRequest>>;

    async fn add(&self, request: PurchaseRequest) -> AppResult<PurchaseRequest>;

    /// Replaces the stored request, items and workflow. Fails with
    /// `NotFound` if the request does not exist.
    async fn update(&self, request: PurchaseRequest) -> AppResult<PurchaseRequest>;

    /// Returns whether anything was removed. The workflow goes with it.
    async fn remove(&self, id: Uuid) -> AppResult<bool>;

    /// Next free `DFD-<year>-<seq>` number.
    async fn next_number(&self, year: i32) -> AppResult<String>;
}

#[derive(Debug, Clone, Default)]
pub struct PurchaseRequestFilter {
    /// Restricts results to these sectors; `None` means every sector.
    pub visible_sectors: Option<Vec<Uuid>>,
    pub sector_id: Option<Uuid>,
    pub status: Option<RequestStatus>,
    pub requester_id: Option<Uuid>,
    pub search: Option<String>,
    /// Half-open `[from, to)` range on `created_at`.
    pub created_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// `None` returns every match.
    pub page: Option<PageRequest>,
}

impl PurchaseRequestFilter {
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, request: &PurchaseRequest) -> bool {
        if let Some(sectors) = &self.visible_sectors {
            if !sectors.contains(&request.sector_id) {
                return false;
            }
        }
        if self.sector_id.is_some_and(|s| s != request.sector_id)
            || self.status.is_some_and(|s| s != request.status)
            || self.requester_id.is_some_and(|r| r != request.requester_id)
        {
            return false;
        }
        if let Some((from, to)) = self.created_between {
            if request.created_at < from || request.created_at >= to {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => {
                request.description.to_lowercase().contains(&term)
                    || request.number.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: i64 = 20;
    pub const MAX_PER_PAGE: i64 = 100;

    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(Self::DEFAULT_PER_PAGE)
                .clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Saturates for absurd page numbers; such pages are simply empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

pub fn format_number(year: i32, sequence: i64) -> String {
    format!("DFD-{}-{:04}", year, sequence)
}

/// Sequence part of a `DFD-<year>-<seq>` number issued in `year`.
pub fn sequence_of(number: &str, year: i32) -> Option<i64> {
    number
        .strip_prefix(&format!("DFD-{}-", year))
        .and_then(|seq| seq.parse().ok())
}

/// `%term%` with LIKE metacharacters in `term` escaped, so the search
/// matches the text literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct PgPurchaseRequestRepository {
    pool: DbPool,
}

impl PgPurchaseRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

macro_rules! apply_filter {
    ($query:expr, $filter:expr) => {{
        use crate::schema::purchase_requests::dsl as pr;
        let filter = $filter;
        let mut query = $query;
        if let Some(sectors) = &filter.visible_sectors {
            query = query.filter(pr::sector_id.eq_any(sectors.clone()));
        }
        if let Some(sector) = filter.sector_id {
            query = query.filter(pr::sector_id.eq(sector));
        }
        if let Some(status) = filter.status {
            query = query.filter(pr::status.eq(status));
        }
        if let Some(requester) = filter.requester_id {
            query = query.filter(pr::requester_id.eq(requester));
        }
        if let Some((from, to)) = filter.created_between {
            query = query.filter(pr::created_at.ge(from)).filter(pr::created_at.lt(to));
        }
        if let Some(term) = filter.search_term() {
            let pattern = like_pattern(&term);
            query = query.filter(pr::description.ilike(pattern.clone()).or(pr::number.ilike(pattern)));
        }
        query
    }};
}

fn load_children(
    conn: &mut PgConnection,
    rows: Vec<PurchaseRequestRow>,
) -> Result<Vec<PurchaseRequest>, diesel::result::Error> {
    use crate::schema::{purchase_request_items as items, workflow_steps as steps};

    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let mut items_by_request: HashMap<Uuid, Vec<LineItemRow>> = HashMap::new();
    for item in items::table
        .filter(items::purchase_request_id.eq_any(ids.clone()))
        .select(LineItemRow::as_select())
        .load(conn)?
    {
        items_by_request.entry(item.purchase_request_id).or_default().push(item);
    }

    let mut steps_by_request: HashMap<Uuid, Vec<WorkflowStepRow>> = HashMap::new();
    for step in steps::table
        .filter(steps::purchase_request_id.eq_any(ids))
        .select(WorkflowStepRow::as_select())
        .load(conn)?
    {
        steps_by_request.entry(step.purchase_request_id).or_default().push(step);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let items = items_by_request.remove(&row.id).unwrap_or_default();
            let steps = steps_by_request.remove(&row.id).unwrap_or_default();
            row.into_domain(items, steps)
        })
        .collect())
}

fn write_children(conn: &mut PgConnection, request: &PurchaseRequest) -> Result<(), diesel::result::Error> {
    use crate::schema::{purchase_request_items as items, workflow_steps as steps};

    diesel::delete(items::table.filter(items::purchase_request_id.eq(request.id))).execute(conn)?;
    let item_rows: Vec<LineItemRow> = request
        .items
        .iter()
        .enumerate()
        .map(|(position, item)| LineItemRow::from_domain(request.id, position, item))
        .collect();
    if !item_rows.is_empty() {
        diesel::insert_into(items::table).values(&item_rows).execute(conn)?;
    }

    diesel::delete(steps::table.filter(steps::purchase_request_id.eq(request.id))).execute(conn)?;
    if let Some(workflow) = &request.workflow {
        diesel::insert_into(steps::table)
            .values(&workflow_rows(request.id, workflow))
            .execute(conn)?;
    }
    Ok(())
}

#[async_trait]
impl PurchaseRequestRepository for PgPurchaseRequestRepository {
    async fn list(&self, filter: &PurchaseRequestFilter) -> AppResult<Page<PurchaseRequest>> {
        let filter = filter.clone();
        with_conn(&self.pool, move |conn| {
            use crate::schema::purchase_requests::dsl as pr;

            let total: i64 = apply_filter!(pr::purchase_requests.count().into_boxed(), &filter)
                .get_result(conn)?;

            let mut query = apply_filter!(
                pr::purchase_requests
                    .select(PurchaseRequestRow::as_select())
                    .into_boxed(),
                &filter
            )
            .order((pr::created_at.desc(), pr::number.desc()));
            if let Some(page) = filter.page {
                query = query.limit(page.per_page).offset(page.offset());
            }
            let rows = query.load::<PurchaseRequestRow>(conn)?;

            Ok(Page {
                items: load_children(conn, rows)?,
                total,
            })
        })
        .await
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<PurchaseRequest>> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::purchase_requests::dsl as pr;

            let row = pr::purchase_requests
                .find(id)
                .select(PurchaseRequestRow::as_select())
                .first(conn)
                .optional()?;
            match row {
                Some(row) => Ok(load_children(conn, vec![row])?.pop()),
                None => Ok(None),
            }
        })
        .await
    }

    async fn add(&self, request: PurchaseRequest) -> AppResult<PurchaseRequest> {
        with_conn(&self.pool, move |conn| {
            conn.transaction::<_, AppError, _>(|conn| {
                diesel::insert_into(crate::schema::purchase_requests::table)
                    .values(&PurchaseRequestRow::from_domain(&request))
                    .execute(conn)?;
                write_children(conn, &request)?;
                Ok(())
            })?;
            Ok(request)
        })
        .await
    }

    async fn update(&self, request: PurchaseRequest) -> AppResult<PurchaseRequest> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::purchase_requests::dsl as pr;

            conn.transaction::<_, AppError, _>(|conn| {
                let updated = diesel::update(pr::purchase_requests.find(request.id))
                    .set(&PurchaseRequestRow::from_domain(&request))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(AppError::not_found("purchase request"));
                }
                write_children(conn, &request)?;
                Ok(())
            })?;
            Ok(request)
        })
        .await
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::{purchase_request_items as items, purchase_requests as pr, workflow_steps as steps};

            let removed = conn.transaction::<_, AppError, _>(|conn| {
                diesel::delete(steps::table.filter(steps::purchase_request_id.eq(id))).execute(conn)?;
                diesel::delete(items::table.filter(items::purchase_request_id.eq(id))).execute(conn)?;
                Ok(diesel::delete(pr::table.find(id)).execute(conn)?)
            })?;
            Ok(removed > 0)
        })
        .await
    }

    async fn next_number(&self, year: i32) -> AppResult<String> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::purchase_requests::dsl as pr;

            let numbers: Vec<String> = pr::purchase_requests
                .filter(pr::number.like(format!("DFD-{}-%", year)))
                .select(pr::number)
                .load(conn)?;
            let last = numbers
                .iter()
                .filter_map(|n| sequence_of(n, year))
                .max()
                .unwrap_or(0);
            Ok(format_number(year, last + 1))
        })
        .await
    }
}
