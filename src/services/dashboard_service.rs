use chrono::{TimeZone, Utc};

use crate::dashboard::{DashboardOverview, MonthlySpend, SectorBudget, monthly_spend, summarize_sectors};
use crate::db::repositories::{PurchaseRequestFilter, PurchaseRequestRepository};
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::permissions;

pub struct DashboardService;

impl DashboardService {
    /// Sector summaries restricted to what the caller can see. `budgets`
    /// lists every active sector.
    pub async fn sectors(
        repo: &dyn PurchaseRequestRepository,
        ctx: &RequestContext,
        budgets: Vec<SectorBudget>,
    ) -> AppResult<DashboardOverview> {
        let visible = permissions::visible_sectors(&ctx.user);
        let budgets: Vec<SectorBudget> = budgets
            .into_iter()
            .filter(|b| visible.as_ref().is_none_or(|v| v.contains(&b.sector_id)))
            .collect();

        let filter = PurchaseRequestFilter {
            visible_sectors: visible,
            ..Default::default()
        };
        let requests = repo.list(&filter).await?.items;
        Ok(summarize_sectors(&requests, &budgets))
    }

    pub async fn monthly(
        repo: &dyn PurchaseRequestRepository,
        ctx: &RequestContext,
        year: i32,
    ) -> AppResult<Vec<MonthlySpend>> {
        let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single();
        let end = Utc.with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0).single();
        let (Some(start), Some(end)) = (start, end) else {
            return Err(AppError::validation(format!("Invalid year: {}", year)));
        };

        let filter = PurchaseRequestFilter {
            visible_sectors: permissions::visible_sectors(&ctx.user),
            created_between: Some((start, end)),
            ..Default::default()
        };
        let requests = repo.list(&filter).await?.items;
        Ok(monthly_spend(&requests, year))
    }
}
