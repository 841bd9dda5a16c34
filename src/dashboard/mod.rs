//! Per-sector spend aggregation for the dashboard.
//!
//! Money is summed in integer cents so the result does not depend on the
//! order the requests arrive in.

use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::db::enums::RequestStatus;
use crate::db::models::purchase_request::PurchaseRequest;

/// Planned budget of one sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorBudget {
    pub sector_id: Uuid,
    pub name: String,
    pub planned_budget: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSummary {
    pub sector_id: Uuid,
    pub sector_name: String,
    pub spend: f64,
    pub request_count: u32,
    pub average_ticket: f64,
    pub planned: f64,
    pub variance: f64,
    pub executed_percent: f64,
    pub by_status: BTreeMap<RequestStatus, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub spend: f64,
    pub request_count: u32,
    pub average_ticket: f64,
    pub planned: f64,
    pub variance: f64,
    pub executed_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub sectors: Vec<SectorSummary>,
    pub totals: DashboardTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpend {
    /// 1 to 12.
    pub month: u32,
    pub spend: f64,
    pub request_count: u32,
}

fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

pub fn average_ticket(spend: f64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    from_cents((to_cents(spend) as f64 / count as f64).round() as i64)
}

pub fn executed_percent(spend: f64, planned: f64) -> f64 {
    if planned <= 0.0 {
        return 0.0;
    }
    (spend / planned * 10_000.0).round() / 100.0
}

#[derive(Default)]
struct Accumulator {
    spend_cents: i64,
    request_count: u32,
    by_status: BTreeMap<RequestStatus, u32>,
}

impl Accumulator {
    fn add(&mut self, request: &PurchaseRequest) {
        self.request_count = self.request_count.saturating_add(1);
        let count = self.by_status.entry(request.status).or_insert(0);
        *count = count.saturating_add(1);
        if request.status.counts_as_spend() {
            self.spend_cents = self.spend_cents.saturating_add(to_cents(request.total_value));
        }
    }
}

/// Folds requests into one summary per sector. Every budgeted sector is
/// present even without requests; requests for unbudgeted sectors get a
/// summary with a zero plan. Sorted by sector name.
pub fn summarize_sectors(requests: &[PurchaseRequest], budgets: &[SectorBudget]) -> DashboardOverview {
    let mut by_sector: HashMap<Uuid, Accumulator> = HashMap::new();
    for request in requests {
        by_sector.entry(request.sector_id).or_default().add(request);
    }

    let mut sectors: Vec<SectorSummary> = Vec::with_capacity(by_sector.len().max(budgets.len()));
    for budget in budgets {
        let acc = by_sector.remove(&budget.sector_id).unwrap_or_default();
        sectors.push(summary(budget.sector_id, budget.name.clone(), budget.planned_budget, acc));
    }
    for (sector_id, acc) in by_sector {
        sectors.push(summary(sector_id, sector_id.to_string(), 0.0, acc));
    }
    sectors.sort_by(|a, b| {
        a.sector_name
            .cmp(&b.sector_name)
            .then_with(|| a.sector_id.cmp(&b.sector_id))
    });

    let spend_cents = sectors
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(to_cents(s.spend)));
    let planned_cents = sectors
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(to_cents(s.planned)));
    let request_count = sectors
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.request_count));
    let spend = from_cents(spend_cents);
    let planned = from_cents(planned_cents);

    DashboardOverview {
        totals: DashboardTotals {
            spend,
            request_count,
            average_ticket: average_ticket(spend, request_count),
            planned,
            variance: from_cents(planned_cents.saturating_sub(spend_cents)),
            executed_percent: executed_percent(spend, planned),
        },
        sectors,
    }
}

fn summary(sector_id: Uuid, sector_name: String, planned: f64, acc: Accumulator) -> SectorSummary {
    let spend = from_cents(acc.spend_cents);
    SectorSummary {
        sector_id,
        sector_name,
        spend,
        request_count: acc.request_count,
        average_ticket: average_ticket(spend, acc.request_count),
        planned,
        variance: from_cents(to_cents(planned).saturating_sub(acc.spend_cents)),
        executed_percent: executed_percent(spend, planned),
        by_status: acc.by_status,
    }
}

/// Spend per calendar month of `year`, by creation date. Always 12 entries.
pub fn monthly_spend(requests: &[PurchaseRequest], year: i32) -> Vec<MonthlySpend> {
    let mut cents = [0i64; 12];
    let mut counts = [0u32; 12];
    for request in requests.iter().filter(|r| r.created_at.year() == year) {
        let month = request.created_at.month0() as usize;
        counts[month] = counts[month].saturating_add(1);
        if request.status.counts_as_spend() {
            cents[month] = cents[month].saturating_add(to_cents(request.total_value));
        }
    }

    (0..12)
        .map(|month| MonthlySpend {
            month: month as u32 + 1,
            spend: from_cents(cents[month]),
            request_count: counts[month],
        })
        .collect()
}
