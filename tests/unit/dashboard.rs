use chrono::{TimeZone, Utc};
use gecom::dashboard::{SectorBudget, monthly_spend, summarize_sectors};
use gecom::db::enums::{Priority, RequestStatus};
use gecom::db::models::purchase_request::PurchaseRequest;
use uuid::Uuid;

fn request(sector_id: Uuid, status: RequestStatus, value: f64, month: u32) -> PurchaseRequest {
    let created = Utc.with_ymd_and_hms(2026, month, 15, 10, 0, 0).unwrap();
    PurchaseRequest {
        id: Uuid::new_v4(),
        number: format!("DFD-2026-{:04}", month),
        description: "Serviço".to_string(),
        justification: None,
        sector_id,
        requester_id: Uuid::new_v4(),
        funding_source: "Tesouro".to_string(),
        total_value: value,
        priority: Priority::High,
        status,
        items: Vec::new(),
        workflow: None,
        created_at: created,
        updated_at: created,
    }
}

#[test]
fn dashboard_totals_match_sector_sums() {
    let saude = Uuid::new_v4();
    let obras = Uuid::new_v4();
    let requests = vec![
        request(saude, RequestStatus::Completed, 1200.0, 1),
        request(saude, RequestStatus::Rejected, 800.0, 2),
        request(obras, RequestStatus::InProgress, 4000.0, 2),
    ];
    let budgets = vec![
        SectorBudget {
            sector_id: saude,
            name: "Saúde".to_string(),
            planned_budget: 10_000.0,
        },
        SectorBudget {
            sector_id: obras,
            name: "Obras".to_string(),
            planned_budget: 8_000.0,
        },
    ];

    let overview = summarize_sectors(&requests, &budgets);
    assert_eq!(overview.sectors[0].sector_name, "Obras");
    assert_eq!(overview.totals.spend, 5200.0);
    assert_eq!(overview.totals.request_count, 3);
    assert_eq!(overview.totals.planned, 18_000.0);
    assert_eq!(overview.totals.variance, 12_800.0);

    let series = monthly_spend(&requests, 2026);
    assert_eq!(series[0].spend, 1200.0);
    assert_eq!(series[1].spend, 4000.0);
    assert_eq!(series[1].request_count, 2);
}
