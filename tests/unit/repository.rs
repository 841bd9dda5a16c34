use chrono::{Duration, Utc};
use gecom::db::enums::{Priority, RequestStatus};
use gecom::db::models::purchase_request::PurchaseRequest;
use gecom::db::repositories::{
    InMemoryPurchaseRequestRepository, PageRequest, PurchaseRequestFilter, PurchaseRequestRepository,
};
use uuid::Uuid;

fn request(number: &str, sector_id: Uuid, minutes_ago: i64) -> PurchaseRequest {
    let created = Utc::now() - Duration::minutes(minutes_ago);
    PurchaseRequest {
        id: Uuid::new_v4(),
        number: number.to_string(),
        description: format!("Pedido {}", number),
        justification: None,
        sector_id,
        requester_id: Uuid::new_v4(),
        funding_source: "Tesouro".to_string(),
        total_value: 10.0,
        priority: Priority::Medium,
        status: RequestStatus::Pending,
        items: Vec::new(),
        workflow: None,
        created_at: created,
        updated_at: created,
    }
}

#[tokio::test]
async fn list_filters_sorts_and_paginates() {
    let sector = Uuid::new_v4();
    let other = Uuid::new_v4();
    let repo = InMemoryPurchaseRequestRepository::with_requests(vec![
        request("DFD-2026-0001", sector, 30),
        request("DFD-2026-0002", sector, 20),
        request("DFD-2026-0003", other, 10),
    ]);

    let all = repo.list(&PurchaseRequestFilter::default()).await.unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.items[0].number, "DFD-2026-0003");

    let scoped = repo
        .list(&PurchaseRequestFilter {
            visible_sectors: Some(vec![sector]),
            page: Some(PageRequest::new(Some(2), Some(1))),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(scoped.total, 2);
    assert_eq!(scoped.items.len(), 1);
    assert_eq!(scoped.items[0].number, "DFD-2026-0001");

    let searched = repo
        .list(&PurchaseRequestFilter {
            search: Some("0002".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(searched.total, 1);
}

#[tokio::test]
async fn numbering_and_removal() {
    let repo = InMemoryPurchaseRequestRepository::new();
    assert_eq!(repo.next_number(2026).await.unwrap(), "DFD-2026-0001");

    let first = repo.add(request("DFD-2026-0007", Uuid::new_v4(), 0)).await.unwrap();
    assert_eq!(repo.next_number(2026).await.unwrap(), "DFD-2026-0008");
    assert_eq!(repo.next_number(2027).await.unwrap(), "DFD-2027-0001");

    assert!(repo.add(request("DFD-2026-0007", Uuid::new_v4(), 0)).await.is_err());
    assert!(repo.remove(first.id).await.unwrap());
    assert!(!repo.remove(first.id).await.unwrap());
    assert!(repo.update(first).await.is_err());
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let sector = Uuid::new_v4();
    let mut discounted = request("DFD-2026-0004", sector, 5);
    discounted.description = "Toner 50% mais barato".to_string();
    let repo = InMemoryPurchaseRequestRepository::with_requests(vec![
        request("DFD-2026-0001", sector, 30),
        discounted,
    ]);

    let underscore = repo
        .list(&PurchaseRequestFilter {
            search: Some("_".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(underscore.total, 0);

    let percent = repo
        .list(&PurchaseRequestFilter {
            search: Some("50%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(percent.total, 1);
    assert_eq!(percent.items[0].number, "DFD-2026-0004");
}
