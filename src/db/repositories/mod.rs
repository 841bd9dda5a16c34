pub mod managers;
pub mod mayors;
pub mod memory;
pub mod municipalities;
pub mod purchase_requests;
pub mod sectors;
pub mod users;

pub use memory::InMemoryPurchaseRequestRepository;
pub use purchase_requests::{
    Page, PageRequest, PgPurchaseRequestRepository, PurchaseRequestFilter,
    PurchaseRequestRepository,
};
