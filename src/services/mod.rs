pub mod auth_service;
pub mod context;
pub mod dashboard_service;
pub mod managers_service;
pub mod mayors_service;
pub mod municipalities_service;
pub mod permissions;
pub mod purchase_requests_service;
pub mod sectors_service;
pub mod workflows_service;

pub use auth_service::AuthService;
pub use context::RequestContext;
pub use dashboard_service::DashboardService;
pub use managers_service::ManagersService;
pub use mayors_service::MayorsService;
pub use municipalities_service::MunicipalitiesService;
pub use purchase_requests_service::PurchaseRequestsService;
pub use sectors_service::SectorsService;
pub use workflows_service::WorkflowsService;
