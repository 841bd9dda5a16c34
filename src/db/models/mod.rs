// Sub-modules organized by functional domain
pub mod api;
pub mod auth;
pub mod manager;
pub mod mayor;
pub mod municipality;
pub mod purchase_request;
pub mod sector;
pub mod workflow;

pub use api::*;
pub use auth::*;
pub use manager::*;
pub use mayor::*;
pub use municipality::*;
pub use purchase_request::*;
pub use sector::*;
