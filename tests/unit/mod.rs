mod dashboard;
mod purchase_requests;
mod repository;
mod validation;
mod workflow;
