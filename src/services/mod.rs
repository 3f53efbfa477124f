pub mod aggregate;
pub mod auth_service;
