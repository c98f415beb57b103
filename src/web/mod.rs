pub mod api_service;
pub mod errors;
pub mod records_service;
