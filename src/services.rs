pub mod booking_service;
pub mod fee_service;
pub mod pricing_service;
