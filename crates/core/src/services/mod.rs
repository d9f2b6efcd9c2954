pub mod aggregation_service;
pub mod demo_service;
pub mod export_service;
pub mod insights_service;
pub mod payment_service;
pub mod pricing_service;
pub mod transaction_service;
