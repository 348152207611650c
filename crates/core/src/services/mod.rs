pub mod aggregation_service;
pub mod lifecycle_service;
pub mod plan_service;
pub mod returns_service;
pub mod valuation_service;
