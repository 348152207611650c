pub mod analytics;
pub mod chart;
pub mod deposit;
pub mod fund;
pub mod ledger;
pub mod monthly;
pub mod plan;
pub mod settings;
pub mod sip;
pub mod transaction;
