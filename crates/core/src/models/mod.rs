pub mod analytics;
pub mod chart;
pub mod currency;
pub mod payment;
pub mod plan;
pub mod settings;
pub mod transaction;
pub mod user;
