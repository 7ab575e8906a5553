pub mod health;
pub mod meals;
pub mod metrics;
pub mod summary;
