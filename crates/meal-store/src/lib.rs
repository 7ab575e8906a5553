pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use config::PostgresConfig;
pub use error::{PersistenceError, ProvisioningWarning, Result};
pub use memory::InMemoryMealStore;
pub use postgres::PostgresMealStore;
pub use store::MealStore;
