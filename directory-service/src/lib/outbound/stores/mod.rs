pub mod memory;
pub mod postgres;

pub use memory::InMemoryDirectory;
pub use postgres::PostgresOrgDirectory;
pub use postgres::PostgresUserStore;
