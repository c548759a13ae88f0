pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryResourceRepository;
pub use postgres::PgResourceRepository;
pub use repository::{RepositoryError, ResourceRepository};
