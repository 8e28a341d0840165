//! Database connection pool management

mod mysql;

pub use mysql::{create_lazy_pool, create_pool, run_migrations, DatabaseConfig, MIGRATIONS_DIR};

// Re-export MySqlPool for convenience
pub use sqlx::mysql::MySqlPool;
