use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Acquiring a connection slower than this is logged
const SLOW_ACQUIRE_MS: u64 = 100;

/// Supabase's pooler caps client connections, so the pool stays small
const MAX_POOL_SIZE: u32 = 10;

/// Connection pool to the Supabase Postgres database
#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(database_url: &str) -> AppResult<Self> {
        Self::check_url(database_url)?;

        let max_size = std::thread::available_parallelism()
            .map(|n| n.get() as u32 * 2)
            .unwrap_or(4)
            .min(MAX_POOL_SIZE);

        let pool = r2d2::Pool::builder()
            .max_size(max_size)
            .min_idle(Some(1))
            .connection_timeout(Duration::from_secs(10))
            .idle_timeout(Some(Duration::from_secs(300)))
            .test_on_check_out(true)
            .build(ConnectionManager::<PgConnection>::new(database_url))
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
            })?;

        log_info!("Database pool ready (max_size: {})", max_size);
        Ok(Self { pool })
    }

    fn check_url(database_url: &str) -> AppResult<()> {
        if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
            return Err(AppError::InvalidInput(
                "DATABASE_URL must start with postgres:// or postgresql://".to_string(),
            ));
        }

        // host and database only, never credentials
        let target = database_url
            .rsplit_once('@')
            .map(|(_, host)| host)
            .unwrap_or("unknown host");
        log_info!("Connecting to {}", target);
        Ok(())
    }

    pub fn get_connection(&self) -> AppResult<DbConnection> {
        let start = Instant::now();
        let conn = self.pool.get().map_err(|e| {
            LogContext::error_with_context(&e, "Failed to acquire database connection");
            AppError::from(e)
        })?;

        let waited = start.elapsed().as_millis() as u64;
        if waited > SLOW_ACQUIRE_MS {
            LogContext::performance_metric("db_connection_acquire", waited, Some("slow"));
        }
        Ok(conn)
    }

    /// Runs a diesel closure on the blocking pool with a pooled connection
    pub async fn run<T, F>(self: &Arc<Self>, operation: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    {
        let db = Arc::clone(self);
        task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;
            operation(&mut conn)
        })
        .await?
    }

    /// Applies the embedded schema migrations
    pub fn run_migrations(&self) -> AppResult<()> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;
        log_info!("Applied {} pending migrations", applied.len());
        Ok(())
    }
}
