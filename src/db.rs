//! SQLite pool for the customer tables.
//!
//! Every pooled connection gets WAL journaling, a busy timeout and the
//! `casefold` function the customer search filters on.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::define_sql_function;
use diesel::result::QueryResult;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use log::error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

define_sql_function! {
    /// Unicode lower-casing backed by `str::to_lowercase`. SQLite's own
    /// `lower()` only folds ASCII letters.
    fn casefold(value: Text) -> Text;
}

/// Per-connection setup run when the pool hands out a connection.
#[derive(Debug)]
pub struct ConnectionOptions {
    pub enable_wal: bool,
    /// How long a reader waits on a write lock before failing.
    pub busy_timeout: Option<Duration>,
}

impl ConnectionOptions {
    fn apply(&self, conn: &mut SqliteConnection) -> QueryResult<()> {
        if self.enable_wal {
            conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        }
        if let Some(timeout) = self.busy_timeout {
            conn.batch_execute(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()))?;
        }
        casefold_utils::register_impl(conn, |value: String| value.to_lowercase())
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        self.apply(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Opens the pool used by [`crate::repository::DieselRepository`].
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions {
            enable_wal: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }))
        .build(manager)
}

/// Checks out a connection, logging pool exhaustion or failures.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get()
        .inspect_err(|e| error!("Failed to get connection from pool: {e}"))
}
