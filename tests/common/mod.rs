#![allow(dead_code)]

use customer_directory::db::{DbPool, establish_connection_pool};
use customer_directory::domain::category::NewCustomerCategory;
use customer_directory::domain::customer::NewCustomer;
use customer_directory::domain::types::CategoryId;
use customer_directory::repository::{CategoryWriter, CustomerWriter, DieselRepository};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite database living in a temporary directory for the duration
/// of a test.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(file_name: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(file_name);
        let url = path.to_str().expect("utf-8 path");

        let pool = establish_connection_pool(url).expect("pool");
        let mut conn = pool.get().expect("connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

/// Inserts `customers` as (name, email, category) triples in order.
pub fn seed(repo: &DieselRepository, customers: &[(&str, &str, Option<CategoryId>)]) {
    let new_customers: Vec<NewCustomer> = customers
        .iter()
        .map(|(name, email, category)| {
            NewCustomer::new(*name, "Addr", *email, "555", "IBAN", *category)
        })
        .collect();
    let inserted = repo.create_customers(&new_customers).expect("insert customers");
    assert_eq!(inserted, customers.len());
}

pub fn category(repo: &DieselRepository, code: &str, description: &str) -> CategoryId {
    repo.create_category(&NewCustomerCategory::new(code, description))
        .expect("insert category")
        .id
}
