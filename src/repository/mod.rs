use crate::db::{DbConnection, DbPool};
use crate::domain::category::{CustomerCategory, NewCustomerCategory};
use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::CategoryId;
use crate::pagination::PAGINATION_DEFAULTS;
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod customer;
pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Allow-listed sort keys of the customer list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Email,
}

impl SortKey {
    /// Resolves a requested key name. Unknown or missing names sort by name.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("email") => SortKey::Email,
            _ => SortKey::Name,
        }
    }

    /// Field of `customer` this key sorts on.
    pub fn field(self, customer: &Customer) -> &str {
        match self {
            SortKey::Name => &customer.name,
            SortKey::Email => &customer.email,
        }
    }
}

/// Validated list request: filter, then sort, then skip/take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerListQuery {
    /// Non-empty search term matched case-insensitively against name or email.
    pub search: Option<String>,
    pub sort_by: SortKey,
    pub descending: bool,
    pub skip: usize,
    pub take: usize,
}

impl Default for CustomerListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            sort_by: SortKey::default(),
            descending: PAGINATION_DEFAULTS.descending,
            skip: PAGINATION_DEFAULTS.skip,
            take: PAGINATION_DEFAULTS.take,
        }
    }

    /// Sets the search term; an empty term disables filtering.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn sort_by(mut self, key: SortKey, descending: bool) -> Self {
        self.sort_by = key;
        self.descending = descending;
        self
    }

    pub fn paginate(mut self, skip: usize, take: usize) -> Self {
        self.skip = skip;
        self.take = take;
        self
    }
}

pub trait CustomerReader {
    /// Returns the page of customers selected by `query`, in sort order.
    fn list_customers(&self, query: &CustomerListQuery) -> RepositoryResult<Vec<Customer>>;
}

pub trait CustomerWriter {
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
}

pub trait CategoryReader {
    /// Returns the categories among `ids` that exist; missing ids are skipped.
    fn list_categories_by_ids(&self, ids: &[CategoryId])
    -> RepositoryResult<Vec<CustomerCategory>>;
}

pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCustomerCategory)
    -> RepositoryResult<CustomerCategory>;
}

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(crate::db::get_connection(&self.pool)?)
    }
}
