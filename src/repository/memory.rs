//! In-memory repository with the same list semantics as the Diesel one.
//!
//! Records are kept in insertion order and identifiers are never reused, so
//! the stable sort below orders ties exactly like the SQL `id` tie-break.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::category::{CustomerCategory, NewCustomerCategory};
use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::{CategoryId, CustomerId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CategoryReader, CategoryWriter, CustomerListQuery, CustomerReader, CustomerWriter,
};

#[derive(Debug, Default)]
struct Store {
    customers: Vec<Customer>,
    categories: Vec<CustomerCategory>,
    last_customer_id: i32,
    last_category_id: i32,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|_| RepositoryError::Unexpected("store lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|_| RepositoryError::Unexpected("store lock poisoned".to_string()))
    }
}

fn next_id(last: &mut i32) -> RepositoryResult<i32> {
    *last = last
        .checked_add(1)
        .ok_or_else(|| RepositoryError::ConstraintViolation("id space exhausted".to_string()))?;
    Ok(*last)
}

impl CustomerReader for InMemoryRepository {
    fn list_customers(&self, query: &CustomerListQuery) -> RepositoryResult<Vec<Customer>> {
        let store = self.read()?;

        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut matching: Vec<&Customer> = store
            .customers
            .iter()
            .filter(|c| needle.as_deref().is_none_or(|n| c.matches_search(n)))
            .collect();

        let key = query.sort_by;
        if query.descending {
            matching.sort_by(|a, b| key.field(b).cmp(key.field(a)));
        } else {
            matching.sort_by(|a, b| key.field(a).cmp(key.field(b)));
        }

        Ok(matching
            .into_iter()
            .skip(query.skip)
            .take(query.take)
            .cloned()
            .collect())
    }
}

impl CustomerWriter for InMemoryRepository {
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize> {
        let mut store = self.write()?;
        for new in new_customers {
            let id = CustomerId::new(next_id(&mut store.last_customer_id)?)?;
            store.customers.push(Customer {
                id,
                name: new.name.clone(),
                address: new.address.clone(),
                email: new.email.clone(),
                phone: new.phone.clone(),
                iban: new.iban.clone(),
                customer_category_id: new.customer_category_id,
            });
        }
        Ok(new_customers.len())
    }
}

impl CategoryReader for InMemoryRepository {
    fn list_categories_by_ids(
        &self,
        ids: &[CategoryId],
    ) -> RepositoryResult<Vec<CustomerCategory>> {
        let store = self.read()?;
        Ok(store
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }
}

impl CategoryWriter for InMemoryRepository {
    fn create_category(
        &self,
        new_category: &NewCustomerCategory,
    ) -> RepositoryResult<CustomerCategory> {
        let mut store = self.write()?;
        let category = CustomerCategory {
            id: CategoryId::new(next_id(&mut store.last_category_id)?)?,
            code: new_category.code.clone(),
            description: new_category.description.clone(),
        };
        store.categories.push(category.clone());
        Ok(category)
    }
}
