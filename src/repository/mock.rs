//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::category::{CustomerCategory, NewCustomerCategory};
use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::CategoryId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CategoryReader, CategoryWriter, CustomerListQuery, CustomerReader, CustomerWriter,
};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn list_customers(&self, query: &CustomerListQuery) -> RepositoryResult<Vec<Customer>>;
    }

    impl CategoryReader for Repository {
        fn list_categories_by_ids(
            &self,
            ids: &[CategoryId],
        ) -> RepositoryResult<Vec<CustomerCategory>>;
    }

    impl CustomerWriter for Repository {
        fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
    }

    impl CategoryWriter for Repository {
        fn create_category(
            &self,
            new_category: &NewCustomerCategory,
        ) -> RepositoryResult<CustomerCategory>;
    }
}
