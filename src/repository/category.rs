use diesel::prelude::*;

use crate::domain::category::{CustomerCategory, NewCustomerCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{
    CustomerCategory as DbCustomerCategory, NewCustomerCategory as DbNewCustomerCategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories_by_ids(
        &self,
        ids: &[CategoryId],
    ) -> RepositoryResult<Vec<CustomerCategory>> {
        use crate::schema::customer_categories;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        customer_categories::table
            .filter(customer_categories::id.eq_any(raw_ids))
            .load::<DbCustomerCategory>(&mut conn)?
            .into_iter()
            .map(|c| CustomerCategory::try_from(c).map_err(RepositoryError::from))
            .collect()
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &NewCustomerCategory,
    ) -> RepositoryResult<CustomerCategory> {
        use crate::schema::customer_categories;

        let mut conn = self.conn()?;
        let insertable: DbNewCustomerCategory = new_category.into();

        let category = diesel::insert_into(customer_categories::table)
            .values(&insertable)
            .get_result::<DbCustomerCategory>(&mut conn)?;

        CustomerCategory::try_from(category).map_err(RepositoryError::from)
    }
}
