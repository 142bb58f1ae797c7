use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::casefold;
use crate::domain::customer::{Customer, NewCustomer};
use crate::models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, SortKey,
};

/// Escapes `LIKE` wildcards so the term is matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn to_sql_int(value: usize, name: &str) -> RepositoryResult<i64> {
    i64::try_from(value)
        .map_err(|_| RepositoryError::ValidationError(format!("{name} is too large")))
}

impl CustomerReader for DieselRepository {
    fn list_customers(&self, query: &CustomerListQuery) -> RepositoryResult<Vec<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let mut items = customers::table.into_boxed::<Sqlite>();

        if let Some(term) = &query.search {
            let pattern = like_pattern(term);
            items = items.filter(
                casefold(customers::name)
                    .like(pattern.clone())
                    .escape('\\')
                    .or(casefold(customers::email).like(pattern).escape('\\')),
            );
        }

        // Ties keep insertion order in both directions.
        items = match (query.sort_by, query.descending) {
            (SortKey::Name, false) => items.order((customers::name.asc(), customers::id.asc())),
            (SortKey::Name, true) => items.order((customers::name.desc(), customers::id.asc())),
            (SortKey::Email, false) => items.order((customers::email.asc(), customers::id.asc())),
            (SortKey::Email, true) => items.order((customers::email.desc(), customers::id.asc())),
        };

        let customers = items
            .offset(to_sql_int(query.skip, "skip")?)
            .limit(to_sql_int(query.take, "take")?)
            .load::<DbCustomer>(&mut conn)?;

        customers
            .into_iter()
            .map(|c| Customer::try_from(c).map_err(RepositoryError::from))
            .collect()
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewCustomer> = new_customers.iter().map(Into::into).collect();
        let affected = diesel::insert_into(customers::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
