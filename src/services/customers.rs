//! Customer list composition: decode, filter, sort, paginate, enrich.

use std::collections::HashMap;

use validator::Validate;

use crate::domain::category::CustomerCategory;
use crate::domain::customer::Customer;
use crate::domain::types::CategoryId;
use crate::dto::customer::{CategorySummary, CustomerListParams, CustomerRow};
use crate::export::{self, ExportFile};
use crate::pagination::PAGINATION_DEFAULTS;
use crate::repository::{CategoryReader, CustomerListQuery, CustomerReader, SortKey};
use crate::services::{ServiceError, ServiceResult};

fn non_negative(value: Option<i64>, default: usize, field: &str) -> ServiceResult<usize> {
    match value {
        None => Ok(default),
        Some(v) => usize::try_from(v)
            .map_err(|_| ServiceError::InvalidRequest(format!("{field} must not be negative"))),
    }
}

/// Validates the wire descriptor and fills in pagination defaults.
pub fn decode_request(params: CustomerListParams) -> ServiceResult<CustomerListQuery> {
    params
        .validate()
        .map_err(|err| ServiceError::InvalidRequest(err.to_string()))?;

    let skip = non_negative(params.skip, PAGINATION_DEFAULTS.skip, "skip")?;
    let take = non_negative(params.take, PAGINATION_DEFAULTS.take, "take")?;
    let descending = params.descending.unwrap_or(PAGINATION_DEFAULTS.descending);

    Ok(CustomerListQuery::new()
        .search(params.search_text.unwrap_or_default())
        .sort_by(SortKey::parse(params.sort_by.as_deref()), descending)
        .paginate(skip, take))
}

impl From<&CustomerCategory> for CategorySummary {
    fn from(category: &CustomerCategory) -> Self {
        Self {
            code: category.code.clone(),
            description: category.description.clone(),
        }
    }
}

fn to_row(customer: Customer, category: Option<CategorySummary>) -> CustomerRow {
    CustomerRow {
        id: customer.id.get(),
        name: customer.name,
        address: customer.address,
        email: customer.email,
        phone: customer.phone,
        iban: customer.iban,
        customer_category: category,
    }
}

/// Attaches category summaries with a single batched lookup. Unresolved ids
/// leave the row without category.
fn enrich<R>(repo: &R, customers: Vec<Customer>) -> ServiceResult<Vec<CustomerRow>>
where
    R: CategoryReader + ?Sized,
{
    let mut ids: Vec<CategoryId> = customers
        .iter()
        .filter_map(|c| c.customer_category_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let categories: HashMap<CategoryId, CategorySummary> = if ids.is_empty() {
        HashMap::new()
    } else {
        repo.list_categories_by_ids(&ids)
            .map_err(|err| {
                log::error!("Failed to load customer categories: {err}");
                err
            })?
            .iter()
            .map(|c| (c.id, CategorySummary::from(c)))
            .collect()
    };

    Ok(customers
        .into_iter()
        .map(|customer| {
            let category = customer
                .customer_category_id
                .and_then(|id| categories.get(&id).cloned());
            to_row(customer, category)
        })
        .collect())
}

/// Returns the filtered, sorted, paginated and enriched customer rows.
pub fn list_customers<R>(repo: &R, params: CustomerListParams) -> ServiceResult<Vec<CustomerRow>>
where
    R: CustomerReader + CategoryReader + ?Sized,
{
    let query = decode_request(params)?;

    let customers = repo.list_customers(&query).map_err(|err| {
        log::error!("Failed to list customers: {err}");
        err
    })?;

    enrich(repo, customers)
}

/// Runs the same query as [`list_customers`] and serializes the rows to XML.
pub fn export_customers<R>(repo: &R, params: CustomerListParams) -> ServiceResult<ExportFile>
where
    R: CustomerReader + CategoryReader + ?Sized,
{
    let rows = list_customers(repo, params)?;

    export::export_customers(&rows).map_err(|err| {
        log::error!("Failed to export customers: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::NewCustomerCategory;
    use crate::domain::customer::NewCustomer;
    use crate::domain::types::CustomerId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::memory::InMemoryRepository;
    use crate::repository::mock::MockRepository;
    use crate::repository::{CategoryWriter, CustomerWriter};

    fn customer(id: i32, name: &str, email: &str, category: Option<i32>) -> Customer {
        Customer {
            id: CustomerId::new(id).expect("valid id"),
            name: name.to_string(),
            address: String::new(),
            email: email.to_string(),
            phone: String::new(),
            iban: String::new(),
            customer_category_id: category.map(|c| CategoryId::new(c).expect("valid id")),
        }
    }

    fn seeded(customers: &[(&str, &str)]) -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        let new: Vec<_> = customers
            .iter()
            .map(|(name, email)| NewCustomer::new(*name, "", *email, "", "", None))
            .collect();
        repo.create_customers(&new).expect("seed");
        repo
    }

    fn names(rows: &[CustomerRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn decode_applies_defaults() {
        let query = decode_request(CustomerListParams::default()).expect("valid");
        assert_eq!(query, CustomerListQuery::new());
    }

    #[test]
    fn decode_rejects_negative_paging() {
        let result = decode_request(CustomerListParams::default().paginate(-1, 5));
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));

        let result = decode_request(CustomerListParams::default().paginate(0, -1));
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[test]
    fn invalid_request_never_reaches_storage() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers().never();
        repo.expect_list_categories_by_ids().never();

        let result = list_customers(&repo, CustomerListParams::default().paginate(-3, 1));

        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[test]
    fn search_matches_name_or_email_case_insensitively() {
        let repo = seeded(&[("Alice", "a@x.com"), ("bob", "b@x.com")]);

        let rows = list_customers(&repo, CustomerListParams::default().search("b"))
            .expect("list");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[0].name, "bob");
    }

    #[test]
    fn search_is_idempotent() {
        let repo = seeded(&[
            ("Anna", "anna@x.com"),
            ("Bert", "b@an.org"),
            ("Carl", "carl@x.com"),
            ("DANIEL", "d@x.com"),
        ]);
        let params = CustomerListParams::default().search("an");

        let once = list_customers(&repo, params.clone()).expect("list");

        let refiltered = seeded(
            &once
                .iter()
                .map(|r| (r.name.as_str(), r.email.as_str()))
                .collect::<Vec<_>>(),
        );
        let twice = list_customers(&refiltered, params).expect("list");

        assert_eq!(names(&once), names(&twice));
        assert_eq!(names(&once), vec!["Anna", "Bert", "DANIEL"]);
    }

    #[test]
    fn default_sort_orders_names_ordinally() {
        let repo = seeded(&[("beta", ""), ("Alpha", ""), ("alpha", ""), ("Beta", "")]);

        let asc = list_customers(&repo, CustomerListParams::default()).expect("list");
        assert_eq!(names(&asc), vec!["Alpha", "Beta", "alpha", "beta"]);
        assert!(asc.windows(2).all(|w| w[0].name <= w[1].name));

        let desc = list_customers(&repo, CustomerListParams::default().sort_by("name", true))
            .expect("list");
        assert!(desc.windows(2).all(|w| w[0].name >= w[1].name));
    }

    #[test]
    fn unknown_sort_key_falls_back_to_name() {
        let repo = seeded(&[("b", "a@x.com"), ("a", "b@x.com")]);

        let rows = list_customers(&repo, CustomerListParams::default().sort_by("phone", false))
            .expect("list");

        assert_eq!(names(&rows), vec!["a", "b"]);
    }

    #[test]
    fn email_descending_take_one_returns_greatest_email() {
        let repo = seeded(&[("A", "m@x.com"), ("B", "z@x.com"), ("C", "c@x.com")]);

        let rows = list_customers(
            &repo,
            CustomerListParams::default()
                .sort_by("email", true)
                .paginate(0, 1),
        )
        .expect("list");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "z@x.com");
    }

    #[test]
    fn page_is_a_window_of_the_sorted_sequence() {
        let repo = seeded(&[("e", ""), ("d", ""), ("c", ""), ("b", ""), ("a", "")]);
        let full = list_customers(&repo, CustomerListParams::default()).expect("list");

        for skip in 0..7 {
            for take in 0..4 {
                let page = list_customers(
                    &repo,
                    CustomerListParams::default().paginate(skip, take),
                )
                .expect("list");
                let expected: Vec<_> = full
                    .iter()
                    .skip(skip as usize)
                    .take(take as usize)
                    .cloned()
                    .collect();
                assert!(page.len() <= take as usize);
                assert_eq!(page, expected);
            }
        }
    }

    #[test]
    fn category_is_attached_when_it_resolves() {
        let repo = InMemoryRepository::new();
        let vip = repo
            .create_category(&NewCustomerCategory::new("VIP", "Top tier"))
            .expect("category");
        repo.create_customers(&[
            NewCustomer::new("Alice", "", "a@x.com", "", "", Some(vip.id)),
            NewCustomer::new(
                "Bob",
                "",
                "b@x.com",
                "",
                "",
                Some(CategoryId::new(404).expect("valid id")),
            ),
            NewCustomer::new("Carol", "", "c@x.com", "", "", None),
        ])
        .expect("seed");

        let rows = list_customers(&repo, CustomerListParams::default()).expect("list");

        assert_eq!(
            rows[0].customer_category,
            Some(CategorySummary {
                code: "VIP".to_string(),
                description: "Top tier".to_string(),
            })
        );
        assert_eq!(rows[1].customer_category, None);
        assert_eq!(rows[2].customer_category, None);
    }

    #[test]
    fn category_lookup_is_batched_and_deduplicated() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers().times(1).returning(|_| {
            Ok(vec![
                customer(1, "a", "a@x.com", Some(2)),
                customer(2, "b", "b@x.com", Some(1)),
                customer(3, "c", "c@x.com", Some(2)),
            ])
        });
        repo.expect_list_categories_by_ids()
            .times(1)
            .withf(|ids| ids.iter().map(|id| id.get()).collect::<Vec<_>>() == vec![1, 2])
            .returning(|_| {
                Ok(vec![CustomerCategory {
                    id: CategoryId::new(2).expect("valid id"),
                    code: "B2B".to_string(),
                    description: "Business".to_string(),
                }])
            });

        let rows = list_customers(&repo, CustomerListParams::default()).expect("list");

        let codes: Vec<_> = rows
            .iter()
            .map(|r| r.customer_category.as_ref().map(|c| c.code.as_str()))
            .collect();
        assert_eq!(codes, vec![Some("B2B"), None, Some("B2B")]);
    }

    #[test]
    fn no_category_lookup_without_references() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .returning(|_| Ok(vec![customer(1, "a", "a@x.com", None)]));
        repo.expect_list_categories_by_ids().never();

        let rows = list_customers(&repo, CustomerListParams::default()).expect("list");

        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn storage_failure_fails_the_whole_call() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .returning(|_| Err(RepositoryError::ConnectionError("down".to_string())));

        let result = list_customers(&repo, CustomerListParams::default());

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn category_read_failure_fails_the_whole_call() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .returning(|_| Ok(vec![customer(1, "a", "a@x.com", Some(1))]));
        repo.expect_list_categories_by_ids()
            .returning(|_| Err(RepositoryError::DatabaseError("locked".to_string())));

        let result = list_customers(&repo, CustomerListParams::default());

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn export_uses_the_listed_rows() {
        let repo = seeded(&[("Tom & Jerry", "tj@x.com")]);

        let file = export_customers(&repo, CustomerListParams::default()).expect("export");

        let xml = String::from_utf8(file.bytes).expect("utf-8");
        assert!(xml.contains("<Name>Tom &amp; Jerry</Name>"));
        assert_eq!(file.file_name, "Customers.xml");
    }
}
