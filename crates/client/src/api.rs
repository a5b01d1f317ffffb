//! Fixed reference data for the API under test: base URL, versioned path
//! templates, well-known ids, and response-time budgets.

use std::time::Duration;

pub const BASE_URL: &str = "https://fakerestapi.azurewebsites.net";
pub const API_VERSION: &str = "/api/v1";

pub const BOOKS_ENDPOINT: &str = "/api/v1/Books";
pub const AUTHORS_ENDPOINT: &str = "/api/v1/Authors";

/// Collection item path, id substituted into the template.
pub fn book_path(id: i32) -> String {
    format!("{BOOKS_ENDPOINT}/{id}")
}

pub fn author_path(id: i32) -> String {
    format!("{AUTHORS_ENDPOINT}/{id}")
}

// Reference data assumed present on the remote service.
pub const VALID_BOOK_ID: i32 = 1;
pub const VALID_AUTHOR_ID: i32 = 1;
/// Well beyond the seeded data set; treated as known-invalid.
pub const UNKNOWN_ID: i32 = 99999;
pub const NEGATIVE_ID: i32 = -1;

// Response-time budgets used by the timing scenarios.
pub const ACCEPTABLE_RESPONSE_TIME: Duration = Duration::from_millis(2000);
pub const FAST_RESPONSE_TIME: Duration = Duration::from_millis(500);
/// Hard ceiling: anything slower fails the timing scenarios outright.
pub const RESPONSE_TIME_CEILING: Duration = Duration::from_millis(5000);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths_substitute_the_id() {
        assert_eq!(book_path(5), "/api/v1/Books/5");
        assert_eq!(author_path(99999), "/api/v1/Authors/99999");
        assert_eq!(book_path(NEGATIVE_ID), "/api/v1/Books/-1");
    }

    #[test]
    fn collection_endpoints_are_versioned() {
        assert!(BOOKS_ENDPOINT.starts_with(API_VERSION));
        assert!(AUTHORS_ENDPOINT.starts_with(API_VERSION));
    }
}
