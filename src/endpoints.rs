//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/v1/vendors/{id}', use [format_endpoint].

/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/v1/categories";
/// The route to get, replace and patch a single category.
pub const CATEGORY: &str = "/api/v1/categories/{id}";
/// The route to list and create vendors.
pub const VENDORS: &str = "/api/v1/vendors";
/// The route to get, replace and patch a single vendor.
pub const VENDOR: &str = "/api/v1/vendors/{id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/vendors/{id}', '{id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::CATEGORY, "abc"));
        assert_endpoint_is_valid_uri(endpoints::VENDORS);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::VENDOR, "abc"));
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", "1");

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", "1");

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", "dummyId");

        assert_eq!(formatted_path, "/hello/dummyId/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
