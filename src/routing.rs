//! Application router configuration.

use axum::{Router, middleware, routing::get};

use crate::{
    AppState,
    category::Category,
    endpoints,
    logging::logging_middleware,
    not_found::get_404_not_found,
    resource::{create_documents, get_document, list_documents, patch_document, replace_document},
    vendor::Vendor,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let category_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_documents::<Category>).post(create_documents::<Category>),
        )
        .route(
            endpoints::CATEGORY,
            get(get_document::<Category>)
                .put(replace_document::<Category>)
                .patch(patch_document::<Category>),
        );

    let vendor_routes = Router::new()
        .route(
            endpoints::VENDORS,
            get(list_documents::<Vendor>).post(create_documents::<Vendor>),
        )
        .route(
            endpoints::VENDOR,
            get(get_document::<Vendor>)
                .put(replace_document::<Vendor>)
                .patch(patch_document::<Vendor>),
        );

    category_routes
        .merge(vendor_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, NotFoundPolicy,
        category::Category,
        endpoints::{self, format_endpoint},
        seed::{category_seed, seed_database, vendor_seed},
        vendor::Vendor,
    };

    use super::build_router;

    async fn create_seeded_server() -> TestServer {
        let state =
            AppState::with_sqlite(Connection::open_in_memory().unwrap(), NotFoundPolicy::default())
                .unwrap();
        seed_database(state.category_store.as_ref(), state.vendor_store.as_ref())
            .await
            .unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn list_after_seeding_returns_seeded_count() {
        let server = create_seeded_server().await;

        let categories = server.get(endpoints::CATEGORIES).await.json::<Vec<Category>>();
        let vendors = server.get(endpoints::VENDORS).await.json::<Vec<Vendor>>();

        assert_eq!(categories.len(), category_seed().len());
        assert_eq!(vendors.len(), vendor_seed().len());
    }

    #[tokio::test]
    async fn get_by_id_returns_stored_document() {
        let server = create_seeded_server().await;
        let first = server.get(endpoints::VENDORS).await.json::<Vec<Vendor>>()[0].clone();
        let id = first.id.clone().unwrap();

        let response = server.get(&format_endpoint(endpoints::VENDOR, &id)).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vendor>(), first);
    }

    #[tokio::test]
    async fn create_increases_count_by_batch_size() {
        let server = create_seeded_server().await;

        server
            .post(endpoints::CATEGORIES)
            .json(&json!([{ "description": "Spices" }, { "description": "Herbs" }]))
            .await
            .assert_status(StatusCode::CREATED);

        let categories = server.get(endpoints::CATEGORIES).await.json::<Vec<Category>>();
        assert_eq!(categories.len(), category_seed().len() + 2);
    }

    #[tokio::test]
    async fn patch_then_get_returns_patched_document() {
        let server = create_seeded_server().await;
        let first = server.get(endpoints::CATEGORIES).await.json::<Vec<Category>>()[0].clone();
        let path = format_endpoint(endpoints::CATEGORY, first.id.as_deref().unwrap());

        server
            .patch(&path)
            .json(&json!({ "description": "Berries" }))
            .await
            .assert_status_ok();

        let patched = server.get(&path).await.json::<Category>();
        assert_eq!(patched.description, "Berries");
        assert_eq!(patched.id, first.id);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = create_seeded_server().await;

        let response = server.get("/api/v1/nothing-here").await;

        response.assert_status_not_found();
    }
}
