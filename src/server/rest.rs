//! REST exposure of the registered collections
//!
//! Consumes a [`CollectionRegistry`] and produces the Axum `Router` with
//! health checks, the collection index and every collection's routes.

use crate::config::PortalConfig;
use crate::core::error::{LabdeskError, RecordError};
use crate::server::registry::{CollectionInfo, CollectionRegistry};
use axum::http::{HeaderName, Method, Uri, header};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::auth::{MEMBER_ID_HEADER, MEMBER_ROLES_HEADER};

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - `GET /collections`
    /// - Collection routes
    /// - Custom routes
    /// - A fallback answering `UNKNOWN_COLLECTION` for every other path
    pub fn build_router(
        registry: &CollectionRegistry,
        config: &PortalConfig,
        custom_routes: Vec<Router>,
    ) -> Router {
        let collections = Arc::new(registry.describe());

        let mut app = Self::health_routes()
            .merge(Self::collection_index(collections))
            .merge(registry.build_routes(config));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.fallback(Self::unknown_collection)
            .layer(Self::cors())
            .layer(TraceLayer::new_for_http())
    }

    async fn unknown_collection(uri: Uri) -> LabdeskError {
        let collection = uri
            .path()
            .split('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or_default();

        RecordError::UnknownCollection {
            collection: collection.to_string(),
        }
        .into()
    }

    fn cors() -> CorsLayer {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static(MEMBER_ID_HEADER),
                HeaderName::from_static(MEMBER_ROLES_HEADER),
            ])
            .max_age(Duration::from_secs(60 * 60))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "labdesk"
        }))
    }

    fn collection_index(collections: Arc<Vec<CollectionInfo>>) -> Router {
        Router::new().route(
            "/collections",
            get(move || {
                let collections = collections.clone();
                async move { Json(json!({ "collections": collections.as_slice() })) }
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_without_collections() {
        let app = RestExposure::build_router(
            &CollectionRegistry::new(),
            &PortalConfig::default_config(),
            vec![],
        );

        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["service"], "labdesk");
    }

    #[tokio::test]
    async fn test_unknown_collection_is_404() {
        let app = RestExposure::build_router(
            &CollectionRegistry::new(),
            &PortalConfig::default_config(),
            vec![],
        );

        let response = app
            .oneshot(Request::get("/nothing/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["code"], "UNKNOWN_COLLECTION");
        assert_eq!(value["details"]["collection"], "nothing");
    }
}
