//! HTTP route table.
//!
//! Paths are matched exactly and case-sensitively; anything else falls through
//! to a bare 404. Probe and control routes are marked `no-store` so no cache
//! between the orchestrator and the pod can answer for us.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request.

pub mod health;
pub mod index;
pub mod kill;

use axum::{
    http::{
        header::{HeaderValue, CACHE_CONTROL},
        StatusCode,
    },
    middleware,
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with every route and the request ID layer.
pub fn create_router(state: AppState) -> Router {
    let control_routes = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/damage", get(health::damage))
        .route("/heal", get(health::heal))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    Router::new()
        .route("/", get(index::index))
        .route("/kill", get(kill::kill))
        .merge(control_routes)
        .fallback(not_found)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, KubernetesConfig};
    use crate::middleware::REQUEST_ID_HEADER;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = AppConfig {
            kubernetes: KubernetesConfig {
                namespace: "ns1".to_string(),
                node: "n1".to_string(),
                pod: "p1".to_string(),
            },
            ..Default::default()
        };
        AppState::new(config)
    }

    async fn get_path(app: &Router, uri: &str) -> axum::response::Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_echoes_url_and_labels() {
        let app = create_router(test_state());

        let response = get_path(&app, "/?foo=bar").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[axum::http::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let body = body_string(response).await;
        assert!(body.contains("Requested URL: /?foo=bar"));
        assert!(body.contains("Namespace: ns1"));
        assert!(body.contains("Node:      n1"));
        assert!(body.contains("Pod:       p1"));
    }

    #[tokio::test]
    async fn test_healthz_not_ready_by_default() {
        let app = create_router(test_state());

        let response = get_path(&app, "/healthz").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_heal_overrides_damage() {
        let state = test_state();
        let app = create_router(state.clone());

        assert_eq!(get_path(&app, "/damage").await.status(), StatusCode::OK);
        assert_eq!(get_path(&app, "/heal").await.status(), StatusCode::OK);
        assert!(state.health.is_ready());

        let response = get_path(&app, "/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_damage_overrides_heal() {
        let app = create_router(test_state());

        get_path(&app, "/heal").await;
        get_path(&app, "/damage").await;

        let response = get_path(&app, "/healthz").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_damage_is_idempotent() {
        let app = create_router(test_state());

        get_path(&app, "/heal").await;
        get_path(&app, "/damage").await;
        assert_eq!(
            get_path(&app, "/healthz").await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        get_path(&app, "/damage").await;
        assert_eq!(
            get_path(&app, "/healthz").await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_control_responses_have_empty_body() {
        let app = create_router(test_state());

        for path in ["/damage", "/heal"] {
            let response = get_path(&app, path).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_string(response).await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let app = create_router(test_state());

        let response = get_path(&app, "/nonexistent").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.is_empty());

        assert_eq!(get_path(&app, "/HEALTHZ").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get_path(&app, "/healthz/extra").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_head_is_routed_like_get() {
        let state = test_state();
        let app = create_router(state.clone());
        let head = |uri: &str| {
            Request::builder()
                .method(Method::HEAD)
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(head("/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        state.health.heal();
        let response = app.clone().oneshot(head("/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.is_empty());

        let response = app.clone().oneshot(head("/nonexistent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_other_methods_are_rejected() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/heal")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_probe_routes_are_not_cacheable() {
        let app = create_router(test_state());

        for path in ["/healthz", "/damage", "/heal"] {
            let response = get_path(&app, path).await;
            assert_eq!(response.headers()[CACHE_CONTROL], CACHE_CONTROL_NO_STORE);
        }
        let index = get_path(&app, "/").await;
        assert!(index.headers().get(CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn test_request_id_header_present() {
        let app = create_router(test_state());

        let first = get_path(&app, "/").await;
        let second = get_path(&app, "/nonexistent").await;
        let first_id = first.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_owned();
        let second_id = second.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_owned();

        assert_eq!(first_id.len(), 36);
        assert_ne!(first_id, second_id);
    }
}
