use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::delete_post::delete_post;
use super::handlers::read_post::read_post;
use super::handlers::update_post::update_post;
use crate::domain::post::ports::PostServicePort;

#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<dyn PostServicePort>,
}

pub fn create_router(post_service: Arc<dyn PostServicePort>) -> Router {
    let state = AppState { post_service };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/posts", post(create_post))
        .route(
            "/api/posts/:post_id",
            get(read_post).patch(update_post).delete(delete_post),
        )
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header::AUTHORIZATION;
    use axum::http::StatusCode;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::post::models::AccessToken;
    use crate::domain::post::models::Post;
    use crate::domain::post::models::PostId;
    use crate::domain::post::models::PostText;
    use crate::domain::post::models::UserId;
    use crate::post::errors::PostError;

    mock! {
        pub TestPostService {}

        #[async_trait]
        impl PostServicePort for TestPostService {
            async fn create_post(&self, token: &AccessToken, text: PostText) -> Result<PostId, PostError>;
            async fn read_post(&self, token: &AccessToken, id: PostId) -> Result<Post, PostError>;
            async fn update_post(&self, token: &AccessToken, id: PostId, text: PostText) -> Result<(), PostError>;
            async fn delete_post(&self, token: &AccessToken, id: PostId) -> Result<(), PostError>;
        }
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(AUTHORIZATION, "Bearer t")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_read_post_envelope() {
        let mut service = MockTestPostService::new();
        service
            .expect_read_post()
            .withf(|token, id| token.as_str() == "t" && id.get() == 5)
            .times(1)
            .returning(|_, id| {
                Ok(Post {
                    id,
                    user_id: UserId(1),
                    text: PostText::new("hello".to_string()).unwrap(),
                })
            });

        let response = create_router(Arc::new(service))
            .oneshot(get("/api/posts/5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["post_id"], 5);
        assert_eq!(body["data"]["text"], "hello");
    }

    #[tokio::test]
    async fn test_non_positive_id_is_rejected_before_service() {
        let mut service = MockTestPostService::new();
        service.expect_read_post().times(0);

        let response = create_router(Arc::new(service))
            .oneshot(get("/api/posts/0"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let mut service = MockTestPostService::new();
        service
            .expect_read_post()
            .returning(|_, id| Err(PostError::NotFound(id)));

        let response = create_router(Arc::new(service))
            .oneshot(get("/api/posts/9"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_bearer_token_is_unprocessable() {
        let mut service = MockTestPostService::new();
        service.expect_read_post().times(0);

        let request = Request::builder()
            .uri("/api/posts/5")
            .header(AUTHORIZATION, "Bearer  ")
            .body(Body::empty())
            .unwrap();
        let response = create_router(Arc::new(service))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["message"], "token is required");
    }
}
