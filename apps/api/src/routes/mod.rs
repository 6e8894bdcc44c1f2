pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommend::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs", get(handlers::handle_list_jobs))
        .route("/api/v1/jobs/:title", get(handlers::handle_get_job))
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_recommend),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::dataset::Dataset;
    use crate::llm_client::DisabledGenerator;
    use crate::recommend::pipeline::RecommendSettings;

    fn test_app() -> Router {
        let config = Config::default();
        build_router(AppState {
            dataset: Arc::new(Dataset::sample()),
            llm: Arc::new(DisabledGenerator),
            settings: RecommendSettings::from(&config),
            config,
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_dataset_size() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = test_app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["jobs_loaded"], 5);
        assert_eq!(body["ai_enabled"], false);
        assert!(body["ai_model"].is_null());
    }

    #[tokio::test]
    async fn recommendations_return_dataset_matches() {
        let req = post_json("/api/v1/recommendations", r#"{"skills": "Kubernetes, Dockr"}"#);
        let response = test_app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["title"], "DevOps Engineer");
        assert_eq!(recs[0]["source"], "dataset");
        assert_eq!(recs[0]["match_type"], "exact");
        assert_eq!(recs[0]["matched_skills"], serde_json::json!(["kubernetes"]));
        assert_eq!(recs[0]["near_matches"][0]["job_skill"], "docker");
        assert_eq!(body["ai_enabled"], false);
    }

    #[tokio::test]
    async fn empty_skills_are_rejected() {
        let req = post_json("/api/v1/recommendations", r#"{"skills": []}"#);
        let response = test_app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Please enter at least one skill");
    }

    #[tokio::test]
    async fn malformed_bodies_are_validation_errors() {
        for body in [r#"{"skills": 42}"#, "{}", "not json"] {
            let req = post_json("/api/v1/recommendations", body);
            let response = test_app().oneshot(req).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "VALIDATION_ERROR", "body: {body}");
            assert!(json["error"]["message"].as_str().is_some_and(|m| !m.is_empty()));
        }
    }

    #[tokio::test]
    async fn missing_content_type_is_a_validation_error() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/recommendations")
            .body(Body::from(r#"{"skills": "rust"}"#))
            .unwrap();
        let response = test_app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn job_lookup_is_case_insensitive() {
        let req = Request::builder()
            .uri("/api/v1/jobs/data%20scientist")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Data Scientist");
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let req = Request::builder()
            .uri("/api/v1/jobs/astronaut")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn job_list_contains_every_record() {
        let req = Request::builder().uri("/api/v1/jobs").body(Body::empty()).unwrap();
        let response = test_app().oneshot(req).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["total"], 5);
        assert_eq!(body["jobs"].as_array().unwrap().len(), 5);
    }
}
