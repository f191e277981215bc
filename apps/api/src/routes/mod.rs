pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::outreach::handlers as outreach;
use crate::persona::handlers as persona;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/persona", post(persona::handle_create_persona))
        .route("/ideas", post(outreach::handle_generate_ideas))
        .route("/create_campaign", post(outreach::handle_create_campaign))
        .route("/campaigns/:id", get(outreach::handle_get_campaign))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::scraper::PageScraper;

    /// Router over a pool that never connects; only paths that skip the database are exercised.
    fn test_router(llm: ScriptedGenerator) -> Router {
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/prospector_unused")
            .unwrap();
        build_router(AppState {
            db,
            llm: Arc::new(llm),
            scraper: PageScraper::new(Duration::from_secs(1), 1000, 1024, false).unwrap(),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router(ScriptedGenerator::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "prospector");
    }

    #[tokio::test]
    async fn test_persona_rejects_blank_url() {
        let response = test_router(ScriptedGenerator::default())
            .oneshot(post_json("/persona", json!({"url": "  ", "description": "x"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_persona_requires_description() {
        let response = test_router(ScriptedGenerator::default())
            .oneshot(post_json("/persona", json!({"url": "https://example.com"})))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_persona_survives_unscrapable_url_and_bad_reply() {
        let llm = ScriptedGenerator::replying("not json at all");
        let response = test_router(llm)
            .oneshot(post_json(
                "/persona",
                json!({"url": "ftp://example.com/brochure", "description": "Retail CFOs"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], "scraped_lead");
        assert_eq!(body["name"], "");
        assert_eq!(body["email"], "");
        assert!(body["title"].is_null());
        assert_eq!(body["pain_points"], json!([]));
        assert_eq!(body["social_proof"], json!([]));
    }

    #[tokio::test]
    async fn test_persona_returns_normalized_reply() {
        let llm = ScriptedGenerator::replying(
            r#"```json
{"title": ["Head of Sales"], "company": "SaaS", "objections": "price, timing",
 "social_proof": ["Used by 500 teams", {"statement": "2x pipeline", "source": "Initech"}]}
```"#,
        );
        let response = test_router(llm)
            .oneshot(post_json(
                "/persona",
                json!({"url": "mailto:a@b.c", "description": "SaaS sales leaders"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Head of Sales");
        assert_eq!(body["objections"], json!(["price", "timing"]));
        assert_eq!(
            body["social_proof"],
            json!([
                {"statement": "Used by 500 teams", "source": null},
                {"statement": "2x pipeline", "source": "Initech"}
            ])
        );
    }

    #[tokio::test]
    async fn test_campaign_rejects_unknown_channel() {
        let response = test_router(ScriptedGenerator::default())
            .oneshot(post_json(
                "/create_campaign",
                json!({"persona": {"company": "Test Corp"}, "outreach_channel": "fax"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_campaign_rejects_malformed_id() {
        let response = test_router(ScriptedGenerator::default())
            .oneshot(
                Request::get("/campaigns/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
