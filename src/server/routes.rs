//! HTTP route handlers for the roast API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::roast::share::{challenge_link, challenge_share_message, roast_share_message};
use crate::roast::{RoastError, RoastRequest, SavedRoast};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/roast", post(generate_roast))
        .route("/api/saved", get(list_saved).post(save_roast))
        .route("/api/saved/{index}", delete(remove_saved))
        .route("/api/challenge", post(create_challenge))
        .with_state(state)
}

/// Map a pipeline error to a status code and plain-text body.
fn error_response(err: &RoastError) -> (StatusCode, String) {
    let status = match err {
        RoastError::Validation(_) => StatusCode::BAD_REQUEST,
        RoastError::SavedIndexOutOfRange { .. } => StatusCode::NOT_FOUND,
        RoastError::Superseded => StatusCode::CONFLICT,
        RoastError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RoastError::Network(_) | RoastError::EmptyCompletion => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "roastbot",
        "backend": state.generator.backend(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Roast response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoastReply {
    /// Generated roast.
    pub roast: String,
    /// Ready-to-share message containing the roast.
    #[serde(rename = "shareMessage")]
    pub share_message: String,
}

/// Handle roast generation requests.
async fn generate_roast(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoastRequest>,
) -> Result<Json<RoastReply>, (StatusCode, String)> {
    request.validate_details().map_err(|e| error_response(&e))?;

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(
        %request_id,
        category = %request.category,
        has_image = request.image_url.is_some(),
        "Roast requested"
    );

    let roast = state.generator.generate(&request).await.map_err(|e| {
        tracing::error!(%request_id, "Roast generation failed: {e}");
        error_response(&e)
    })?;

    Ok(Json(RoastReply {
        share_message: roast_share_message(&roast),
        roast,
    }))
}

/// Save request.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    /// Roast text.
    pub roast: String,
    /// Name the roast was generated for.
    #[serde(default)]
    pub name: String,
    /// Interests the roast was generated for.
    #[serde(default)]
    pub interests: String,
}

/// Saved roast with its current position.
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedRoastDto {
    /// Position in the collection, used for deletion.
    pub index: usize,
    /// The saved roast.
    #[serde(flatten)]
    pub roast: SavedRoast,
}

/// List saved roasts, oldest first.
async fn list_saved(State(state): State<Arc<AppState>>) -> Json<Vec<SavedRoastDto>> {
    let dtos = state
        .saved
        .read()
        .await
        .list()
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, roast)| SavedRoastDto { index, roast })
        .collect();
    Json(dtos)
}

/// Append a roast to the saved collection.
async fn save_roast(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveRequest>,
) -> Result<(StatusCode, Json<SavedRoastDto>), (StatusCode, String)> {
    if request.roast.trim().is_empty() {
        return Err(error_response(&RoastError::Validation(
            "roast must not be empty".to_string(),
        )));
    }

    let (index, roast) = {
        let mut saved = state.saved.write().await;
        let index = saved.add(request.roast, request.name, request.interests);
        (index, saved.get(index).cloned())
    };
    let roast = roast
        .ok_or_else(|| (StatusCode::INTERNAL_SERVER_ERROR, "saved roast vanished".to_string()))?;

    tracing::debug!(index, "Roast saved");
    Ok((StatusCode::CREATED, Json(SavedRoastDto { index, roast })))
}

/// Remove a saved roast by position.
async fn remove_saved(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<SavedRoast>, (StatusCode, String)> {
    let removed = state
        .saved
        .write()
        .await
        .remove(index)
        .map_err(|e| error_response(&e))?;
    tracing::debug!(index, "Saved roast removed");
    Ok(Json(removed))
}

/// Challenge request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Friend being challenged.
    pub friend_name: String,
    /// Optional personal message.
    pub message: Option<String>,
}

/// Challenge response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeReply {
    /// Link the friend opens to accept.
    pub link: String,
    /// Ready-to-share message containing the link.
    pub share_message: String,
}

/// Build a friend challenge link and message.
async fn create_challenge(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChallengeRequest>,
) -> Result<Json<ChallengeReply>, (StatusCode, String)> {
    let link = challenge_link(&state.challenge_base_url, &request.friend_name)
        .map_err(|e| error_response(&e))?;
    let share_message =
        challenge_share_message(&request.friend_name, request.message.as_deref(), &link);

    Ok(Json(ChallengeReply {
        link: link.into(),
        share_message,
    }))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::roast::{FallbackGenerator, RoastGenerator, RoastResult};

    struct FixedGenerator(Option<&'static str>);

    #[async_trait]
    impl RoastGenerator for FixedGenerator {
        async fn generate(&self, _request: &RoastRequest) -> RoastResult<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| RoastError::Network("upstream returned HTTP 500".to_string()))
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    fn app(generator: Arc<dyn RoastGenerator>) -> Router {
        create_router(AppState::with_generator(generator, "https://roastbot.app"))
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(FallbackGenerator))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["backend"], "fallback");
    }

    #[tokio::test]
    async fn test_roast_success() {
        let body = json!({
            "category": "spicy",
            "name": "Sam",
            "interests": "chess",
            "imageUrl": "https://x/y.jpg"
        });
        let response = app(Arc::new(FixedGenerator(Some("Nice haircut, Sam."))))
            .oneshot(json_request("POST", "/api/roast", &body))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["roast"], "Nice haircut, Sam.");
        assert!(json["shareMessage"].as_str().unwrap_or_default().contains("Nice haircut, Sam."));
    }

    async fn status_of(router: Router, request: Request<Body>) -> StatusCode {
        router.oneshot(request).await.expect("response").status()
    }

    #[tokio::test]
    async fn test_roast_errors() {
        let blank_name = json!({ "category": "mild", "name": "  " });
        assert_eq!(
            status_of(
                app(Arc::new(FixedGenerator(Some("x")))),
                json_request("POST", "/api/roast", &blank_name)
            )
            .await,
            StatusCode::BAD_REQUEST
        );

        let bad_category = json!({ "category": "nuclear", "name": "Sam" });
        assert_eq!(
            status_of(
                app(Arc::new(FixedGenerator(Some("x")))),
                json_request("POST", "/api/roast", &bad_category)
            )
            .await,
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let ok_body = json!({ "category": "mild", "name": "Sam" });
        assert_eq!(
            status_of(
                app(Arc::new(FixedGenerator(None))),
                json_request("POST", "/api/roast", &ok_body)
            )
            .await,
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_saved_roundtrip() {
        let router = app(Arc::new(FallbackGenerator));

        for roast in ["first", "second", "third"] {
            let body = json!({ "roast": roast, "name": "Sam", "interests": "chess" });
            let created = status_of(router.clone(), json_request("POST", "/api/saved", &body)).await;
            assert_eq!(created, StatusCode::CREATED);
        }

        let removed = router
            .clone()
            .oneshot(Request::builder().method("DELETE").uri("/api/saved/1").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(removed.status(), StatusCode::OK);
        assert_eq!(body_json(removed).await["roast"], "second");

        let listing = router
            .clone()
            .oneshot(Request::builder().uri("/api/saved").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let listed = body_json(listing).await;
        assert_eq!(listed[0]["roast"], "first");
        assert_eq!(listed[1]["roast"], "third");
        assert_eq!(listed[1]["index"], 1);

        let missing = status_of(
            router,
            Request::builder().method("DELETE").uri("/api/saved/7").body(Body::empty()).expect("request"),
        )
        .await;
        assert_eq!(missing, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_challenge() {
        let body = json!({ "friendName": "Ann" });
        let response = app(Arc::new(FallbackGenerator))
            .oneshot(json_request("POST", "/api/challenge", &body))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let link = json["link"].as_str().unwrap_or_default();
        assert!(link.starts_with("https://roastbot.app/challenge?name=Ann&ref="));
        assert!(json["shareMessage"].as_str().unwrap_or_default().starts_with("Hey Ann!"));

        let blank = json!({ "friendName": " " });
        assert_eq!(
            status_of(
                app(Arc::new(FallbackGenerator)),
                json_request("POST", "/api/challenge", &blank)
            )
            .await,
            StatusCode::BAD_REQUEST
        );
    }
}
