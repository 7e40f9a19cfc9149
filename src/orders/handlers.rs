use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::middleware::AuthUser, state::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    pub ok: bool,
    pub user_id: Uuid,
}

pub fn orders_routes() -> Router<AppState> {
    Router::new().route("/orders", get(list_orders))
}

#[instrument]
pub async fn list_orders(AuthUser(user_id): AuthUser) -> Json<OrdersResponse> {
    Json(OrdersResponse { ok: true, user_id })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{app::build_app, state::AppState};

    async fn get_orders(app: axum::Router, auth: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::get("/orders");
        if let Some(v) = auth {
            req = req.header(AUTHORIZATION, v);
        }
        let res = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn valid_bearer_reaches_handler() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();
        let token = state.tokens.issue(user_id).unwrap();

        let (status, body) = get_orders(build_app(state), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["userId"], user_id.to_string());
    }

    #[tokio::test]
    async fn header_failures_are_unauthorized() {
        let cases = [
            (None, "token not provided"),
            (Some("Bearer"), "token error"),
            (Some("Basic xyz"), "malformed token"),
            (Some("Bearer not-a-token"), "invalid token"),
        ];
        for (auth, message) in cases {
            let (status, body) = get_orders(build_app(AppState::fake()), auth).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{auth:?}");
            assert_eq!(body["error"], message, "{auth:?}");
        }
    }
}
