use std::net::SocketAddr;

use axum::{http::StatusCode, middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{actors, auth, error::ApiError, films, state::AppState};

pub fn build_app(state: AppState) -> Router {
    // Actor, film and search routes sit behind the basic-auth gate;
    // sign-up and the root greeting stay open.
    let protected = Router::new()
        .merge(actors::router())
        .merge(films::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::extractors::authenticate,
        ));

    Router::new()
        .route("/", get(|| async { "Hello world!" }))
        .merge(auth::router())
        .merge(protected)
        .fallback(|| async { (StatusCode::NOT_FOUND, "not found") })
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// PUT and DELETE on a bare collection path carry no id to act on.
pub(crate) async fn missing_id() -> ApiError {
    ApiError::bad_request("invalid id")
}

/// Id segment for PUT and DELETE: must be numeric and at least 1.
pub(crate) fn parse_id(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::bad_request("invalid id")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    async fn body_text(res: axum::http::Response<Body>) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn root_greets() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "Hello world!");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(res).await, "not found");
    }

    #[tokio::test]
    async fn protected_routes_require_credentials() {
        for path in ["/actor/", "/film/", "/search/?search_by=x"] {
            let app = build_app(AppState::fake());
            let res = app
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
            assert_eq!(body_text(res).await, "auth data was not provided");
        }
    }

    #[tokio::test]
    async fn mutation_without_credentials_is_401_not_400() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::put("/actor/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn sign_up_is_open_and_validates_before_store() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::post("/sign-up/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"password":"secret"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(res).await, "name was not provided");
    }

    #[test]
    fn parse_id_accepts_positive_numbers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("999999").unwrap(), 999999);
    }

    #[test]
    fn parse_id_rejects_zero_negative_and_garbage() {
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("").is_err());
    }
}
