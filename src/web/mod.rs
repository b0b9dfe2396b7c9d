//! The browser dashboard.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | dashboard page for `category`, `quantity` and `refresh` |
//! | `GET /api/pass` | the pass as JSON |
//! | `GET /static/no_image.svg` | placeholder for missing or broken images |
//! | `GET /health` | `ok` |

use crate::config::Config;
use crate::error::Result;
use crate::outputs::html::{PLACEHOLDER_IMAGE_PATH, unexpected_error_page};
use crate::pipeline::build_pipeline;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/pass", get(handlers::api_pass))
        .route(PLACEHOLDER_IMAGE_PATH, get(handlers::placeholder_image))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(unexpected_error))
        .with_state(Arc::new(state))
}

fn unexpected_error(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = message, "Request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(unexpected_error_page()),
    )
        .into_response()
}

/// Bind to `config.bind` and serve the dashboard until the process is stopped.
#[instrument(level = "info", skip_all, fields(bind = %config.bind))]
pub async fn serve(config: Config) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let listener = TcpListener::bind(&config.bind).await?;
    info!(addr = %listener.local_addr()?, "Dashboard listening");

    let app = create_app(AppState::new(pipeline, config));
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_app() -> String {
        let config = Config::default();
        let pipeline = build_pipeline(&config).unwrap();
        let app = create_app(AppState::new(pipeline, config));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_health_and_placeholder_routes() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let health = client.get(format!("{}/health", base)).send().await.unwrap();
        assert_eq!(health.status(), reqwest::StatusCode::OK);
        assert_eq!(health.text().await.unwrap(), "ok");

        let image = client
            .get(format!("{}{}", base, PLACEHOLDER_IMAGE_PATH))
            .send()
            .await
            .unwrap();
        assert_eq!(
            image.headers()["content-type"].to_str().unwrap(),
            "image/svg+xml"
        );
        assert!(image.text().await.unwrap().starts_with("<svg"));
    }

    #[test]
    fn test_panic_renders_generic_notice() {
        let response = unexpected_error(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
