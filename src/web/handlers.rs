use crate::config::Config;
use crate::error::Result;
use crate::models::{Category, PassReport};
use crate::outputs::html::{DashboardPage, PLACEHOLDER_IMAGE_SVG, PageBody};
use crate::web::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub category: Option<String>,
    pub quantity: Option<usize>,
    pub refresh: Option<u8>,
}

impl DashboardQuery {
    /// Category and clamped quantity, falling back to the defaults.
    pub fn resolve(&self, config: &Config) -> (Category, usize) {
        let category = match self.category.as_deref().map(str::parse::<Category>) {
            Some(Ok(category)) => category,
            Some(Err(e)) => {
                warn!(error = %e, "Unknown category requested; using default");
                Category::default()
            }
            None => Category::default(),
        };
        let quantity = Config::clamp_quantity(self.quantity.unwrap_or(config.default_quantity));
        (category, quantity)
    }

    pub fn is_refresh(&self) -> bool {
        self.refresh == Some(1)
    }
}

async fn run_pass(state: &AppState, category: Category, quantity: usize) -> Result<PassReport> {
    let mut cache = state.cache.lock().await;
    state
        .pipeline
        .run_pass(category.label(), quantity, &mut cache)
        .await
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let (category, quantity) = query.resolve(&state.config);
    let refreshed = query.is_refresh();
    if refreshed {
        info!(%category, "Dashboard refreshed by timer");
    }

    let result = run_pass(&state, category, quantity).await;
    let body = match &result {
        Ok(report) => PageBody::Report(report),
        Err(e) if e.is_category_level() => PageBody::CategoryError {
            topic: category.label(),
        },
        Err(e) => {
            warn!(error = %e, "Pass failed unexpectedly");
            PageBody::Unexpected
        }
    };

    Html(
        DashboardPage {
            category,
            quantity,
            refresh_interval_secs: state.config.refresh_interval_secs,
            refreshed,
            body,
        }
        .to_string(),
    )
}

pub async fn api_pass(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let (category, quantity) = query.resolve(&state.config);
    match run_pass(&state, category, quantity).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            let status = if e.is_category_level() {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

pub async fn placeholder_image() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        PLACEHOLDER_IMAGE_SVG,
    )
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let config = Config::default();
        let (category, quantity) = DashboardQuery::default().resolve(&config);
        assert_eq!(category, Category::Technology);
        assert_eq!(quantity, config.default_quantity);
        assert!(!DashboardQuery::default().is_refresh());
    }

    #[test]
    fn test_query_parses_and_clamps() {
        let query = DashboardQuery {
            category: Some("Research Papers".to_string()),
            quantity: Some(40),
            refresh: Some(1),
        };
        let (category, quantity) = query.resolve(&Config::default());
        assert_eq!(category, Category::ResearchPapers);
        assert_eq!(quantity, 25);
        assert!(query.is_refresh());
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let query = DashboardQuery {
            category: Some("Sports".to_string()),
            quantity: Some(2),
            refresh: None,
        };
        assert_eq!(
            query.resolve(&Config::default()),
            (Category::Technology, 5)
        );
    }
}
