use crate::config::AppConfig;
use crate::html;
use crate::render;
use crate::types::{FilterOptions, Selection};
use crate::view::ViewModel;
use anyhow::{Context, Result};
use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use geojson::GeoJson;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub model: ViewModel,
    pub config: AppConfig,
}

#[derive(Serialize)]
pub struct ViewResponse<'a> {
    figure: serde_json::Value,
    table: render::Table<'a>,
}

/// Figure and table for one selection, the body of `/api/view`.
pub fn view_response<'a>(model: &'a ViewModel, config: &AppConfig, selection: &Selection) -> ViewResponse<'a> {
    let view = model.derive_view(selection);
    ViewResponse {
        figure: render::figure(&view, &config.map),
        table: render::table(&view),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(index_handler))
        .route("/api/options", get(options_handler))
        .route("/api/view", get(view_handler))
        .route("/api/table.csv", get(csv_handler))
        .route("/api/points.geojson", get(geojson_handler));

    if let Some(dir) = &state.config.server.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: AppConfig, model: ViewModel) -> Result<()> {
    let addr = SocketAddr::from((config.server.host, config.server.port));
    let state = Arc::new(AppState { model, config });

    let app = router(state);

    tracing::info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn selection(query: Option<String>) -> Selection {
    query.as_deref().map(Selection::from_query).unwrap_or_default()
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(html::dashboard_page(&state.config.dashboard.title))
}

async fn options_handler(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.model.options())
}

async fn view_handler(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let selection = selection(query);
    tracing::debug!("Deriving view for {:?}", selection);
    Json(view_response(&state.model, &state.config, &selection)).into_response()
}

async fn csv_handler(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let view = state.model.derive_view(&selection(query));
    match render::table_csv(&view) {
        Ok(body) => ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to render CSV: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn geojson_handler(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let view = state.model.derive_view(&selection(query));
    let body = GeoJson::from(render::points_geojson(&view)).to_string();
    ([(header::CONTENT_TYPE, "application/geo+json")], body).into_response()
}
