//! Local HTTP surface: page shell, tab panels and render endpoints.
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{AgbControls, BgbControls, FilterOptions, GhgControls, Tab, WeatherControls};
use crate::readers::{DataContext, PageAssets};
use crate::render::{render_panel, render_shell, ControlState, RenderOutput};

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    data: Arc<DataContext>,
    shell: Arc<str>,
    debug: bool,
}

impl AppState {
    /// Build the page shell once and wrap the loaded data
    pub fn new(data: DataContext, assets: &PageAssets, debug: bool) -> Self {
        Self {
            data: Arc::new(data),
            shell: Arc::from(render_shell(assets, Tab::Ghg)),
            debug,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/panel/:tab", get(panel))
        .route("/api/options", get(options))
        .route("/api/render/:tab", get(render))
        .with_state(state)
}

/// Serve the dashboard until Ctrl-C
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.shell.to_string())
}

async fn health() -> &'static str {
    "ok"
}

async fn options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.data.options.clone())
}

async fn panel(
    State(state): State<AppState>,
    Path(tab): Path<String>,
) -> std::result::Result<Html<String>, StatusCode> {
    let tab: Tab = tab.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(Html(render_panel(tab, &state.data.options)))
}

/// Parse the query string into the control state of `tab`
pub fn parse_controls(tab: Tab, uri: &Uri) -> std::result::Result<ControlState, Response> {
    let state = match tab {
        Tab::Ghg => ControlState::Ghg(
            Query::<GhgControls>::try_from_uri(uri)
                .map_err(IntoResponse::into_response)?
                .0,
        ),
        Tab::Weather => ControlState::Weather(
            Query::<WeatherControls>::try_from_uri(uri)
                .map_err(IntoResponse::into_response)?
                .0,
        ),
        Tab::Agb => ControlState::Agb(
            Query::<AgbControls>::try_from_uri(uri)
                .map_err(IntoResponse::into_response)?
                .0,
        ),
        Tab::Bgb => ControlState::Bgb(
            Query::<BgbControls>::try_from_uri(uri)
                .map_err(IntoResponse::into_response)?
                .0,
        ),
    };
    Ok(state)
}

async fn render(
    State(state): State<AppState>,
    Path(tab): Path<String>,
    uri: Uri,
) -> std::result::Result<Json<RenderOutput>, Response> {
    let tab: Tab = tab
        .parse()
        .map_err(|_| StatusCode::NOT_FOUND.into_response())?;
    let controls = parse_controls(tab, &uri)?;

    let mut output = controls.render(&state.data);
    debug!(tab = %tab, sections = output.sections.len(), "render request");

    if state.debug {
        output.debug = serde_json::to_value(&controls).ok();
    }
    Ok(Json(output))
}
