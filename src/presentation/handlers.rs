// HTTP request handlers
use crate::application::chart_renderer::render_chart;
use crate::domain::chart::{ChartGeometry, ChartOptions, SeriesItem};
use crate::domain::home::HomeOption;
use crate::domain::navigation::GuardOutcome;
use crate::domain::role::Role;
use crate::infrastructure::http_response::{accepts_brotli, svg_response};
use crate::infrastructure::svg_writer::write_svg;
use crate::presentation::app_state::AppState;
use crate::presentation::session::session_from_headers;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct HomeRedirect {
    pub redirect: String,
}

#[derive(Serialize)]
pub struct HomeOptions {
    pub role: Option<Role>,
    pub default_route: String,
    pub options: Vec<HomeOption>,
}

#[derive(Deserialize)]
pub struct SetHomeRequest {
    pub route: String,
}

#[derive(Serialize)]
pub struct SetHomeResponse {
    pub success: bool,
}

#[derive(Deserialize)]
pub struct GuardQuery {
    pub path: String,
}

#[derive(Deserialize)]
pub struct ChartRequest {
    #[serde(default)]
    pub options: ChartOptions,
    #[serde(default)]
    pub series: Vec<SeriesItem>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Landing page for the caller
pub async fn get_home(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Json<HomeRedirect> {
    let session = session_from_headers(&headers);
    let redirect = state
        .home_route_service
        .preferred_home_route(Some(&session.user), session.bearer.as_deref())
        .await;

    Json(HomeRedirect { redirect })
}

/// Pages the caller may choose as landing page
pub async fn get_home_options(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Json<HomeOptions> {
    let role = session_from_headers(&headers).user.role;
    let service = &state.home_route_service;

    Json(HomeOptions {
        role,
        default_route: service.default_home_for_role(role).to_string(),
        options: service.allowed_homes_for_role(role).to_vec(),
    })
}

/// Store the caller's landing page; failures are reported in the body
pub async fn put_home(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetHomeRequest>,
) -> Json<SetHomeResponse> {
    let session = session_from_headers(&headers);
    let success = state
        .home_route_service
        .set_preferred_home_route(
            Some(&session.user),
            session.bearer.as_deref(),
            &request.route,
        )
        .await;

    Json(SetHomeResponse { success })
}

/// Guard decision for navigating to `path`; `/` resolves the landing page
pub async fn check_guard(
    headers: HeaderMap,
    Query(query): Query<GuardQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<GuardOutcome> {
    let session = session_from_headers(&headers);
    let guard = &state.navigation_guard;

    let outcome = if query.path == "/" {
        GuardOutcome::Redirect(guard.root_redirect(&session).await)
    } else {
        guard.check(&session, &query.path)
    };

    Json(outcome)
}

/// Render a chart as SVG
pub async fn render_chart_svg(
    headers: HeaderMap,
    Json(request): Json<ChartRequest>,
) -> impl IntoResponse {
    let geometry = render_chart(&request.series, &request.options);
    let svg = write_svg(&geometry);

    match svg_response(svg, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Render a chart and return the raw geometry
pub async fn render_chart_geometry(Json(request): Json<ChartRequest>) -> Json<ChartGeometry> {
    Json(render_chart(&request.series, &request.options))
}
