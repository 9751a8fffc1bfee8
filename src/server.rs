/// HTTP server exposing the dashboard as JSON
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use log::info;

use crate::dashboard::Dashboard;
use crate::filter::FacetSelection;

/// State shared by every worker. The dashboard is read-only after startup.
pub struct AppState {
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = state.dashboard.status();
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "rows": state.dashboard.records().len(),
        "degraded": status.is_degraded(),
        "message": status.message(),
    }))
}

/// Selector option lists
async fn facets(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.options())
}

/// Snapshot with nothing selected
async fn dashboard_unfiltered(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.snapshot(&FacetSelection::default()))
}

/// Snapshot for the posted selection
async fn dashboard_filtered(
    state: web::Data<AppState>,
    selection: web::Json<FacetSelection>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.snapshot(&selection))
}

/// Register the dashboard routes on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/api/facets", web::get().to(facets))
        .route("/api/dashboard", web::get().to(dashboard_unfiltered))
        .route("/api/dashboard", web::post().to(dashboard_filtered));
}

/// Start the HTTP server
pub async fn run_server(dashboard: Dashboard, host: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(dashboard));

    info!("Game sales dashboard on http://{}:{}", host, port);
    info!("  GET  /health");
    info!("  GET  /api/facets");
    info!("  GET  /api/dashboard");
    info!("  POST /api/dashboard");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            // CORS for a separately served frontend
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
