pub mod customers;
pub mod reservations;

use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::openapi;

/// Shared by every handler; the connection pool clones cheaply.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: customer pages, reservation pages, health and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let customer_routes = Router::new()
        .route("/", get(customers::list_customers))
        .route("/top-ten/", get(customers::top_ten))
        .route("/add/", post(customers::add_customer))
        .route("/search/", post(customers::search_customers))
        .route("/:id/", get(customers::show_customer))
        .route("/:id/edit/", get(customers::edit_customer_form).post(customers::edit_customer));

    let reservation_routes = Router::new()
        .route("/:id/add-reservation/", post(reservations::add_reservation))
        .route(
            "/edit-reservation/:id",
            get(reservations::show_reservation).post(reservations::edit_reservation),
        );

    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    public
        .merge(customer_routes)
        .merge(reservation_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // One INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // Status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
