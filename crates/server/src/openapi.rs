use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::views::{CustomerDetail, CustomerView, ReservationDetail, ReservationView, TopCustomerView};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Customer add/edit form. The HTML form posts `firstName`, `middleName`, `lastName`.
#[derive(ToSchema)]
pub struct CustomerFormDoc {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Reservation add/edit form. The HTML form posts `startAt`, `numGuests`.
#[derive(ToSchema)]
pub struct ReservationFormDoc {
    pub start_at: String,
    pub num_guests: i32,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
pub struct SearchFormDoc { pub name: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::list_customers,
        crate::routes::customers::top_ten,
        crate::routes::customers::add_customer,
        crate::routes::customers::search_customers,
        crate::routes::customers::show_customer,
        crate::routes::customers::edit_customer_form,
        crate::routes::customers::edit_customer,
        crate::routes::reservations::add_reservation,
        crate::routes::reservations::show_reservation,
        crate::routes::reservations::edit_reservation,
    ),
    components(
        schemas(
            HealthResponse,
            CustomerFormDoc,
            ReservationFormDoc,
            SearchFormDoc,
            CustomerView,
            TopCustomerView,
            ReservationView,
            CustomerDetail,
            ReservationDetail,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers", description = "Customer list, search, ranking and edits"),
        (name = "reservations", description = "Reservations attached to a customer"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
