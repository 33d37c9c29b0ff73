use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use tracing::info;

use service::{customer_service, reservation_service};

use crate::{
    errors::JsonApiError,
    forms::ReservationForm,
    routes::ServerState,
    views::{CustomerView, ReservationDetail, ReservationView},
};

#[utoipa::path(
    post, path = "/{id}/add-reservation/", tag = "reservations",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body(content = crate::openapi::ReservationFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirects to the customer page"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn add_reservation(
    State(state): State<ServerState>,
    Path(customer_id): Path<i32>,
    Form(form): Form<ReservationForm>,
) -> Result<Redirect, JsonApiError> {
    let mut reservation = form.into_reservation(customer_id)?;
    reservation_service::save_reservation(&state.db, &mut reservation).await?;
    info!(id = ?reservation.id, customer_id, "reservation added");
    Ok(Redirect::to(&format!("/{}/", customer_id)))
}

#[utoipa::path(
    get, path = "/edit-reservation/{id}", tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation with its customer", body = ReservationDetail),
        (status = 404, description = "Not Found")
    )
)]
pub async fn show_reservation(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<ReservationDetail>, JsonApiError> {
    let reservation = reservation_service::get_reservation(&state.db, id).await?;
    let customer = customer_service::get_customer(&state.db, reservation.customer_id).await?;
    Ok(Json(ReservationDetail {
        reservation: ReservationView::from(&reservation),
        customer: CustomerView::from(&customer),
    }))
}

#[utoipa::path(
    post, path = "/edit-reservation/{id}", tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body(content = crate::openapi::ReservationFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirects to the customer page"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn edit_reservation(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Form(form): Form<ReservationForm>,
) -> Result<Redirect, JsonApiError> {
    let mut reservation = reservation_service::get_reservation(&state.db, id).await?;
    form.apply_to(&mut reservation)?;
    reservation_service::save_reservation(&state.db, &mut reservation).await?;
    info!(id, customer_id = reservation.customer_id, "reservation edited");
    Ok(Redirect::to(&format!("/{}/", reservation.customer_id)))
}
