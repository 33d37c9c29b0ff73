use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use tracing::info;

use service::customer_service;

use crate::{
    errors::JsonApiError,
    forms::{CustomerForm, SearchForm},
    routes::ServerState,
    views::{self, CustomerDetail, CustomerView, ReservationView, TopCustomerView},
};

#[utoipa::path(
    get, path = "/", tag = "customers",
    responses(
        (status = 200, description = "Customers ordered by last, then first name", body = [CustomerView]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list_customers(State(state): State<ServerState>) -> Result<Json<Vec<CustomerView>>, JsonApiError> {
    let customers = customer_service::list_customers(&state.db).await?;
    Ok(Json(views::customers(&customers)))
}

#[utoipa::path(
    get, path = "/top-ten/", tag = "customers",
    responses(
        (status = 200, description = "Ten customers with the most reservations", body = [TopCustomerView]),
        (status = 500, description = "Ranking Failed")
    )
)]
pub async fn top_ten(State(state): State<ServerState>) -> Result<Json<Vec<TopCustomerView>>, JsonApiError> {
    let top = customer_service::top_ten_customers(&state.db).await?;
    Ok(Json(top.iter().map(TopCustomerView::from).collect()))
}

#[utoipa::path(
    post, path = "/add/", tag = "customers",
    request_body(content = crate::openapi::CustomerFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirects to the customer page"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn add_customer(State(state): State<ServerState>, Form(form): Form<CustomerForm>) -> Result<Redirect, JsonApiError> {
    let mut customer = form.into_customer()?;
    customer_service::save_customer(&state.db, &mut customer).await?;
    let id = customer.id.unwrap_or_default();
    info!(id, "customer added");
    Ok(Redirect::to(&format!("/{}/", id)))
}

#[utoipa::path(
    post, path = "/search/", tag = "customers",
    request_body(content = crate::openapi::SearchFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Matching customers", body = [CustomerView]),
        (status = 404, description = "No customer matches")
    )
)]
pub async fn search_customers(State(state): State<ServerState>, Form(form): Form<SearchForm>) -> Result<Json<Vec<CustomerView>>, JsonApiError> {
    let customers = customer_service::find_customers_by_name(&state.db, form.name.trim()).await?;
    Ok(Json(views::customers(&customers)))
}

#[utoipa::path(
    get, path = "/{id}/", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer with reservations", body = CustomerDetail),
        (status = 404, description = "Not Found")
    )
)]
pub async fn show_customer(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<CustomerDetail>, JsonApiError> {
    let customer = customer_service::get_customer(&state.db, id).await?;
    let reservations = customer_service::customer_reservations(&state.db, &customer).await?;
    Ok(Json(CustomerDetail {
        customer: CustomerView::from(&customer),
        reservations: reservations.iter().map(ReservationView::from).collect(),
    }))
}

#[utoipa::path(
    get, path = "/{id}/edit/", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Current values for the edit form", body = CustomerView),
        (status = 404, description = "Not Found")
    )
)]
pub async fn edit_customer_form(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<CustomerView>, JsonApiError> {
    let customer = customer_service::get_customer(&state.db, id).await?;
    Ok(Json(CustomerView::from(&customer)))
}

#[utoipa::path(
    post, path = "/{id}/edit/", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body(content = crate::openapi::CustomerFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirects to the customer page"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn edit_customer(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, JsonApiError> {
    let mut customer = customer_service::get_customer(&state.db, id).await?;
    form.apply_to(&mut customer)?;
    customer_service::save_customer(&state.db, &mut customer).await?;
    info!(id, "customer edited");
    Ok(Redirect::to(&format!("/{}/", id)))
}
