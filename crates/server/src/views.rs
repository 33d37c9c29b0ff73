use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use models::customer::{Customer, TopCustomer};
use models::reservation::Reservation;

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerView {
    pub id: Option<i32>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub full_name: String,
    pub phone: String,
    pub notes: String,
}

impl From<&Customer> for CustomerView {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name.clone(),
            middle_name: c.middle_name.clone(),
            last_name: c.last_name.clone(),
            full_name: c.full_name(),
            phone: c.phone.clone(),
            notes: c.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopCustomerView {
    #[serde(flatten)]
    pub customer: CustomerView,
    pub times: i64,
}

impl From<&TopCustomer> for TopCustomerView {
    fn from(t: &TopCustomer) -> Self {
        Self { customer: CustomerView::from(&t.customer), times: t.times }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationView {
    pub id: Option<i32>,
    pub customer_id: i32,
    pub start_at: NaiveDateTime,
    pub formatted_start_at: String,
    pub num_guests: i32,
    pub notes: String,
}

impl From<&Reservation> for ReservationView {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            customer_id: r.customer_id,
            start_at: r.start_at,
            formatted_start_at: r.formatted_start_at(),
            num_guests: r.num_guests,
            notes: r.notes.clone(),
        }
    }
}

/// Customer page: the customer and their reservations, earliest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDetail {
    pub customer: CustomerView,
    pub reservations: Vec<ReservationView>,
}

/// Reservation edit page: the reservation and who holds it.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDetail {
    pub reservation: ReservationView,
    pub customer: CustomerView,
}

pub fn customers(list: &[Customer]) -> Vec<CustomerView> {
    list.iter().map(CustomerView::from).collect()
}
