//! `application/x-www-form-urlencoded` bodies posted by the customer and reservation forms.
//!
//! Field names follow the HTML forms (`firstName`, `startAt`, ...); snake_case is accepted too.
//! Only presence is checked here, record rules live in `models`.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use models::customer::Customer;
use models::reservation::Reservation;
use crate::errors::JsonApiError;

const START_AT_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M %p",
];

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, JsonApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(JsonApiError::bad_request(format!("{} is required", field)));
    }
    Ok(trimmed)
}

#[derive(Debug, Deserialize)]
pub struct CustomerForm {
    #[serde(default, alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "middleName")]
    pub middle_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CustomerForm {
    /// Overwrite the editable fields of `customer`; the id is left alone.
    pub fn apply_to(self, customer: &mut Customer) -> Result<(), JsonApiError> {
        customer.first_name = required(&self.first_name, "firstName")?.to_string();
        customer.last_name = required(&self.last_name, "lastName")?.to_string();
        customer.middle_name = self.middle_name.filter(|m| !m.trim().is_empty());
        customer.phone = self.phone;
        customer.set_notes(self.notes);
        Ok(())
    }

    pub fn into_customer(self) -> Result<Customer, JsonApiError> {
        let mut customer = Customer::new("", "");
        self.apply_to(&mut customer)?;
        Ok(customer)
    }
}

#[derive(Debug, Deserialize)]
pub struct ReservationForm {
    #[serde(default, alias = "startAt")]
    pub start_at: String,
    #[serde(default, alias = "numGuests")]
    pub num_guests: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReservationForm {
    fn parsed(&self) -> Result<(NaiveDateTime, i32), JsonApiError> {
        let start_at = parse_start_at(required(&self.start_at, "startAt")?)?;
        let num_guests = required(&self.num_guests, "numGuests")?
            .parse::<i32>()
            .map_err(|_| JsonApiError::bad_request("numGuests must be a whole number"))?;
        Ok((start_at, num_guests))
    }

    pub fn into_reservation(self, customer_id: i32) -> Result<Reservation, JsonApiError> {
        let (start_at, num_guests) = self.parsed()?;
        Ok(Reservation::new(customer_id, start_at, num_guests).with_notes(self.notes))
    }

    /// Overwrite start time, guest count and notes.
    pub fn apply_to(self, reservation: &mut Reservation) -> Result<(), JsonApiError> {
        let (start_at, num_guests) = self.parsed()?;
        reservation.start_at = start_at;
        reservation.num_guests = num_guests;
        reservation.set_notes(self.notes);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub name: String,
}

/// RFC 3339 keeps its wall-clock time; zone-less inputs are taken as given.
pub fn parse_start_at(raw: &str) -> Result<NaiveDateTime, JsonApiError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    START_AT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| JsonApiError::bad_request(format!("startAt is not a valid date/time: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 9, 8).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parse_start_at_accepts_form_formats() {
        assert_eq!(parse_start_at("2018-09-08T12:20").unwrap(), at(12, 20));
        assert_eq!(parse_start_at("2018-09-08 12:20:00").unwrap(), at(12, 20));
        assert_eq!(parse_start_at("2018-09-08 7:05 pm").unwrap(), at(19, 5));
        assert_eq!(parse_start_at("2018-09-08T12:20:00+02:00").unwrap(), at(12, 20));
    }

    #[test]
    fn parse_start_at_rejects_garbage() {
        let err = parse_start_at("next tuesday").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn customer_form_requires_names_and_normalizes_notes() {
        let form = CustomerForm {
            first_name: "Ann".into(),
            middle_name: Some("".into()),
            last_name: "Lee".into(),
            phone: "555-0100".into(),
            notes: Some("".into()),
        };
        let c = form.into_customer().unwrap();
        assert_eq!(c.id, None);
        assert_eq!(c.middle_name, None);
        assert_eq!(c.notes, "");

        let missing = CustomerForm {
            first_name: "Ann".into(),
            middle_name: None,
            last_name: "  ".into(),
            phone: String::new(),
            notes: None,
        };
        assert_eq!(missing.into_customer().unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn reservation_form_apply_keeps_customer() {
        let mut r = Reservation::new(4, at(12, 0), 2);
        let form = ReservationForm { start_at: "2018-09-08T19:30".into(), num_guests: "5".into(), notes: None };
        form.apply_to(&mut r).unwrap();
        assert_eq!(r.customer_id, 4);
        assert_eq!(r.num_guests, 5);
        assert_eq!(r.start_at, at(19, 30));
    }

    #[test]
    fn reservation_form_rejects_non_numeric_guests() {
        let form = ReservationForm { start_at: "2018-09-08T19:30".into(), num_guests: "lots".into(), notes: None };
        assert_eq!(form.into_reservation(1).unwrap_err().status, StatusCode::BAD_REQUEST);
    }
}
