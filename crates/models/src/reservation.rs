use chrono::{Datelike, NaiveDateTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{customer, errors, normalize_notes};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub start_at: DateTime,
    pub num_guests: i32,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A table booking. `customer_id` is written once, on insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Option<i32>,
    pub customer_id: i32,
    pub start_at: NaiveDateTime,
    pub num_guests: i32,
    pub notes: String,
}

impl Reservation {
    pub fn new(customer_id: i32, start_at: NaiveDateTime, num_guests: i32) -> Self {
        Self { id: None, customer_id, start_at, num_guests, notes: String::new() }
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: Option<S>) -> Self {
        self.set_notes(notes);
        self
    }

    pub fn set_notes<S: Into<String>>(&mut self, notes: Option<S>) {
        self.notes = normalize_notes(notes);
    }

    /// e.g. `September 8th 2018, 12:20 pm`
    pub fn formatted_start_at(&self) -> String {
        let day = self.start_at.day();
        format!(
            "{} {}{} {}",
            self.start_at.format("%B"),
            day,
            ordinal_suffix(day),
            self.start_at.format("%Y, %-I:%M %P")
        )
    }

    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if self.num_guests < 1 {
            return Err(errors::ModelError::Validation("reservation needs at least 1 guest".into()));
        }
        Ok(())
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

impl From<Model> for Reservation {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            customer_id: m.customer_id,
            start_at: m.start_at,
            num_guests: m.num_guests,
            notes: m.notes,
        }
    }
}
