use sea_orm::{entity::prelude::*, FromQueryResult};
use serde::{Deserialize, Serialize};

use crate::{errors, normalize_notes, reservation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: String,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Reservation,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Reservation => Entity::has_many(reservation::Entity).into(),
        }
    }
}

impl Related<reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A restaurant customer. `id` stays `None` until the record is first saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<i32>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: String,
    pub notes: String,
}

impl Customer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            phone: String::new(),
            notes: String::new(),
        }
    }

    pub fn with_middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: Option<S>) -> Self {
        self.set_notes(notes);
        self
    }

    /// Absent or empty notes are stored as `""`.
    pub fn set_notes<S: Into<String>>(&mut self, notes: Option<S>) {
        self.notes = normalize_notes(notes);
    }

    /// `"{first} {middle} {last}"`; an absent middle name leaves a double space.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name,
            self.middle_name.as_deref().unwrap_or(""),
            self.last_name
        )
    }

    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if self.first_name.trim().is_empty() {
            return Err(errors::ModelError::Validation("first name required".into()));
        }
        if self.last_name.trim().is_empty() {
            return Err(errors::ModelError::Validation("last name required".into()));
        }
        Ok(())
    }
}

impl From<Model> for Customer {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            first_name: m.first_name,
            middle_name: m.middle_name,
            last_name: m.last_name,
            phone: m.phone,
            notes: m.notes,
        }
    }
}

/// Customer ranked by how many reservations they hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopCustomer {
    #[serde(flatten)]
    pub customer: Customer,
    pub times: i64,
}

/// Row shape of the ranking query: every customer column plus `COUNT(reservations.id) AS times`.
#[derive(Debug, FromQueryResult)]
pub struct TopCustomerRow {
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: String,
    pub notes: String,
    pub times: i64,
}

impl From<TopCustomerRow> for TopCustomer {
    fn from(row: TopCustomerRow) -> Self {
        Self {
            customer: Customer {
                id: Some(row.id),
                first_name: row.first_name,
                middle_name: row.middle_name,
                last_name: row.last_name,
                phone: row.phone,
                notes: row.notes,
            },
            times: row.times,
        }
    }
}
